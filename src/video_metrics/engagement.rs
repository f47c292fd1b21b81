//! Engagement rate with a computed fallback for videos that report none.

use serde::Serialize;

use super::guard::safe_div;
use crate::analysis::VideoStatistics;

/// Where an [`EngagementEstimate`] came from.
///
/// The two branches are on different scales: a reported rate is a
/// percentage (0–100), a computed one is a fraction (0–1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementSource {
    Reported,
    Computed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngagementEstimate {
    pub value: f64,
    pub source: EngagementSource,
}

impl EngagementEstimate {
    /// Estimates engagement for `stats`.
    ///
    /// A zero `engagement_rate` means the service did not report one; in that
    /// case the mean of like/view and comment/view is returned instead.
    pub fn from_statistics(stats: &VideoStatistics) -> Self {
        if stats.engagement_rate == 0.0 {
            let views = stats.views as f64;
            let like_view = safe_div(stats.likes as f64, views);
            let comment_view = safe_div(stats.comments as f64, views);
            Self {
                value: (like_view + comment_view) / 2.0,
                source: EngagementSource::Computed,
            }
        } else {
            Self {
                value: stats.engagement_rate,
                source: EngagementSource::Reported,
            }
        }
    }
}

/// Shorthand for [`EngagementEstimate::from_statistics`] when only the number matters.
pub fn estimate_engagement(stats: &VideoStatistics) -> f64 {
    EngagementEstimate::from_statistics(stats).value
}
