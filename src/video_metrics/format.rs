//! Display helpers for video cards.

use serde::Serialize;

const DESCRIPTION_EXCERPT_CHARS: usize = 300;

/// Compact count: `1.5M`, `12.3K`, or the plain number below a thousand.
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementTier {
    Excellent,
    Good,
    Average,
    Low,
}

impl EngagementTier {
    /// Tier for a fraction-scale engagement rate.
    pub fn from_rate(rate: f64) -> Self {
        if rate > 0.1 {
            EngagementTier::Excellent
        } else if rate > 0.05 {
            EngagementTier::Good
        } else if rate > 0.02 {
            EngagementTier::Average
        } else {
            EngagementTier::Low
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            EngagementTier::Excellent => "#4CAF50",
            EngagementTier::Good => "#2196F3",
            EngagementTier::Average => "#FF9800",
            EngagementTier::Low => "#F44336",
        }
    }
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video_id)
}

/// First 300 characters of a description, `None` when there is nothing to show.
pub fn description_excerpt(description: &str) -> Option<String> {
    if description.is_empty() {
        return None;
    }
    let mut chars = description.chars();
    let excerpt: String = chars.by_ref().take(DESCRIPTION_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        Some(format!("{}...", excerpt))
    } else {
        Some(excerpt)
    }
}
