//! Five-axis performance shape for a single video.

use serde::Serialize;

use super::guard::clamp;
use crate::analysis::VideoStatistics;

/// Channel size assumed when the service reports no subscribers.
pub const DEFAULT_SUBSCRIBERS: f64 = 100_000.0;
pub const ENGAGEMENT_RATE_SCALE: f64 = 10.0;
pub const LIKE_VIEW_SCALE: f64 = 10.0;
pub const COMMENT_VIEW_SCALE: f64 = 100.0;
/// Views per day that maps to the outer ring of the radar.
pub const VIEWS_PER_DAY_CEILING: f64 = 500_000.0;

/// Radial range the chart is drawn with.
pub const RADAR_RANGE: [f64; 2] = [0.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RadarAxis {
    #[serde(rename = "View/Sub Ratio")]
    ViewSubRatio,
    #[serde(rename = "Engagement Rate")]
    EngagementRate,
    #[serde(rename = "Like/View Ratio")]
    LikeViewRatio,
    #[serde(rename = "Comment/View Ratio")]
    CommentViewRatio,
    #[serde(rename = "Views/Day")]
    ViewsPerDay,
}

impl RadarAxis {
    pub const ALL: [RadarAxis; 5] = [
        RadarAxis::ViewSubRatio,
        RadarAxis::EngagementRate,
        RadarAxis::LikeViewRatio,
        RadarAxis::CommentViewRatio,
        RadarAxis::ViewsPerDay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RadarAxis::ViewSubRatio => "View/Sub Ratio",
            RadarAxis::EngagementRate => "Engagement Rate",
            RadarAxis::LikeViewRatio => "Like/View Ratio",
            RadarAxis::CommentViewRatio => "Comment/View Ratio",
            RadarAxis::ViewsPerDay => "Views/Day",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarValue {
    pub axis: RadarAxis,
    pub value: f64,
}

/// Normalized radar values, always in [`RadarAxis::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarMetrics {
    pub values: Vec<RadarValue>,
    pub range: [f64; 2],
}

impl RadarMetrics {
    pub fn from_statistics(stats: &VideoStatistics) -> Self {
        let values = RadarAxis::ALL
            .iter()
            .map(|axis| RadarValue {
                axis: *axis,
                value: axis_value(*axis, stats),
            })
            .collect();
        Self {
            values,
            range: RADAR_RANGE,
        }
    }

    pub fn get(&self, axis: RadarAxis) -> f64 {
        self.values
            .iter()
            .find(|v| v.axis == axis)
            .map(|v| v.value)
            .unwrap_or(0.0)
    }
}

fn axis_value(axis: RadarAxis, stats: &VideoStatistics) -> f64 {
    let views = stats.views as f64;
    match axis {
        RadarAxis::ViewSubRatio => {
            let subscribers = if stats.subscribers == 0 {
                DEFAULT_SUBSCRIBERS
            } else {
                stats.subscribers as f64
            };
            clamp(views / subscribers, RADAR_RANGE[0], RADAR_RANGE[1])
        }
        // Not clamped: reported rates above 10% overshoot the outer ring.
        RadarAxis::EngagementRate => stats.engagement_rate / ENGAGEMENT_RATE_SCALE,
        RadarAxis::LikeViewRatio if stats.views > 0 => {
            stats.likes as f64 / views * LIKE_VIEW_SCALE
        }
        RadarAxis::CommentViewRatio if stats.views > 0 => {
            stats.comments as f64 / views * COMMENT_VIEW_SCALE
        }
        RadarAxis::LikeViewRatio | RadarAxis::CommentViewRatio => 0.0,
        RadarAxis::ViewsPerDay => {
            let views_per_day = stats.views_per_day.unwrap_or(0.0);
            clamp(
                views_per_day / VIEWS_PER_DAY_CEILING,
                RADAR_RANGE[0],
                RADAR_RANGE[1],
            )
        }
    }
}
