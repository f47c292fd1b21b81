//! Bubble chart points relating likes, comments and views.

use serde::Serialize;

use super::guard::safe_div;
use crate::analysis::VideoStatistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BubbleCategory {
    Likes,
    Comments,
    Engagement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubblePoint {
    pub label: &'static str,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub category: BubbleCategory,
}

/// Builds the three bubbles for `stats`.
///
/// The engagement fallback here is on the percentage scale, unlike
/// [`super::EngagementEstimate`] which falls back to a fraction.
pub fn build_bubbles(stats: &VideoStatistics) -> [BubblePoint; 3] {
    let views = (stats.views as f64).max(1.0);
    let likes = stats.likes as f64;
    let comments = stats.comments as f64;

    let engagement_rate = if stats.engagement_rate == 0.0 {
        ((likes / views) + (comments / views)) / 2.0 * 100.0
    } else {
        stats.engagement_rate
    };

    let like_pct = safe_div(likes, views) * 100.0;

    [
        BubblePoint {
            label: "Likes-Comments Ratio",
            x: safe_div(likes, comments),
            y: like_pct,
            size: like_pct.powi(2),
            category: BubbleCategory::Likes,
        },
        BubblePoint {
            label: "Comments-Views Ratio",
            x: safe_div(comments, views) * 1000.0,
            y: safe_div(comments, likes) * 100.0,
            size: (safe_div(comments, views) * 100.0) * 100.0,
            category: BubbleCategory::Comments,
        },
        BubblePoint {
            label: "Overall Engagement",
            x: engagement_rate / 10.0,
            y: safe_div(likes + comments, views) * 100.0,
            size: engagement_rate.powi(2),
            category: BubbleCategory::Engagement,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn builds_three_points_in_order() {
        let stats = VideoStatistics {
            views: 1000,
            likes: 50,
            comments: 10,
            engagement_rate: 4.0,
            ..Default::default()
        };
        let [likes, comments, engagement] = build_bubbles(&stats);

        assert_eq!(likes.category, BubbleCategory::Likes);
        assert!(approx(likes.x, 5.0));
        assert!(approx(likes.y, 5.0));
        assert!(approx(likes.size, 25.0));

        assert_eq!(comments.category, BubbleCategory::Comments);
        assert!(approx(comments.x, 10.0));
        assert!(approx(comments.y, 20.0));
        assert!(approx(comments.size, 100.0));

        assert_eq!(engagement.category, BubbleCategory::Engagement);
        assert!(approx(engagement.x, 0.4));
        assert!(approx(engagement.y, 6.0));
        assert!(approx(engagement.size, 16.0));
    }

    #[test]
    fn percentage_fallback_when_rate_unreported() {
        let stats = VideoStatistics {
            views: 1000,
            likes: 50,
            comments: 10,
            ..Default::default()
        };
        let engagement = &build_bubbles(&stats)[2];

        // (0.05 + 0.01) / 2 * 100 = 3
        assert!(approx(engagement.x, 0.3));
        assert!(approx(engagement.size, 9.0));
    }

    #[test]
    fn empty_statistics_produce_zeroes() {
        let points = build_bubbles(&VideoStatistics::default());
        for point in points.iter() {
            assert_eq!(point.x, 0.0);
            assert_eq!(point.y, 0.0);
            assert_eq!(point.size, 0.0);
        }
    }
}
