//! Observed engagement ratios next to industry reference values.

use serde::Serialize;

use super::engagement::estimate_engagement;
use super::guard::safe_div;
use crate::analysis::VideoStatistics;

/// 5% likes per view.
pub const LIKE_VIEW_BENCHMARK: f64 = 0.05;
/// 1% comments per view.
pub const COMMENT_VIEW_BENCHMARK: f64 = 0.01;
/// 6% overall engagement.
pub const ENGAGEMENT_BENCHMARK: f64 = 0.06;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkEntry {
    pub metric: &'static str,
    pub observed: f64,
    pub benchmark: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    pub entries: [BenchmarkEntry; 3],
}

impl BenchmarkResult {
    pub fn compare(stats: &VideoStatistics) -> Self {
        let views = stats.views as f64;
        Self {
            entries: [
                BenchmarkEntry {
                    metric: "Like/View",
                    observed: safe_div(stats.likes as f64, views),
                    benchmark: LIKE_VIEW_BENCHMARK,
                },
                BenchmarkEntry {
                    metric: "Comment/View",
                    observed: safe_div(stats.comments as f64, views),
                    benchmark: COMMENT_VIEW_BENCHMARK,
                },
                BenchmarkEntry {
                    metric: "Overall Engagement",
                    observed: estimate_engagement(stats) / 100.0,
                    benchmark: ENGAGEMENT_BENCHMARK,
                },
            ],
        }
    }
}
