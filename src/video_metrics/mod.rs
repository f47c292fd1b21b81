//! Chart-ready metrics derived from the raw statistics of a single video.
//!
//! Every derivation here is a pure function of [`VideoStatistics`], except the
//! view growth curve which also takes the random source it draws from.

mod benchmark;
mod bubble;
mod engagement;
pub mod format;
mod growth;
pub mod guard;
mod radar;

pub use benchmark::{
    BenchmarkEntry, BenchmarkResult, COMMENT_VIEW_BENCHMARK, ENGAGEMENT_BENCHMARK,
    LIKE_VIEW_BENCHMARK,
};
pub use bubble::{build_bubbles, BubbleCategory, BubblePoint};
pub use engagement::{estimate_engagement, EngagementEstimate, EngagementSource};
pub use growth::{
    draw_multipliers, estimate_views_per_day, GrowthPoint, MultiplierBand, ViewGrowthSeries,
    GROWTH_DAYS, MULTIPLIER_BANDS,
};
pub use radar::{RadarAxis, RadarMetrics, RadarValue};

use rand::Rng;
use serde::Serialize;

use crate::analysis::VideoStatistics;

/// Everything the per-video charts need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoMetrics {
    pub engagement: EngagementEstimate,
    pub radar: RadarMetrics,
    pub bubbles: [BubblePoint; 3],
    pub benchmark: BenchmarkResult,
    pub growth: ViewGrowthSeries,
}

impl VideoMetrics {
    pub fn derive<R: Rng + ?Sized>(stats: &VideoStatistics, rng: &mut R) -> Self {
        Self {
            engagement: EngagementEstimate::from_statistics(stats),
            radar: RadarMetrics::from_statistics(stats),
            bubbles: build_bubbles(stats),
            benchmark: BenchmarkResult::compare(stats),
            growth: ViewGrowthSeries::simulate(stats, rng),
        }
    }
}
