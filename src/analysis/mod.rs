//! Boundary with the external analysis service.
//!
//! The service takes a content prompt and answers with a marketing strategy
//! payload, including the per-video statistics the dashboard charts are
//! derived from.

mod client;
mod models;

pub use client::{AnalysisError, AnalysisService, HttpAnalysisClient};
#[cfg(feature = "mock")]
pub use client::MockAnalysisService;
pub use models::{
    display_text, AnalyzeData, AnalyzeEnvelope, AnalyzeRequest, ApiErrorBody,
    ContentRecommendations, ContentType, KeywordCount, MarketingTactics, StrategyPayload,
    SuccessMetrics, TopMatches, TrendAnalysis, VideoCollections, VideoRecord, VideoStatistics,
    DEFAULT_REGION_CODE, NOT_SPECIFIED, REGION_CODES,
};
