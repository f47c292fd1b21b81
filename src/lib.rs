//! YouTube Trends Dashboard Library
//!
//! Metrics derivation for the trends dashboard charts, the client for the
//! external analysis service, and the HTTP server exposing both.

pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod server;
pub mod session;
pub mod video_metrics;

// Re-export commonly used types for convenience
pub use analysis::{AnalysisService, HttpAnalysisClient, StrategyPayload, VideoStatistics};
pub use dashboard::DashboardView;
pub use server::{run_server, RequestsLoggingLevel};
pub use video_metrics::VideoMetrics;
