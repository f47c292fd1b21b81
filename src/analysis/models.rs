//! Request and response types of the external analysis service.
//!
//! Only the fields the dashboard reads are typed; anything else the service
//! sends is kept in `extra` maps so it survives a round trip through the
//! session store untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Request
// =============================================================================

/// Regions the analysis service accepts.
pub const REGION_CODES: [&str; 11] = [
    "US", "IN", "GB", "CA", "AU", "DE", "FR", "JP", "KR", "BR", "RU",
];

pub const DEFAULT_REGION_CODE: &str = "IN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Shorts,
    Videos,
    #[default]
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub prompt: String,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default = "default_region_code")]
    pub region_code: String,
}

fn default_region_code() -> String {
    DEFAULT_REGION_CODE.to_string()
}

impl AnalyzeRequest {
    pub fn new(prompt: impl Into<String>, content_type: ContentType, region_code: &str) -> Self {
        Self {
            prompt: prompt.into(),
            content_type,
            region_code: region_code.to_string(),
        }
    }

    /// Checks the request before it is sent; returns a message for the caller on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("Prompt must not be empty".to_string());
        }
        if !REGION_CODES.contains(&self.region_code.as_str()) {
            return Err(format!("Unsupported region code: {}", self.region_code));
        }
        Ok(())
    }
}

// =============================================================================
// Response envelope
// =============================================================================

/// Successful response: `{"data": {"marketing_strategy": ...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeEnvelope {
    pub data: AnalyzeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeData {
    pub marketing_strategy: StrategyPayload,
}

/// Failure response: `{"message": ...}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Strategy payload
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_goal: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_analysis: Option<TrendAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_recommendations: Option<ContentRecommendations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_tactics: Option<MarketingTactics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_metrics: Option<SuccessMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<VideoCollections>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StrategyPayload {
    pub fn analyzed_videos(&self) -> &[VideoRecord] {
        self.videos
            .as_ref()
            .and_then(|v| v.analyzed_videos.as_deref())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_trends: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_predictions: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRecommendations {
    #[serde(default)]
    pub content_types: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_style: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_music: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storytelling_approach: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editing_style_and_pacing: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketingTactics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_tags_and_keywords: Option<Vec<KeywordCount>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_and_description_optimization: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_design_recommendations: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_posting_times_and_frequency: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience_engagement_strategies: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_to_measure_effectiveness: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_engagement_patterns: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_opportunities: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A `[keyword, weight]` pair. Weights are counts or fractional relevance scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCount(pub String, pub f64);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoCollections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_videos: Option<Vec<VideoRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_matches: Option<TopMatches>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopMatches {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trending: Option<Vec<VideoRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<Vec<VideoRecord>>,
}

// =============================================================================
// Videos
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Videos without statistics get a card but no charts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<VideoStatistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_trends: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_trends: Option<Value>,
}

/// Raw per-video counters.
///
/// Absent or `null` counters read as 0. A zero `subscribers`,
/// `views_per_day` or `engagement_rate` means "not reported"; each derivation
/// documents the value it substitutes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoStatistics {
    #[serde(default, deserialize_with = "nullable_count")]
    pub views: u64,
    #[serde(default, deserialize_with = "nullable_count")]
    pub likes: u64,
    #[serde(default, deserialize_with = "nullable_count")]
    pub comments: u64,
    #[serde(default, deserialize_with = "nullable_count")]
    pub subscribers: u64,
    #[serde(default, deserialize_with = "nullable_count")]
    pub video_age_days: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views_per_day: Option<f64>,
    #[serde(default, deserialize_with = "nullable_rate")]
    pub engagement_rate: f64,
}

fn nullable_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_rate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Renders a free-form payload field as display text.
///
/// The service usually sends strings but occasionally lists or objects;
/// those are shown as compact JSON. Missing, `null` and empty values read as
/// "Not specified".
pub fn display_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_SPECIFIED.to_string(),
        Some(Value::String(s)) if s.is_empty() => NOT_SPECIFIED.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub const NOT_SPECIFIED: &str = "Not specified";
