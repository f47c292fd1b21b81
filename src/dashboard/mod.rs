//! Assembles the dashboard view of a strategy payload.
//!
//! The view is plain data: overview texts, keyword ranking, one entry per
//! analyzed video with its derived metrics, the strategy recommendations
//! and the top-match video cards. Rendering is left to the client.

mod keywords;

pub use keywords::{KeywordBar, KeywordRanking, TOP_KEYWORDS};

use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use crate::analysis::{
    display_text, ContentRecommendations, MarketingTactics, StrategyPayload, SuccessMetrics,
    VideoRecord,
};
use crate::video_metrics::format::{
    description_excerpt, format_count, thumbnail_url, EngagementTier,
};
use crate::video_metrics::{EngagementSource, VideoMetrics};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub overview: Overview,
    pub analyzed_videos: Vec<AnalyzedVideoView>,
    pub strategy: StrategyView,
    pub top_matches: TopMatchesView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub target_audience: String,
    pub overall_goal: String,
    pub current_trends: String,
    pub future_predictions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<KeywordRanking>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoCard {
    pub video_id: String,
    pub title: String,
    pub url: Option<String>,
    pub thumbnail_url: String,
    pub description_excerpt: Option<String>,
    pub views: Option<String>,
    pub likes: Option<String>,
    pub comments: Option<String>,
}

impl VideoCard {
    pub fn from_record(record: &VideoRecord) -> Self {
        let stats = record.statistics.as_ref();
        Self {
            video_id: record.video_id.clone(),
            title: record.title.clone(),
            url: record.video_url.clone(),
            thumbnail_url: thumbnail_url(&record.video_id),
            description_excerpt: record.description.as_deref().and_then(description_excerpt),
            views: stats.map(|s| format_count(s.views)),
            likes: stats.map(|s| format_count(s.likes)),
            comments: stats.map(|s| format_count(s.comments)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisKind {
    Trending,
    Search,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedVideoView {
    pub position: usize,
    pub kind: AnalysisKind,
    pub card: VideoCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_trends: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub future_trends: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_tier: Option<EngagementTier>,
    /// Absent for videos the service sent without statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<VideoMetrics>,
}

impl AnalyzedVideoView {
    fn build<R: Rng + ?Sized>(position: usize, record: &VideoRecord, rng: &mut R) -> Self {
        let metrics = record
            .statistics
            .as_ref()
            .map(|stats| VideoMetrics::derive(stats, rng));

        let engagement_tier = metrics.as_ref().map(|m| {
            let fraction = match m.engagement.source {
                EngagementSource::Reported => m.engagement.value / 100.0,
                EngagementSource::Computed => m.engagement.value,
            };
            EngagementTier::from_rate(fraction)
        });

        let current_trends = record.current_trends.as_ref().map(text);
        let future_trends = current_trends
            .as_ref()
            .and(record.future_trends.as_ref())
            .map(text);

        Self {
            position: position + 1,
            kind: if position == 0 {
                AnalysisKind::Trending
            } else {
                AnalysisKind::Search
            },
            card: VideoCard::from_record(record),
            analysis: record.analysis.as_ref().map(text),
            current_trends,
            future_trends,
            engagement_tier,
            metrics,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StrategyView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_recommendations: Option<ContentRecommendationsView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_tactics: Option<MarketingTacticsView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_metrics: Option<SuccessMetricsView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecommendationsView {
    pub content_types: Vec<String>,
    pub visual_style: String,
    pub audio_music: String,
    pub storytelling_approach: String,
    pub editing_style_and_pacing: String,
}

impl From<&ContentRecommendations> for ContentRecommendationsView {
    fn from(recs: &ContentRecommendations) -> Self {
        Self {
            content_types: recs.content_types.iter().map(text).collect(),
            visual_style: display_text(recs.visual_style.as_ref()),
            audio_music: display_text(recs.audio_music.as_ref()),
            storytelling_approach: display_text(recs.storytelling_approach.as_ref()),
            editing_style_and_pacing: display_text(recs.editing_style_and_pacing.as_ref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketingTacticsView {
    pub title_and_description_optimization: String,
    pub thumbnail_design_recommendations: String,
    pub best_posting_times_and_frequency: String,
    pub audience_engagement_strategies: String,
}

impl From<&MarketingTactics> for MarketingTacticsView {
    fn from(tactics: &MarketingTactics) -> Self {
        Self {
            title_and_description_optimization: display_text(
                tactics.title_and_description_optimization.as_ref(),
            ),
            thumbnail_design_recommendations: display_text(
                tactics.thumbnail_design_recommendations.as_ref(),
            ),
            best_posting_times_and_frequency: display_text(
                tactics.best_posting_times_and_frequency.as_ref(),
            ),
            audience_engagement_strategies: display_text(
                tactics.audience_engagement_strategies.as_ref(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessMetricsView {
    pub how_to_measure_effectiveness: String,
    pub expected_engagement_patterns: String,
    pub growth_opportunities: String,
}

impl From<&SuccessMetrics> for SuccessMetricsView {
    fn from(metrics: &SuccessMetrics) -> Self {
        Self {
            how_to_measure_effectiveness: display_text(
                metrics.how_to_measure_effectiveness.as_ref(),
            ),
            expected_engagement_patterns: display_text(
                metrics.expected_engagement_patterns.as_ref(),
            ),
            growth_opportunities: display_text(metrics.growth_opportunities.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopMatchesView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trending: Option<Vec<VideoCard>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<Vec<VideoCard>>,
}

impl DashboardView {
    pub fn build<R: Rng + ?Sized>(payload: &StrategyPayload, rng: &mut R) -> Self {
        let trend_analysis = payload.trend_analysis.as_ref();
        let keywords = payload
            .marketing_tactics
            .as_ref()
            .and_then(|t| t.recommended_tags_and_keywords.as_deref())
            .map(KeywordRanking::from_pairs);

        let overview = Overview {
            target_audience: display_text(payload.target_audience.as_ref()),
            overall_goal: display_text(payload.overall_goal.as_ref()),
            current_trends: display_text(trend_analysis.and_then(|t| t.current_trends.as_ref())),
            future_predictions: display_text(
                trend_analysis.and_then(|t| t.future_predictions.as_ref()),
            ),
            keywords,
        };

        let analyzed_videos = payload
            .analyzed_videos()
            .iter()
            .enumerate()
            .map(|(position, record)| AnalyzedVideoView::build(position, record, rng))
            .collect();

        let strategy = StrategyView {
            content_recommendations: payload.content_recommendations.as_ref().map(Into::into),
            marketing_tactics: payload.marketing_tactics.as_ref().map(Into::into),
            success_metrics: payload.success_metrics.as_ref().map(Into::into),
        };

        let top_matches = payload
            .videos
            .as_ref()
            .and_then(|v| v.top_matches.as_ref())
            .map(|matches| TopMatchesView {
                trending: matches.trending.as_deref().map(cards),
                search: matches.search.as_deref().map(cards),
            })
            .unwrap_or_default();

        Self {
            overview,
            analyzed_videos,
            strategy,
            top_matches,
        }
    }
}

fn cards(records: &[VideoRecord]) -> Vec<VideoCard> {
    records.iter().map(VideoCard::from_record).collect()
}

fn text(value: &Value) -> String {
    display_text(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::NOT_SPECIFIED;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn payload(value: Value) -> StrategyPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_payload_uses_defaults() {
        let view = DashboardView::build(&StrategyPayload::default(), &mut StdRng::seed_from_u64(0));

        assert_eq!(view.overview.target_audience, NOT_SPECIFIED);
        assert_eq!(view.overview.overall_goal, NOT_SPECIFIED);
        assert_eq!(view.overview.current_trends, NOT_SPECIFIED);
        assert_eq!(view.overview.future_predictions, NOT_SPECIFIED);
        assert!(view.overview.keywords.is_none());
        assert!(view.analyzed_videos.is_empty());
        assert_eq!(view.strategy, StrategyView::default());
        assert_eq!(view.top_matches, TopMatchesView::default());
    }

    #[test]
    fn analyzed_videos_get_metrics_only_with_statistics() {
        let payload = payload(json!({
            "videos": {
                "analyzed_videos": [
                    {
                        "video_id": "abc",
                        "title": "First",
                        "video_url": "https://youtube.com/watch?v=abc",
                        "statistics": {
                            "views": 1000, "likes": 50, "comments": 10,
                            "subscribers": 0, "video_age_days": 4, "engagement_rate": 0
                        },
                        "future_trends": "ignored without current trends"
                    },
                    { "video_id": "def", "title": "Second", "current_trends": "Shorts", "future_trends": "Longer shorts" }
                ]
            }
        }));
        let view = DashboardView::build(&payload, &mut StdRng::seed_from_u64(3));

        let first = &view.analyzed_videos[0];
        assert_eq!(first.position, 1);
        assert_eq!(first.kind, AnalysisKind::Trending);
        assert_eq!(first.card.views.as_deref(), Some("1.0K"));
        assert_eq!(first.card.thumbnail_url, "https://i.ytimg.com/vi/abc/hqdefault.jpg");
        assert!(first.future_trends.is_none());
        let metrics = first.metrics.as_ref().unwrap();
        assert_eq!(metrics.growth.views_per_day, 250.0);
        // computed fallback 0.03 → average tier
        assert_eq!(first.engagement_tier, Some(EngagementTier::Average));

        let second = &view.analyzed_videos[1];
        assert_eq!(second.kind, AnalysisKind::Search);
        assert!(second.metrics.is_none());
        assert!(second.engagement_tier.is_none());
        assert!(second.card.views.is_none());
        assert_eq!(second.current_trends.as_deref(), Some("Shorts"));
        assert_eq!(second.future_trends.as_deref(), Some("Longer shorts"));
    }

    #[test]
    fn reported_engagement_is_tiered_as_percentage() {
        let payload = payload(json!({
            "videos": { "analyzed_videos": [
                { "video_id": "x", "statistics": { "views": 100, "engagement_rate": 12.0 } }
            ] }
        }));
        let view = DashboardView::build(&payload, &mut StdRng::seed_from_u64(3));
        assert_eq!(
            view.analyzed_videos[0].engagement_tier,
            Some(EngagementTier::Excellent)
        );
    }

    #[test]
    fn strategy_sections_present_only_when_sent() {
        let payload = payload(json!({
            "target_audience": "Indie devs",
            "trend_analysis": { "current_trends": "Agents" },
            "content_recommendations": {
                "content_types": ["Tutorials", "Live coding"],
                "visual_style": "Minimal"
            },
            "marketing_tactics": {
                "recommended_tags_and_keywords": [["rust", 4], ["ai", 9]],
                "thumbnail_design_recommendations": "Bold text"
            }
        }));
        let view = DashboardView::build(&payload, &mut StdRng::seed_from_u64(0));

        assert_eq!(view.overview.target_audience, "Indie devs");
        assert_eq!(view.overview.current_trends, "Agents");
        assert_eq!(view.overview.future_predictions, NOT_SPECIFIED);
        assert_eq!(view.overview.keywords.as_ref().unwrap().top[0].keyword, "ai");

        let recs = view.strategy.content_recommendations.unwrap();
        assert_eq!(recs.content_types, vec!["Tutorials", "Live coding"]);
        assert_eq!(recs.visual_style, "Minimal");
        assert_eq!(recs.audio_music, NOT_SPECIFIED);

        let tactics = view.strategy.marketing_tactics.unwrap();
        assert_eq!(tactics.thumbnail_design_recommendations, "Bold text");
        assert_eq!(tactics.best_posting_times_and_frequency, NOT_SPECIFIED);

        assert!(view.strategy.success_metrics.is_none());
    }

    #[test]
    fn top_matches_become_cards() {
        let payload = payload(json!({
            "videos": { "top_matches": {
                "trending": [{ "video_id": "t1", "title": "Trend", "description": "" }],
                "search": [{ "video_id": "s1", "title": "Search", "description": "Found it" }]
            } }
        }));
        let view = DashboardView::build(&payload, &mut StdRng::seed_from_u64(0));

        let trending = view.top_matches.trending.unwrap();
        assert_eq!(trending[0].video_id, "t1");
        assert!(trending[0].description_excerpt.is_none());
        let search = view.top_matches.search.unwrap();
        assert_eq!(search[0].description_excerpt.as_deref(), Some("Found it"));
    }
}
