use serde_json::{json, Value};

pub const TRENDING_VIDEO_ID: &str = "dQw4w9WgXcQ";
pub const SEARCH_VIDEO_ID: &str = "9bZkp7q19f0";

/// A strategy payload shaped like the analysis service's real answers.
pub fn sample_strategy() -> Value {
    json!({
        "target_audience": "Young professionals who cook on weeknights",
        "overall_goal": "Reach 10K subscribers with short recipe videos",
        "trend_analysis": {
            "current_trends": "One-pan recipes under 15 minutes",
            "future_predictions": ["High-protein meal prep", "Budget cooking"]
        },
        "content_recommendations": {
            "content_types": ["Recipe shorts", "Kitchen hacks"],
            "visual_style": "Top-down, bright natural light",
            "audio_music": null
        },
        "marketing_tactics": {
            "recommended_tags_and_keywords": [
                ["recipe", 12], ["quick dinner", 30], ["pasta", 12], ["easy", 7]
            ],
            "best_posting_times_and_frequency": "Weekdays at 6pm"
        },
        "success_metrics": {
            "growth_opportunities": "Collaborations with fitness creators"
        },
        "videos": {
            "analyzed_videos": [
                {
                    "video_id": TRENDING_VIDEO_ID,
                    "title": "15 minute garlic pasta",
                    "video_url": format!("https://www.youtube.com/watch?v={}", TRENDING_VIDEO_ID),
                    "description": "The fastest weeknight dinner.",
                    "statistics": {
                        "views": 500000, "likes": 25000, "comments": 5000,
                        "subscribers": 0, "video_age_days": 20,
                        "views_per_day": 0, "engagement_rate": 8
                    },
                    "analysis": "Strong hook in the first second",
                    "current_trends": "Speed cooking",
                    "future_trends": "Meal prep"
                },
                {
                    "video_id": SEARCH_VIDEO_ID,
                    "title": "Pasta without a recipe",
                    "statistics": {
                        "views": 1000, "likes": 50, "comments": 10,
                        "subscribers": null, "video_age_days": null,
                        "engagement_rate": 0
                    },
                    "future_trends": "Dropped because current trends are missing"
                }
            ],
            "top_matches": {
                "trending": [{ "video_id": "t1", "title": "Trending one" }],
                "search": []
            }
        }
    })
}
