//! Keyword frequencies for the bar chart and word cloud.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::analysis::KeywordCount;

/// Bars shown in the keyword chart.
pub const TOP_KEYWORDS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordBar {
    pub keyword: String,
    pub count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordRanking {
    /// Highest counts first; ties keep the service's order.
    pub top: Vec<KeywordBar>,
    /// Every keyword, for a client-side word cloud. Repeated keywords keep the last count.
    pub frequencies: BTreeMap<String, f64>,
}

impl KeywordRanking {
    pub fn from_pairs(pairs: &[KeywordCount]) -> Self {
        let frequencies = pairs
            .iter()
            .map(|KeywordCount(keyword, count)| (keyword.clone(), *count))
            .collect();

        let mut bars: Vec<KeywordBar> = pairs
            .iter()
            .map(|KeywordCount(keyword, count)| KeywordBar {
                keyword: keyword.clone(),
                count: *count,
            })
            .collect();
        bars.sort_by(|a, b| b.count.total_cmp(&a.count));
        bars.truncate(TOP_KEYWORDS);

        Self {
            top: bars,
            frequencies,
        }
    }
}
