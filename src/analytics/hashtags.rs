//! Hashtag extraction and ranking
//!
//! A hashtag is `#` followed by one or more word characters. Tags are
//! lowercased before counting, so `#NPM` and `#npm` are the same tag.

use super::counter::OrderedCounter;
use super::{ensure_top_n, AnalysisResult};
use crate::models::{Document, KeywordCount};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Leading tags summed for the concentration figure
pub const HASHTAG_CONCENTRATION_TOP: usize = 10;

fn hashtag_regex() -> &'static Regex {
    static HASHTAG_RE: OnceLock<Regex> = OnceLock::new();
    HASHTAG_RE.get_or_init(|| Regex::new(r"#(\w+)").expect("Invalid regex pattern"))
}

/// Lowercased tags in `text`, without the leading `#`
pub fn extract_hashtags(text: &str) -> impl Iterator<Item = String> + '_ {
    hashtag_regex()
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// Ranked hashtags with usage figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashtagRanking {
    pub tags: Vec<KeywordCount>,

    /// Distinct tags over the whole collection
    pub distinct: usize,

    /// Every tag occurrence, ranked or not
    pub total_uses: u64,

    /// Percentage of the ranked uses held by the first ten tags
    pub top10_share: f64,
}

impl HashtagRanking {
    /// Uses of the first `n` ranked tags
    pub fn leading_uses(&self, n: usize) -> u64 {
        self.tags.iter().take(n).map(|t| t.count).sum()
    }
}

/// Rank the `top_n` most used hashtags
///
/// Equal counts keep first-seen order, as keyword rankings do.
pub fn rank_hashtags<'a, I>(documents: I, top_n: usize) -> AnalysisResult<HashtagRanking>
where
    I: IntoIterator<Item = &'a Document>,
{
    ensure_top_n(top_n)?;

    let counter: OrderedCounter<String> = documents
        .into_iter()
        .filter_map(Document::text)
        .flat_map(extract_hashtags)
        .collect();
    let distinct = counter.len();
    let total_uses = counter.total();

    let tags: Vec<KeywordCount> = counter
        .most_common(top_n)
        .into_iter()
        .map(|(tag, count)| KeywordCount::new(tag, count))
        .collect();
    let ranked: u64 = tags.iter().map(|t| t.count).sum();
    let leading: u64 = tags
        .iter()
        .take(HASHTAG_CONCENTRATION_TOP)
        .map(|t| t.count)
        .sum();
    let top10_share = if ranked == 0 {
        0.0
    } else {
        leading as f64 / ranked as f64 * 100.0
    };

    tracing::debug!(distinct, total_uses, top_n, "Ranked hashtags");
    Ok(HashtagRanking {
        tags,
        distinct,
        total_uses,
        top10_share,
    })
}
