//! Descriptive statistics over a keyword ranking

use crate::models::{Document, KeywordCount};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::HashSet;

/// Number of leading keywords used for the concentration figure
pub const CONCENTRATION_TOP: usize = 5;

/// A ranked keyword with its share of the ranking's total frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordShare {
    pub word: String,
    pub count: u64,

    /// Percentage of the summed counts, rounded to two decimals
    pub percentage: f64,
}

/// Summary figures for a keyword ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSummary {
    /// Distinct lowercase whitespace-separated words over all present texts
    pub unique_words: usize,
    pub total_frequency: u64,
    pub average_frequency: f64,

    /// Summed share of the first five keywords
    pub top_concentration: f64,

    /// `1 - sample_std / mean` of the ranked counts
    pub diversity_index: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage share of each keyword within the ranking
pub fn keyword_shares(keywords: &[KeywordCount]) -> Vec<KeywordShare> {
    let total: u64 = keywords.iter().map(|k| k.count).sum();
    keywords
        .iter()
        .map(|k| KeywordShare {
            word: k.word.clone(),
            count: k.count,
            percentage: if total == 0 {
                0.0
            } else {
                round2(k.count as f64 / total as f64 * 100.0)
            },
        })
        .collect()
}

/// Count distinct raw words, split on whitespace after lowercasing
///
/// Unlike keyword tokenization nothing is stripped here; this is the
/// vocabulary size of the corpus as written.
pub fn unique_word_count<'a, I>(documents: I) -> usize
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut seen: HashSet<String> = HashSet::new();
    for text in documents.into_iter().filter_map(Document::text) {
        seen.extend(text.to_lowercase().split_whitespace().map(str::to_string));
    }
    seen.len()
}

/// Summarize a keyword ranking against the corpus it came from
pub fn summarize<'a, I>(documents: I, keywords: &[KeywordCount]) -> KeywordSummary
where
    I: IntoIterator<Item = &'a Document>,
{
    let shares = keyword_shares(keywords);
    let counts: Vec<f64> = keywords.iter().map(|k| k.count as f64).collect();

    let average_frequency = if counts.is_empty() {
        0.0
    } else {
        counts.iter().mean()
    };
    let diversity_index = if counts.len() < 2 || average_frequency <= 0.0 {
        0.0
    } else {
        1.0 - counts.iter().std_dev() / average_frequency
    };

    KeywordSummary {
        unique_words: unique_word_count(documents),
        total_frequency: keywords.iter().map(|k| k.count).sum(),
        average_frequency,
        top_concentration: shares
            .iter()
            .take(CONCENTRATION_TOP)
            .map(|s| s.percentage)
            .sum(),
        diversity_index,
    }
}
