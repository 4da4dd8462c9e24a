//! Lexicon sentiment labelling
//!
//! A post is negative when it contains more negative lexicon terms than
//! positive ones, positive in the opposite case, and neutral otherwise.
//! Terms match as lowercase substrings, so "attacker" counts for "attack".

use crate::models::{Document, Sentiment};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NEGATIVE_TERMS: &[&str] = &[
    "attack",
    "malicious",
    "hack",
    "breach",
    "vulnerable",
    "threat",
    "risk",
    "danger",
    "compromised",
    "exploit",
    "malware",
    "worm",
];

pub const POSITIVE_TERMS: &[&str] = &[
    "safe", "secure", "protect", "fix", "patch", "solution", "resolved", "update", "defend",
];

/// Label one post; absent text is neutral
pub fn classify_sentiment(text: Option<&str>) -> Sentiment {
    let Some(text) = text else {
        return Sentiment::Neutral;
    };
    let text = text.to_lowercase();
    let negative = NEGATIVE_TERMS.iter().filter(|t| text.contains(*t)).count();
    let positive = POSITIVE_TERMS.iter().filter(|t| text.contains(*t)).count();

    match negative.cmp(&positive) {
        std::cmp::Ordering::Greater => Sentiment::Negative,
        std::cmp::Ordering::Less => Sentiment::Positive,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Label counts with percentages of the whole collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub total: usize,
    pub counts: BTreeMap<Sentiment, usize>,
}

impl SentimentDistribution {
    /// Count for a label, zero if never seen
    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.counts.get(&sentiment).copied().unwrap_or(0)
    }

    /// Percentage for a label; zero for an empty collection
    pub fn percentage(&self, sentiment: Sentiment) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(sentiment) as f64 / self.total as f64 * 100.0
        }
    }

    /// Most frequent label; ties go to the earlier label in display order
    pub fn dominant(&self) -> Option<Sentiment> {
        Sentiment::all()
            .into_iter()
            .filter(|s| self.count(*s) > 0)
            .fold(None, |best: Option<Sentiment>, s| match best {
                Some(b) if self.count(b) >= self.count(s) => Some(b),
                _ => Some(s),
            })
    }
}

/// Label every document and count the labels
pub fn sentiment_distribution<'a, I>(documents: I) -> SentimentDistribution
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut counts = BTreeMap::new();
    let mut total = 0;
    for document in documents {
        *counts.entry(classify_sentiment(document.text())).or_insert(0) += 1;
        total += 1;
    }
    SentimentDistribution { total, counts }
}

/// Label counts per UTC day
pub fn daily_sentiment<'a, I>(documents: I) -> BTreeMap<NaiveDate, BTreeMap<Sentiment, usize>>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut daily: BTreeMap<NaiveDate, BTreeMap<Sentiment, usize>> = BTreeMap::new();
    for document in documents {
        *daily
            .entry(document.date())
            .or_default()
            .entry(classify_sentiment(document.text()))
            .or_insert(0) += 1;
    }
    daily
}
