// Core data structures for tweetlens

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One social-media post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub text: Option<String>, // Absent when the source cell is empty
    pub timestamp: DateTime<Utc>,
    pub username: Option<String>,
    pub favorite_count: u64,
    pub retweet_count: u64,
}

impl Document {
    /// Create a document with only text and timestamp set
    pub fn new(text: Option<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            text,
            timestamp,
            username: None,
            favorite_count: 0,
            retweet_count: 0,
        }
    }

    /// Shorthand for a document with present text
    pub fn with_text(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(Some(text.into()), timestamp)
    }

    /// Text as a borrowed optional
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Calendar day of the post (UTC)
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Likes plus retweets
    pub fn engagement(&self) -> u64 {
        self.favorite_count.saturating_add(self.retweet_count)
    }
}

/// A ranked keyword and how often it occurred
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct KeywordCount {
    pub word: String,
    pub count: u64,
}

impl KeywordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Two distinct keywords seen in the same document, and in how many documents
///
/// `first < second` always holds, so (A, B) and (B, A) are the same pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CooccurrencePair {
    pub first: String,
    pub second: String,
    pub count: u64,
}

impl CooccurrencePair {
    /// Build a pair, sorting the two words
    pub fn new(a: impl Into<String>, b: impl Into<String>, count: u64) -> Self {
        let (a, b) = (a.into(), b.into());
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first,
            second,
            count,
        }
    }

    /// Whether this pair joins `a` and `b`, in either order
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }

    /// "first + second" label
    pub fn label(&self) -> String {
        format!("{} + {}", self.first, self.second)
    }
}

/// Per-day keyword rankings, ordered by date
pub type DailyKeywordSet = BTreeMap<NaiveDate, Vec<KeywordCount>>;

/// Lexicon sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Get all labels in display order
    pub fn all() -> [Self; 3] {
        [Self::Positive, Self::Neutral, Self::Negative]
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
