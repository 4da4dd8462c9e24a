//! Keyword analysis engine and the descriptive analyses built around it
//!
//! Data flows one way: documents → tokens → global ranking → co-occurrence
//! pairs and per-day rankings. Volume, engagement and hashtag figures are
//! computed from the same documents. Every function here is a pure
//! computation over borrowed documents.

pub mod categories;
pub mod cooccurrence;
pub mod counter;
pub mod engagement;
pub mod frequency;
pub mod hashtags;
pub mod keyword_trends;
pub mod sentiment;
pub mod summary;
pub mod temporal;
pub mod tokenizer;
pub mod volume;

use thiserror::Error;

pub use categories::{categorize_keywords, CategorizedKeywords, KeywordCategory};
pub use cooccurrence::{
    keyword_cooccurrence, keyword_cooccurrence_with, tracked_set, CooccurrenceMatrix,
};
pub use counter::OrderedCounter;
pub use engagement::{
    daily_engagement, engagement_stats, top_engaged_posts, DailyEngagement, EngagedPost,
    EngagementStats,
};
pub use frequency::{rank_keywords, rank_keywords_with};
pub use hashtags::{extract_hashtags, rank_hashtags, HashtagRanking};
pub use keyword_trends::{
    KeywordTrend, Spike, TrendAnalyzer, TrendDirection, TrendError, TrendResult, DEFAULT_WINDOW,
};
pub use sentiment::{
    classify_sentiment, daily_sentiment, sentiment_distribution, SentimentDistribution,
};
pub use summary::{keyword_shares, summarize, KeywordShare, KeywordSummary};
pub use temporal::{
    daily_top_keywords, daily_top_keywords_with, fill_date_range, group_by_date, keyword_daily_counts,
    SeriesPoint,
};
pub use tokenizer::{tokenize, Tokenizer, STOPWORDS};
pub use volume::{
    daily_post_counts, post_volume, volume_trend, week_start, DailyVolume, PostVolume,
    WEEKDAY_NAMES,
};

/// Errors raised by the keyword engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for engine operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

pub(crate) fn ensure_top_n(top_n: usize) -> AnalysisResult<()> {
    if top_n == 0 {
        return Err(AnalysisError::InvalidArgument(
            "top_n must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
