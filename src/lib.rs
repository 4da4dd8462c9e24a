//! tweetlens - Keyword analysis for social media post collections
//!
//! Turns a CSV export of posts into keyword rankings, keyword co-occurrence
//! pairs and per-day keyword rankings for a dashboard, along with post
//! volume, engagement and hashtag figures.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`dataset`] - CSV loading and date-range filtering
//! - [`models`] - Core data structures and types
//! - [`analytics`] - Tokenizer, rankings, co-occurrence, trends, volume and engagement
//! - [`cache`] - Memoization of analysis results
//! - [`report`] - Analysis session combining the above
//!
//! # Example
//!
//! ```no_run
//! use tweetlens::config::Config;
//! use tweetlens::dataset::load_csv;
//! use tweetlens::report::Analyzer;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let range = config.date_range()?;
//!     let documents = range.filter(load_csv(&config.dataset.path)?);
//!     let mut analyzer = Analyzer::new(documents, config.analysis).with_period(range);
//!     let top = analyzer.top_keywords(20)?;
//!     println!("{top:?}");
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod report;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{
        daily_top_keywords, keyword_cooccurrence, rank_keywords, tokenize, Tokenizer,
    };
    pub use crate::config::Config;
    pub use crate::dataset::{load_csv, DateRange};
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{CooccurrencePair, DailyKeywordSet, Document, KeywordCount};
    pub use crate::report::Analyzer;
}

// Direct re-exports for convenience
pub use models::{CooccurrencePair, DailyKeywordSet, Document, KeywordCount};
