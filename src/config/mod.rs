//! Configuration management for tweetlens
//!
//! This module handles loading and validating configuration from environment variables,
//! TOML files, and command-line overrides.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dataset::DateRange;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset location and period
    pub dataset: DatasetConfig,

    /// Ranking sizes and tokenizer settings
    pub analysis: AnalysisConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Dataset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// CSV file path
    pub path: PathBuf,

    /// First day kept (inclusive)
    pub start_date: NaiveDate,

    /// Last day kept (inclusive)
    pub end_date: NaiveDate,
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Size of the global keyword ranking
    pub top_keywords: usize,

    /// Number of co-occurrence pairs reported
    pub cooccurrence_top: usize,

    /// Size of each per-day ranking
    pub daily_top: usize,

    /// Leading global keywords followed over time
    pub trend_keywords: usize,

    /// Leading pairs used to build the co-occurrence matrix
    pub matrix_pairs: usize,

    /// Moving average window for trends, in days
    pub trend_window: usize,

    /// Spike threshold as a multiple of the moving average
    pub spike_threshold: f64,

    /// Size of the hashtag ranking
    pub hashtag_top: usize,

    /// Most engaged posts listed
    pub top_posts: usize,

    /// Stopwords added to the built-in list
    pub extra_stopwords: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap_or_default()
}

fn default_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 30).unwrap_or_default()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("dataset.csv"),
            start_date: default_start(),
            end_date: default_end(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_keywords: 20,
            cooccurrence_top: 15,
            daily_top: 5,
            trend_keywords: 5,
            matrix_pairs: 10,
            trend_window: crate::analytics::DEFAULT_WINDOW,
            spike_threshold: 2.0,
            hashtag_top: 15,
            top_posts: 10,
            extra_stopwords: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Override fields from `TWEETLENS_*` environment variables
    pub fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("TWEETLENS_DATASET") {
            self.dataset.path = PathBuf::from(path);
        }
        if let Some(start) = env_parse("TWEETLENS_START_DATE") {
            self.dataset.start_date = start;
        }
        if let Some(end) = env_parse("TWEETLENS_END_DATE") {
            self.dataset.end_date = end;
        }
        if let Some(n) = env_parse("TWEETLENS_TOP_KEYWORDS") {
            self.analysis.top_keywords = n;
        }
        if let Some(n) = env_parse("TWEETLENS_COOCCURRENCE_TOP") {
            self.analysis.cooccurrence_top = n;
        }
        if let Some(n) = env_parse("TWEETLENS_DAILY_TOP") {
            self.analysis.daily_top = n;
        }
        if let Some(n) = env_parse("TWEETLENS_TREND_KEYWORDS") {
            self.analysis.trend_keywords = n;
        }
        if let Some(n) = env_parse("TWEETLENS_HASHTAG_TOP") {
            self.analysis.hashtag_top = n;
        }
        if let Some(n) = env_parse("TWEETLENS_TOP_POSTS") {
            self.analysis.top_posts = n;
        }
        if let Ok(words) = std::env::var("TWEETLENS_EXTRA_STOPWORDS") {
            self.analysis.extra_stopwords = words
                .split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Ok(level) = std::env::var("TWEETLENS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TWEETLENS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("top_keywords", self.analysis.top_keywords),
            ("cooccurrence_top", self.analysis.cooccurrence_top),
            ("daily_top", self.analysis.daily_top),
            ("trend_keywords", self.analysis.trend_keywords),
            ("matrix_pairs", self.analysis.matrix_pairs),
            ("trend_window", self.analysis.trend_window),
            ("hashtag_top", self.analysis.hashtag_top),
            ("top_posts", self.analysis.top_posts),
        ];
        for (name, value) in sizes {
            if value == 0 {
                anyhow::bail!("{name} must be greater than 0");
            }
        }

        if self.analysis.spike_threshold.is_nan() || self.analysis.spike_threshold <= 0.0 {
            anyhow::bail!("spike_threshold must be positive");
        }

        if self.dataset.start_date > self.dataset.end_date {
            anyhow::bail!(
                "start_date {} is after end_date {}",
                self.dataset.start_date,
                self.dataset.end_date
            );
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("log format must be text or json, got {}", self.logging.format);
        }

        Ok(())
    }

    /// Configured dataset period
    pub fn date_range(&self) -> Result<DateRange> {
        DateRange::new(self.dataset.start_date, self.dataset.end_date)
            .context("Invalid dataset date range")
    }
}
