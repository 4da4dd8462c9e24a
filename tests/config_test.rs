//! Tests for config module

use chrono::NaiveDate;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tweetlens::config::Config;

#[test]
fn test_config_file_exists() {
    let config_path = Path::new("config.toml");
    assert!(
        config_path.exists(),
        "config.toml should exist in project root"
    );
}

#[test]
fn test_shipped_config_matches_defaults() {
    let config = Config::from_file(Path::new("config.toml")).expect("config.toml should parse");
    assert_eq!(config, Config::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file_overrides() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[dataset]
path = "posts.csv"
start_date = "2025-09-08"
end_date = "2025-09-14"

[analysis]
daily_top = 3
extra_stopwords = ["rt"]

[logging]
format = "json"
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.dataset.path, PathBuf::from("posts.csv"));
    assert_eq!(config.analysis.daily_top, 3);
    assert_eq!(config.analysis.top_keywords, 20);
    assert_eq!(config.logging.format, "json");
    assert!(config.validate().is_ok());

    let range = config.date_range().unwrap();
    assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 9, 8).unwrap());
    assert_eq!(range.days(), 7);
}

#[test]
fn test_invalid_file_reports_path() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[analysis]\ntop_keywords = \"many\"\n").unwrap();

    let err = Config::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML config file"));
}

#[test]
fn test_invalid_values_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[analysis]\nspike_threshold = -1.0\n").unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.logging.format = "xml".to_string();
    assert!(config.validate().is_err());
}

// The only test in this binary that touches TWEETLENS_* variables
#[test]
fn test_env_overrides() {
    std::env::set_var("TWEETLENS_TOP_KEYWORDS", "7");
    std::env::set_var("TWEETLENS_EXTRA_STOPWORDS", "rt, amp ,");
    std::env::set_var("TWEETLENS_DAILY_TOP", "not a number");

    let config = Config::from_env().unwrap();
    assert_eq!(config.analysis.top_keywords, 7);
    assert_eq!(config.analysis.extra_stopwords, vec!["rt", "amp"]);
    assert_eq!(config.analysis.daily_top, 5);

    std::env::remove_var("TWEETLENS_TOP_KEYWORDS");
    std::env::remove_var("TWEETLENS_EXTRA_STOPWORDS");
    std::env::remove_var("TWEETLENS_DAILY_TOP");
}
