//! Trend analysis over daily count series
//!
//! This module provides functionality for:
//! - Tracking a daily count series (a keyword's occurrences, or post volume)
//! - Calendar-day moving averages and spike detection
//! - Computing trend direction and velocity
//!
//! Windows are measured in calendar days. A day missing from a series
//! counts as zero.

use super::temporal::SeriesPoint;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Errors that can occur during keyword trend analysis
#[derive(Debug, Error, PartialEq)]
pub enum TrendError {
    #[error("Insufficient data points: need at least {0}, got {1}")]
    InsufficientData(usize, usize),

    #[error("Invalid window size: {0}")]
    InvalidWindowSize(usize),
}

/// Result type for trend analysis operations
pub type TrendResult<T> = Result<T, TrendError>;

/// Default moving average window, in days
pub const DEFAULT_WINDOW: usize = 7;

/// One day of a keyword's series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub count: u64,

    /// Min-max normalized count (0.0 to 1.0), set by [`KeywordTrend::normalize`]
    pub normalized: f64,
}

/// Trend direction indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Rising,
    SlightlyRising,
    Stable,
    SlightlyFalling,
    Falling,
}

impl TrendDirection {
    /// Classify a normalized velocity in `[-1.0, 1.0]`
    ///
    /// - `velocity > 0.3`: Rising
    /// - `0.1 < velocity <= 0.3`: SlightlyRising
    /// - `-0.1 <= velocity <= 0.1`: Stable
    /// - `-0.3 <= velocity < -0.1`: SlightlyFalling
    /// - `velocity < -0.3`: Falling
    #[must_use]
    pub fn from_velocity(velocity: f64) -> Self {
        if velocity > 0.3 {
            Self::Rising
        } else if velocity > 0.1 {
            Self::SlightlyRising
        } else if velocity >= -0.1 {
            Self::Stable
        } else if velocity >= -0.3 {
            Self::SlightlyFalling
        } else {
            Self::Falling
        }
    }
}

/// A day whose count stands well above its moving average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    pub date: NaiveDate,
    pub count: u64,

    /// Moving average at that day
    pub expected: f64,

    /// `count / expected`
    pub magnitude: f64,

    /// Z-score against the whole series
    pub z_score: f64,
}

/// Daily series of one keyword
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTrend {
    pub keyword: String,
    data: BTreeMap<NaiveDate, DataPoint>,
    window_size: usize,
}

impl KeywordTrend {
    /// Create an empty trend; `window_size` must be positive
    pub fn new(keyword: impl Into<String>, window_size: usize) -> TrendResult<Self> {
        if window_size == 0 {
            return Err(TrendError::InvalidWindowSize(window_size));
        }
        Ok(Self {
            keyword: keyword.into(),
            data: BTreeMap::new(),
            window_size,
        })
    }

    /// Set the count for a day, replacing any earlier value
    pub fn add_point(&mut self, date: NaiveDate, count: u64) {
        self.data.insert(
            date,
            DataPoint {
                date,
                count,
                normalized: 0.0,
            },
        );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Points in date order
    #[must_use]
    pub fn data_points(&self) -> Vec<&DataPoint> {
        self.data.values().collect()
    }

    /// Earliest day with a point
    fn first_date(&self) -> Option<NaiveDate> {
        self.data.keys().next().copied()
    }

    /// Latest day with a point
    fn last_date(&self) -> Option<NaiveDate> {
        self.data.keys().next_back().copied()
    }

    /// Count for every calendar day in `start..=end`; days without a point are zero
    fn daily_counts(&self, start: NaiveDate, end: NaiveDate) -> Vec<f64> {
        start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(|day| self.data.get(&day).map_or(0.0, |p| p.count as f64))
            .collect()
    }

    /// First day of the `days`-long calendar window ending at `date`, clipped to the series start
    fn window_start(&self, date: NaiveDate, days: usize) -> Option<NaiveDate> {
        let first = self.first_date()?;
        let start = date
            .checked_sub_days(Days::new(days.saturating_sub(1) as u64))
            .unwrap_or(first);
        Some(start.max(first))
    }

    /// Mean daily count over the `window_size` calendar days ending at `date`
    ///
    /// Days without a point count as zero. Near the start of the series the
    /// window shrinks to the days available.
    #[must_use]
    pub fn moving_average(&self, date: NaiveDate) -> Option<f64> {
        if !self.data.contains_key(&date) {
            return None;
        }
        let start = self.window_start(date, self.window_size)?;
        let window = self.daily_counts(start, date);
        Some(window.iter().sum::<f64>() / window.len() as f64)
    }

    /// Moving average at every point, in date order
    #[must_use]
    pub fn moving_averages(&self) -> Vec<(NaiveDate, f64)> {
        self.data
            .keys()
            .filter_map(|date| Some((*date, self.moving_average(*date)?)))
            .collect()
    }

    /// Days whose count is at least `threshold` times their moving average
    ///
    /// Needs a series spanning at least `window_size` days; shorter series
    /// report nothing.
    #[must_use]
    pub fn detect_spikes(&self, threshold: f64) -> Vec<Spike> {
        let (Some(first), Some(last)) = (self.first_date(), self.last_date()) else {
            return Vec::new();
        };
        let counts = self.daily_counts(first, last);
        if counts.len() < self.window_size {
            return Vec::new();
        }

        let mean = counts.iter().sum::<f64>() / counts.len() as f64;
        let variance =
            counts.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / counts.len() as f64;
        let std_dev = variance.sqrt();

        self.data
            .values()
            .filter_map(|point| {
                let expected = self.moving_average(point.date)?;
                if expected <= 0.0 {
                    return None;
                }
                let magnitude = point.count as f64 / expected;
                (magnitude >= threshold).then(|| Spike {
                    date: point.date,
                    count: point.count,
                    expected,
                    magnitude,
                    z_score: if std_dev > 0.0 {
                        (point.count as f64 - mean) / std_dev
                    } else {
                        0.0
                    },
                })
            })
            .collect()
    }

    /// Direction and velocity from a least-squares fit over the most recent days
    ///
    /// Velocity is the slope divided by the mean count, clamped to `[-1, 1]`.
    /// `recent_days` defaults to the window size; days without a point count
    /// as zero.
    pub fn trend_direction(
        &self,
        recent_days: Option<usize>,
    ) -> TrendResult<(TrendDirection, f64)> {
        let n = recent_days.unwrap_or(self.window_size);
        let recent = self
            .last_date()
            .filter(|_| n > 0)
            .and_then(|last| Some(self.daily_counts(self.window_start(last, n)?, last)))
            .unwrap_or_default();
        if recent.len() < 2 {
            return Err(TrendError::InsufficientData(2, recent.len()));
        }

        let n_f64 = recent.len() as f64;
        let sum_x: f64 = (0..recent.len()).map(|i| i as f64).sum();
        let sum_y: f64 = recent.iter().sum();
        let sum_xy: f64 = recent.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
        let sum_x2: f64 = (0..recent.len()).map(|i| (i * i) as f64).sum();

        let slope = (n_f64 * sum_xy - sum_x * sum_y) / (n_f64 * sum_x2 - sum_x * sum_x);
        let mean = sum_y / n_f64;
        let velocity = if mean > 0.0 {
            (slope / mean).clamp(-1.0, 1.0)
        } else {
            0.0
        };

        Ok((TrendDirection::from_velocity(velocity), velocity))
    }

    /// Min-max normalize every point; a flat series maps to 0.5
    pub fn normalize(&mut self) {
        let min = self.data.values().map(|p| p.count).min().unwrap_or(0);
        let max = self.data.values().map(|p| p.count).max().unwrap_or(0);
        let range = max - min;

        for point in self.data.values_mut() {
            point.normalized = if range == 0 {
                0.5
            } else {
                (point.count - min) as f64 / range as f64
            };
        }
    }
}

/// Trends for a set of tracked keywords
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalyzer {
    trends: HashMap<String, KeywordTrend>,
    window_size: usize,
}

impl TrendAnalyzer {
    pub fn new(window_size: usize) -> TrendResult<Self> {
        if window_size == 0 {
            return Err(TrendError::InvalidWindowSize(window_size));
        }
        Ok(Self {
            trends: HashMap::new(),
            window_size,
        })
    }

    /// Build trends from flattened keyword series
    pub fn from_series(points: &[SeriesPoint], window_size: usize) -> TrendResult<Self> {
        let mut analyzer = Self::new(window_size)?;
        for point in points {
            analyzer.add_observation(&point.word, point.date, point.count)?;
        }
        Ok(analyzer)
    }

    /// Record a keyword's count on a day
    pub fn add_observation(&mut self, keyword: &str, date: NaiveDate, count: u64) -> TrendResult<()> {
        if !self.trends.contains_key(keyword) {
            let trend = KeywordTrend::new(keyword, self.window_size)?;
            self.trends.insert(keyword.to_string(), trend);
        }
        if let Some(trend) = self.trends.get_mut(keyword) {
            trend.add_point(date, count);
        }
        Ok(())
    }

    #[must_use]
    pub fn get_trend(&self, keyword: &str) -> Option<&KeywordTrend> {
        self.trends.get(keyword)
    }

    /// Tracked keywords, sorted
    #[must_use]
    pub fn keywords(&self) -> Vec<&str> {
        let mut keywords: Vec<&str> = self.trends.keys().map(String::as_str).collect();
        keywords.sort_unstable();
        keywords
    }

    /// Keywords by descending velocity; series too short to fit are skipped
    #[must_use]
    pub fn top_trending(&self, limit: usize, recent_days: Option<usize>) -> Vec<(String, f64)> {
        let mut velocities: Vec<(String, f64)> = self
            .trends
            .iter()
            .filter_map(|(keyword, trend)| {
                trend
                    .trend_direction(recent_days)
                    .ok()
                    .map(|(_, velocity)| (keyword.clone(), velocity))
            })
            .collect();

        velocities.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        velocities.truncate(limit);
        velocities
    }

    /// Spikes per keyword, only for keywords that have any
    #[must_use]
    pub fn find_spikes(&self, threshold: f64) -> BTreeMap<String, Vec<Spike>> {
        self.trends
            .iter()
            .filter_map(|(keyword, trend)| {
                let spikes = trend.detect_spikes(threshold);
                (!spikes.is_empty()).then(|| (keyword.clone(), spikes))
            })
            .collect()
    }
}
