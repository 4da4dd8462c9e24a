//! Post volume over time
//!
//! Counts posts per day, week, month, hour of day and weekday, and follows
//! the daily count as a trend series labelled `posts`. The daily series is
//! dense over the requested period: a day without posts is a zero, not a gap.

use super::keyword_trends::{KeywordTrend, Spike, TrendDirection, TrendResult};
use crate::models::Document;
use chrono::{Datelike, Days, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Label of the post volume series
pub const VOLUME_SERIES: &str = "posts";

/// Weekday names, Monday first
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Posts on one day and up to that day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub posts: usize,
    pub cumulative: usize,
}

/// Post volume aggregates for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostVolume {
    pub posts: usize,
    pub daily: Vec<DailyVolume>,

    /// Posts per week, keyed by the Monday that starts it
    pub weekly: BTreeMap<NaiveDate, usize>,

    /// Posts per `YYYY-MM` month
    pub monthly: BTreeMap<String, usize>,

    /// Posts per UTC hour of day
    pub hourly: [usize; 24],

    /// Posts per weekday, Monday first
    pub weekdays: [usize; 7],

    /// Weekday (rows, Monday first) by hour (columns)
    pub heatmap: [[usize; 24]; 7],

    /// First day with the most posts
    pub peak_date: Option<NaiveDate>,
    pub peak_posts: usize,

    /// Hour with the most posts; the earliest on ties
    pub peak_hour: Option<u32>,

    /// Percentage of posts made Monday to Friday
    pub weekday_share: f64,

    /// Percentage of posts made on Saturday or Sunday
    pub weekend_share: f64,

    pub mean_daily: f64,

    /// Sample standard deviation of the daily counts
    pub std_daily: f64,

    /// Coefficient of variation, `std / mean * 100`
    pub variation: f64,

    pub min_daily: usize,
    pub max_daily: usize,

    /// Mean daily volume against the first day, in percent
    pub growth_rate: Option<f64>,

    pub moving_average: Vec<(NaiveDate, f64)>,
    pub direction: Option<TrendDirection>,
    pub velocity: Option<f64>,
    pub spikes: Vec<Spike>,
}

impl PostVolume {
    /// Busiest day minus quietest day
    pub fn daily_range(&self) -> usize {
        self.max_daily - self.min_daily
    }
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Post counts for every day in `start..=end`
pub fn daily_post_counts<'a, I>(documents: I, start: NaiveDate, end: NaiveDate) -> Vec<DailyVolume>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for document in documents {
        *counts.entry(document.date()).or_default() += 1;
    }

    let mut cumulative = 0;
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| {
            let posts = counts.get(&date).copied().unwrap_or(0);
            cumulative += posts;
            DailyVolume {
                date,
                posts,
                cumulative,
            }
        })
        .collect()
}

/// Daily volume as a trend series
pub fn volume_trend(daily: &[DailyVolume], window: usize) -> TrendResult<KeywordTrend> {
    let mut trend = KeywordTrend::new(VOLUME_SERIES, window)?;
    for day in daily {
        trend.add_point(day.date, day.posts as u64);
    }
    Ok(trend)
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Volume aggregates for posts made in `start..=end`
///
/// `window` is the moving average window in days and `threshold` the spike
/// multiple, as for keyword trends.
pub fn post_volume(
    documents: &[Document],
    start: NaiveDate,
    end: NaiveDate,
    window: usize,
    threshold: f64,
) -> TrendResult<PostVolume> {
    let in_period: Vec<&Document> = documents
        .iter()
        .filter(|d| start <= d.date() && d.date() <= end)
        .collect();
    let posts = in_period.len();

    let daily = daily_post_counts(in_period.iter().copied(), start, end);
    let trend = volume_trend(&daily, window)?;

    let mut weekly: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut monthly: BTreeMap<String, usize> = BTreeMap::new();
    let mut hourly = [0usize; 24];
    let mut weekdays = [0usize; 7];
    let mut heatmap = [[0usize; 24]; 7];
    for document in &in_period {
        let date = document.date();
        let hour = document.timestamp.hour() as usize;
        let weekday = date.weekday().num_days_from_monday() as usize;

        *weekly.entry(week_start(date)).or_default() += 1;
        *monthly.entry(date.format("%Y-%m").to_string()).or_default() += 1;
        hourly[hour] += 1;
        weekdays[weekday] += 1;
        heatmap[weekday][hour] += 1;
    }

    let mut peak: Option<&DailyVolume> = None;
    for day in daily.iter().filter(|d| d.posts > 0) {
        if peak.map_or(true, |p| day.posts > p.posts) {
            peak = Some(day);
        }
    }

    let mut peak_hour: Option<u32> = None;
    for (hour, count) in hourly.iter().enumerate().filter(|(_, c)| **c > 0) {
        if peak_hour.map_or(true, |p| *count > hourly[p as usize]) {
            peak_hour = Some(hour as u32);
        }
    }

    let counts: Vec<f64> = daily.iter().map(|d| d.posts as f64).collect();
    let mean_daily = if counts.is_empty() {
        0.0
    } else {
        counts.iter().mean()
    };
    let std_daily = if counts.len() < 2 {
        0.0
    } else {
        counts.iter().std_dev()
    };
    let first = daily.first().map_or(0, |d| d.posts);

    let weekend = weekdays[5] + weekdays[6];
    let fitted = trend.trend_direction(None).ok();

    tracing::debug!(
        posts,
        days = daily.len(),
        weeks = weekly.len(),
        "Computed post volume"
    );

    Ok(PostVolume {
        posts,
        weekly,
        monthly,
        hourly,
        weekdays,
        heatmap,
        peak_date: peak.map(|p| p.date),
        peak_posts: peak.map_or(0, |p| p.posts),
        peak_hour,
        weekday_share: percent(posts - weekend, posts),
        weekend_share: percent(weekend, posts),
        mean_daily,
        std_daily,
        variation: if mean_daily > 0.0 {
            std_daily / mean_daily * 100.0
        } else {
            0.0
        },
        min_daily: daily.iter().map(|d| d.posts).min().unwrap_or(0),
        max_daily: daily.iter().map(|d| d.posts).max().unwrap_or(0),
        growth_rate: (first > 0).then(|| (mean_daily / first as f64 - 1.0) * 100.0),
        moving_average: trend.moving_averages(),
        direction: fitted.map(|(direction, _)| direction),
        velocity: fitted.map(|(_, velocity)| velocity),
        spikes: trend.detect_spikes(threshold),
        daily,
    })
}
