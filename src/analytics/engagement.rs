//! Likes and retweets across the collection
//!
//! A post's engagement is its like count plus its retweet count. Shares are
//! percentages in `0..=100`; ratios are `None` when the divisor is zero.

use super::{ensure_top_n, AnalysisResult};
use crate::models::Document;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};
use std::collections::BTreeMap;

/// Likes and retweets summed over one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEngagement {
    pub date: NaiveDate,
    pub likes: u64,
    pub retweets: u64,
}

/// One of the most engaged posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagedPost {
    pub username: Option<String>,
    pub text: Option<String>,
    pub date: NaiveDate,
    pub likes: u64,
    pub retweets: u64,
    pub total: u64,
}

impl From<&Document> for EngagedPost {
    fn from(document: &Document) -> Self {
        Self {
            username: document.username.clone(),
            text: document.text.clone(),
            date: document.date(),
            likes: document.favorite_count,
            retweets: document.retweet_count,
            total: document.engagement(),
        }
    }
}

/// Engagement figures for a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementStats {
    pub posts: usize,
    pub total_likes: u64,
    pub total_retweets: u64,
    pub total_engagement: u64,
    pub mean_engagement: f64,
    pub median_engagement: f64,
    pub max_engagement: u64,

    /// Percentage of posts with any engagement
    pub engagement_rate: f64,

    /// Likes as a percentage of total engagement
    pub likes_share: f64,

    /// Retweets as a percentage of total engagement
    pub retweets_share: f64,

    /// Likes per retweet
    pub likes_per_retweet: Option<f64>,

    /// Days with posts, in date order
    pub daily: Vec<DailyEngagement>,

    /// First day with the most likes
    pub peak_date: Option<NaiveDate>,

    /// Most engaged posts, ties in collection order
    pub top_posts: Vec<EngagedPost>,

    /// Percentage of total engagement held by `top_posts`
    pub top_posts_share: f64,
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Likes and retweets per day, for days with at least one post
pub fn daily_engagement<'a, I>(documents: I) -> Vec<DailyEngagement>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut days: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for document in documents {
        let entry = days.entry(document.date()).or_default();
        entry.0 += document.favorite_count;
        entry.1 += document.retweet_count;
    }
    days.into_iter()
        .map(|(date, (likes, retweets))| DailyEngagement {
            date,
            likes,
            retweets,
        })
        .collect()
}

/// The `top_n` posts by engagement; equal totals keep collection order
pub fn top_engaged_posts(documents: &[Document], top_n: usize) -> AnalysisResult<Vec<EngagedPost>> {
    ensure_top_n(top_n)?;
    let mut ranked: Vec<&Document> = documents.iter().collect();
    ranked.sort_by(|a, b| b.engagement().cmp(&a.engagement()));
    Ok(ranked.into_iter().take(top_n).map(EngagedPost::from).collect())
}

/// Engagement statistics with the `top_n` most engaged posts
pub fn engagement_stats(documents: &[Document], top_n: usize) -> AnalysisResult<EngagementStats> {
    let top_posts = top_engaged_posts(documents, top_n)?;

    let totals: Vec<f64> = documents.iter().map(|d| d.engagement() as f64).collect();
    let total_likes: u64 = documents.iter().map(|d| d.favorite_count).sum();
    let total_retweets: u64 = documents.iter().map(|d| d.retweet_count).sum();
    let total_engagement = total_likes + total_retweets;
    let engaged = documents.iter().filter(|d| d.engagement() > 0).count();

    let (mean_engagement, median_engagement) = if totals.is_empty() {
        (0.0, 0.0)
    } else {
        (totals.iter().mean(), Data::new(totals).median())
    };

    let daily = daily_engagement(documents);
    let mut peak: Option<&DailyEngagement> = None;
    for day in &daily {
        if peak.map_or(true, |p| day.likes > p.likes) {
            peak = Some(day);
        }
    }
    let peak_date = peak.map(|p| p.date);

    let top_total: u64 = top_posts.iter().map(|p| p.total).sum();

    tracing::debug!(
        posts = documents.len(),
        total_engagement,
        engaged,
        "Computed engagement statistics"
    );

    Ok(EngagementStats {
        posts: documents.len(),
        total_likes,
        total_retweets,
        total_engagement,
        mean_engagement,
        median_engagement,
        max_engagement: documents.iter().map(Document::engagement).max().unwrap_or(0),
        engagement_rate: if documents.is_empty() {
            0.0
        } else {
            engaged as f64 / documents.len() as f64 * 100.0
        },
        likes_share: percent(total_likes, total_engagement),
        retweets_share: percent(total_retweets, total_engagement),
        likes_per_retweet: (total_retweets > 0)
            .then(|| total_likes as f64 / total_retweets as f64),
        daily,
        peak_date,
        top_posts,
        top_posts_share: percent(top_total, total_engagement),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(user: &str, day: u32, likes: u64, retweets: u64) -> Document {
        let mut document = Document::with_text(
            format!("post by {user}"),
            Utc.with_ymd_and_hms(2025, 9, day, 12, 0, 0).unwrap(),
        );
        document.username = Some(user.to_string());
        document.favorite_count = likes;
        document.retweet_count = retweets;
        document
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    #[test]
    fn test_totals_and_shares() {
        let documents = vec![
            post("alice", 8, 12, 3),
            post("bob", 8, 4, 1),
            post("carol", 9, 7, 2),
            post("dave", 9, 0, 0),
        ];
        let stats = engagement_stats(&documents, 10).unwrap();
        assert_eq!(stats.total_likes, 23);
        assert_eq!(stats.total_retweets, 6);
        assert_eq!(stats.total_engagement, 29);
        assert_eq!(stats.max_engagement, 15);
        assert!((stats.mean_engagement - 29.0 / 4.0).abs() < 1e-9);
        // totals are 15, 5, 9, 0
        assert!((stats.median_engagement - 7.0).abs() < 1e-9);
        assert!((stats.engagement_rate - 75.0).abs() < 1e-9);
        assert!((stats.likes_share - 23.0 / 29.0 * 100.0).abs() < 1e-9);
        assert!((stats.likes_per_retweet.unwrap() - 23.0 / 6.0).abs() < 1e-9);
        assert!((stats.top_posts_share - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_and_peak() {
        let documents = vec![
            post("alice", 9, 5, 0),
            post("bob", 8, 3, 1),
            post("carol", 8, 2, 4),
            post("dave", 10, 1, 9),
        ];
        let stats = engagement_stats(&documents, 1).unwrap();
        assert_eq!(
            stats.daily,
            vec![
                DailyEngagement { date: date(8), likes: 5, retweets: 5 },
                DailyEngagement { date: date(9), likes: 5, retweets: 0 },
                DailyEngagement { date: date(10), likes: 1, retweets: 9 },
            ]
        );
        // the 8th and 9th tie on likes; the earlier day wins
        assert_eq!(stats.peak_date, Some(date(8)));
    }

    #[test]
    fn test_top_posts_keep_order_on_ties() {
        let documents = vec![
            post("alice", 8, 1, 1),
            post("bob", 8, 5, 0),
            post("carol", 9, 2, 0),
            post("dave", 9, 0, 5),
        ];
        let top = top_engaged_posts(&documents, 3).unwrap();
        let users: Vec<_> = top.iter().map(|p| p.username.as_deref()).collect();
        assert_eq!(users, vec![Some("bob"), Some("dave"), Some("alice")]);
        assert_eq!(top[0].total, 5);
        assert!(top_engaged_posts(&documents, 0).is_err());
    }

    #[test]
    fn test_no_engagement() {
        let documents = vec![post("erin", 11, 0, 0)];
        let stats = engagement_stats(&documents, 10).unwrap();
        assert_eq!(stats.engagement_rate, 0.0);
        assert_eq!(stats.likes_share, 0.0);
        assert_eq!(stats.likes_per_retweet, None);
        assert_eq!(stats.peak_date, Some(date(11)));

        let empty = engagement_stats(&[], 10).unwrap();
        assert_eq!(empty.posts, 0);
        assert_eq!(empty.median_engagement, 0.0);
        assert_eq!(empty.peak_date, None);
        assert!(empty.top_posts.is_empty());
    }
}
