use anyhow::Result;

use tweetlens::analytics::EngagementStats;
use tweetlens::report::Analyzer;

use super::{emit, heading, OutputFormat};

/// Longest text shown for a top post
const PREVIEW_CHARS: usize = 60;

pub fn engagement(analyzer: &mut Analyzer, top: usize, format: OutputFormat) -> Result<()> {
    tracing::info!(top, "Summarizing engagement");
    let stats = analyzer.engagement_report(top)?;
    emit(format, &stats, render)
}

fn preview(text: Option<&str>) -> String {
    let text = text.unwrap_or("").replace('\n', " ");
    if text.chars().count() > PREVIEW_CHARS {
        let cut: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        text
    }
}

pub(crate) fn render(stats: &EngagementStats) -> String {
    let mut out = heading("Engagement");
    if stats.posts == 0 {
        out.push_str("No documents in range\n");
        return out;
    }

    out.push_str(&format!(
        "Likes: {} | Retweets: {} | Total: {}\n",
        stats.total_likes, stats.total_retweets, stats.total_engagement
    ));
    out.push_str(&format!(
        "Mean: {:.2} | Median: {:.1} | Max: {} | Engaged posts: {:.1}%\n",
        stats.mean_engagement, stats.median_engagement, stats.max_engagement, stats.engagement_rate
    ));
    out.push_str(&format!(
        "Likes share: {:.1}% | Retweets share: {:.1}%",
        stats.likes_share, stats.retweets_share
    ));
    match stats.likes_per_retweet {
        Some(ratio) => out.push_str(&format!(" | Likes per retweet: {ratio:.2}\n")),
        None => out.push('\n'),
    }
    if let Some(date) = stats.peak_date {
        out.push_str(&format!("Peak day by likes: {date}\n"));
    }

    out.push_str("\nDaily\n");
    for day in &stats.daily {
        out.push_str(&format!(
            "{}  likes {:>6}  retweets {:>6}\n",
            day.date, day.likes, day.retweets
        ));
    }

    out.push_str(&format!(
        "\nTop posts ({:.1}% of engagement)\n",
        stats.top_posts_share
    ));
    for (i, post) in stats.top_posts.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. @{:<16} {:>6} ({} likes, {} retweets)  {}\n",
            i + 1,
            post.username.as_deref().unwrap_or("-"),
            post.total,
            post.likes,
            post.retweets,
            preview(post.text.as_deref())
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tweetlens::config::AnalysisConfig;
    use tweetlens::models::Document;

    #[test]
    fn test_render_engagement() {
        let ts = Utc.with_ymd_and_hms(2025, 9, 8, 12, 0, 0).unwrap();
        let mut popular = Document::with_text("npm worm ".repeat(20), ts);
        popular.username = Some("alice".to_string());
        popular.favorite_count = 9;
        popular.retweet_count = 3;
        let documents = vec![popular, Document::with_text("quiet post", ts)];
        let analyzer = Analyzer::new(documents, AnalysisConfig::default());
        let text = render(&analyzer.engagement_report(5).unwrap());

        assert!(text.contains("Likes: 9 | Retweets: 3 | Total: 12"));
        assert!(text.contains("Engaged posts: 50.0%"));
        assert!(text.contains("Likes per retweet: 3.00"));
        assert!(text.contains("  1. @alice"));
        assert!(text.contains("..."));
        assert!(text.contains("2025-09-08  likes      9  retweets      3"));
    }

    #[test]
    fn test_preview_keeps_short_text() {
        assert_eq!(preview(Some("npm\nworm")), "npm worm");
        assert_eq!(preview(None), "");
    }
}
