use anyhow::Result;

use tweetlens::analytics::HashtagRanking;
use tweetlens::report::Analyzer;

use super::{emit, heading, OutputFormat};

pub fn hashtags(analyzer: &mut Analyzer, top: usize, format: OutputFormat) -> Result<()> {
    tracing::info!(top, "Ranking hashtags");
    let ranking = analyzer.hashtag_report(top)?;
    emit(format, &ranking, render)
}

pub(crate) fn render(ranking: &HashtagRanking) -> String {
    let mut out = heading("Top hashtags");
    if ranking.tags.is_empty() {
        out.push_str("No hashtags found\n");
        return out;
    }

    for (i, tag) in ranking.tags.iter().enumerate() {
        out.push_str(&format!("{:>3}. #{:<24} {:>6}\n", i + 1, tag.word, tag.count));
    }
    out.push_str(&format!(
        "\nDistinct tags: {} | Uses: {} | Top 5 uses: {} | Top 10 share: {:.1}%\n",
        ranking.distinct,
        ranking.total_uses,
        ranking.leading_uses(5),
        ranking.top10_share
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tweetlens::config::AnalysisConfig;
    use tweetlens::models::Document;

    #[test]
    fn test_render_hashtags() {
        let ts = Utc.with_ymd_and_hms(2025, 9, 8, 12, 0, 0).unwrap();
        let documents = vec![
            Document::with_text("#npm #Shai_Hulud", ts),
            Document::with_text("#NPM again", ts),
        ];
        let analyzer = Analyzer::new(documents, AnalysisConfig::default());
        let text = render(&analyzer.hashtag_report(15).unwrap());

        assert!(text.contains("  1. #npm"));
        assert!(text.contains("  2. #shai_hulud"));
        assert!(text.contains("Distinct tags: 2 | Uses: 3 | Top 5 uses: 3 | Top 10 share: 100.0%"));
    }

    #[test]
    fn test_render_empty() {
        let analyzer = Analyzer::new(Vec::new(), AnalysisConfig::default());
        let text = render(&analyzer.hashtag_report(15).unwrap());
        assert!(text.contains("No hashtags found"));
    }
}
