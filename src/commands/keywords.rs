use anyhow::Result;

use tweetlens::report::{Analyzer, KeywordReport};

use super::{emit, heading, OutputFormat};

pub fn keywords(analyzer: &mut Analyzer, top: usize, format: OutputFormat) -> Result<()> {
    tracing::info!(top, "Ranking keywords");
    let report = analyzer.keyword_report(top)?;
    emit(format, &report, render)
}

pub(crate) fn render(report: &KeywordReport) -> String {
    let mut out = heading("Top keywords");
    if report.keywords.is_empty() {
        out.push_str("No keywords found\n");
        return out;
    }

    for (i, share) in report.keywords.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<20} {:>6}  {:>6.2}%\n",
            i + 1,
            share.word,
            share.count,
            share.percentage
        ));
    }

    out.push('\n');
    for (category, words) in &report.categories.categories {
        if words.is_empty() {
            continue;
        }
        let list: Vec<&str> = words.iter().map(|k| k.word.as_str()).collect();
        out.push_str(&format!("{category}: {}\n", list.join(", ")));
    }

    let s = &report.summary;
    out.push_str(&format!(
        "\nUnique words: {} | Total frequency: {} | Average: {:.2} | Top 5 share: {:.2}% | Diversity: {:.3}\n",
        s.unique_words, s.total_frequency, s.average_frequency, s.top_concentration, s.diversity_index
    ));
    out
}
