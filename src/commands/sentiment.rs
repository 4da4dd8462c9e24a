use anyhow::Result;

use tweetlens::models::Sentiment;
use tweetlens::report::{Analyzer, SentimentReport};

use super::{emit, heading, OutputFormat};

pub fn sentiment(analyzer: &mut Analyzer, format: OutputFormat) -> Result<()> {
    tracing::info!("Classifying sentiment");
    let report = analyzer.sentiment_report()?;
    emit(format, &report, render)
}

pub(crate) fn render(report: &SentimentReport) -> String {
    let mut out = heading("Sentiment");
    let distribution = &report.distribution;
    if distribution.total == 0 {
        out.push_str("No documents in range\n");
        return out;
    }

    for label in Sentiment::all() {
        out.push_str(&format!(
            "{:<10} {:>6}  {:>6.2}%\n",
            label.as_str(),
            distribution.count(label),
            distribution.percentage(label)
        ));
    }
    if let Some(dominant) = distribution.dominant() {
        out.push_str(&format!("Dominant: {dominant}\n"));
    }

    out.push('\n');
    for (date, counts) in &report.daily {
        let cells: Vec<String> = Sentiment::all()
            .into_iter()
            .map(|label| format!("{label} {}", counts.get(&label).copied().unwrap_or(0)))
            .collect();
        out.push_str(&format!("{date}  {}\n", cells.join(" | ")));
    }
    out
}
