use anyhow::Result;

use tweetlens::models::DailyKeywordSet;
use tweetlens::report::Analyzer;

use super::{emit, heading, OutputFormat};

pub fn daily(analyzer: &mut Analyzer, top: usize, fill: bool, format: OutputFormat) -> Result<()> {
    tracing::info!(top, fill, "Ranking keywords per day");
    let daily = analyzer.daily_keywords(top, fill)?;
    emit(format, &daily, render)
}

pub(crate) fn render(daily: &DailyKeywordSet) -> String {
    let mut out = heading("Daily top keywords");
    if daily.is_empty() {
        out.push_str("No documents in range\n");
        return out;
    }

    for (date, keywords) in daily {
        let ranked: Vec<String> = keywords
            .iter()
            .map(|k| format!("{} ({})", k.word, k.count))
            .collect();
        let line = if ranked.is_empty() {
            "-".to_string()
        } else {
            ranked.join(", ")
        };
        out.push_str(&format!("{date}  {line}\n"));
    }
    out
}
