use anyhow::Result;

use tweetlens::report::{Analyzer, TrendReport};

use super::{emit, heading, OutputFormat};

pub fn trends(
    analyzer: &mut Analyzer,
    keywords: usize,
    window: usize,
    threshold: f64,
    format: OutputFormat,
) -> Result<()> {
    tracing::info!(keywords, window, threshold, "Tracking keyword trends");
    let report = analyzer.trend_report(keywords, window, threshold)?;
    emit(format, &report, render)
}

pub(crate) fn render(report: &TrendReport) -> String {
    let mut out = heading("Keyword trends");
    if report.trends.is_empty() {
        out.push_str("No keywords to follow\n");
        return out;
    }

    for trend in &report.trends {
        let direction = match (trend.direction, trend.velocity) {
            (Some(direction), Some(velocity)) => format!("{direction:?} ({velocity:+.2})"),
            _ => "insufficient data".to_string(),
        };
        let days = report
            .series
            .iter()
            .filter(|p| p.word == trend.keyword && p.count > 0)
            .count();
        out.push_str(&format!(
            "{:<20} {:<24} {:>3} active days\n",
            trend.keyword, direction, days
        ));
        for spike in &trend.spikes {
            out.push_str(&format!(
                "    spike {}: {} vs {:.1} expected (x{:.1})\n",
                spike.date, spike.count, spike.expected, spike.magnitude
            ));
        }
    }
    out
}
