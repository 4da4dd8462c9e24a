use anyhow::Result;

use tweetlens::report::{Analyzer, CooccurrenceReport};

use super::{emit, heading, OutputFormat};

pub fn cooccurrence(
    analyzer: &mut Analyzer,
    tracked: usize,
    top: usize,
    format: OutputFormat,
) -> Result<()> {
    tracing::info!(tracked, top, "Counting keyword co-occurrence");
    let report = analyzer.cooccurrence_report(tracked, top)?;
    emit(format, &report, render)
}

pub(crate) fn render(report: &CooccurrenceReport) -> String {
    let mut out = heading("Keyword co-occurrence");
    if report.pairs.is_empty() {
        out.push_str("No keyword pairs found\n");
        return out;
    }

    for (i, pair) in report.pairs.iter().enumerate() {
        out.push_str(&format!("{:>3}. {:<32} {:>6}\n", i + 1, pair.label(), pair.count));
    }

    let matrix = &report.matrix;
    if !matrix.is_empty() {
        let width = matrix.words.iter().map(String::len).max().unwrap_or(0).max(5);
        out.push_str(&format!("\n{:width$}", ""));
        for word in &matrix.words {
            out.push_str(&format!(" {word:>width$}"));
        }
        out.push('\n');
        for (word, row) in matrix.words.iter().zip(&matrix.counts) {
            out.push_str(&format!("{word:<width$}"));
            for count in row {
                out.push_str(&format!(" {count:>width$}"));
            }
            out.push('\n');
        }
    }
    out
}
