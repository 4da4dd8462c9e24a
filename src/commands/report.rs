use anyhow::Result;

use tweetlens::report::{Analyzer, FullReport};

use super::{
    cooccurrence, daily, emit, engagement, hashtags, keywords, sentiment, trends, volume,
    OutputFormat,
};

pub fn report(analyzer: &mut Analyzer, format: OutputFormat) -> Result<()> {
    tracing::info!("Building full report");
    let report = analyzer.full_report()?;
    let stats = analyzer.cache().stats();
    tracing::debug!(
        hits = stats.hits,
        misses = stats.misses,
        hit_rate = stats.hit_rate(),
        "Report cache usage"
    );
    emit(format, &report, render)
}

pub(crate) fn render(report: &FullReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Documents analysed: {}\n", report.documents));
    if let Some(period) = &report.period {
        out.push_str(&format!(
            "Period: {} to {} ({} days)\n",
            period.start,
            period.end,
            period.days()
        ));
    }
    out.push('\n');

    for section in [
        keywords::render(&report.keywords),
        cooccurrence::render(&report.cooccurrence),
        daily::render(&report.daily),
        trends::render(&report.trends),
        sentiment::render(&report.sentiment),
        volume::render(&report.volume),
        engagement::render(&report.engagement),
        hashtags::render(&report.hashtags),
    ] {
        out.push_str(&section);
        out.push('\n');
    }
    out
}
