use anyhow::Result;

use tweetlens::analytics::{PostVolume, WEEKDAY_NAMES};
use tweetlens::report::Analyzer;

use super::{emit, heading, OutputFormat};

pub fn volume(
    analyzer: &mut Analyzer,
    window: usize,
    threshold: f64,
    format: OutputFormat,
) -> Result<()> {
    tracing::info!(window, threshold, "Counting post volume");
    let volume = analyzer.volume_report(window, threshold)?;
    emit(format, &volume, render)
}

pub(crate) fn render(volume: &Option<PostVolume>) -> String {
    let mut out = heading("Post volume");
    let Some(volume) = volume.as_ref().filter(|v| v.posts > 0) else {
        out.push_str("No documents in range\n");
        return out;
    };

    out.push_str(&format!(
        "Posts: {} over {} days | Mean per day: {:.2} | Std: {:.2} | CV: {:.1}% | Range: {}\n",
        volume.posts,
        volume.daily.len(),
        volume.mean_daily,
        volume.std_daily,
        volume.variation,
        volume.daily_range()
    ));
    if let Some(date) = volume.peak_date {
        out.push_str(&format!("Peak day: {date} ({} posts)\n", volume.peak_posts));
    }
    if let Some(hour) = volume.peak_hour {
        out.push_str(&format!("Peak hour: {hour:02}:00 UTC\n"));
    }
    out.push_str(&format!(
        "Weekdays: {:.1}% | Weekend: {:.1}%\n",
        volume.weekday_share, volume.weekend_share
    ));
    if let Some(growth) = volume.growth_rate {
        out.push_str(&format!("Growth against first day: {growth:+.1}%\n"));
    }
    if let (Some(direction), Some(velocity)) = (volume.direction, volume.velocity) {
        out.push_str(&format!("Trend: {direction:?} ({velocity:+.2})\n"));
    }

    out.push_str("\nBy weekday\n");
    for (name, count) in WEEKDAY_NAMES.iter().zip(volume.weekdays) {
        out.push_str(&format!("{name:<10} {count:>6}\n"));
    }

    out.push_str("\nBy week\n");
    for (start, count) in &volume.weekly {
        out.push_str(&format!("{start}  {count:>6}\n"));
    }

    out.push_str("\nBy month\n");
    for (month, count) in &volume.monthly {
        out.push_str(&format!("{month}     {count:>6}\n"));
    }

    out.push_str("\nDaily\n");
    for (day, (_, average)) in volume.daily.iter().zip(&volume.moving_average) {
        out.push_str(&format!(
            "{}  {:>6}  avg {:>7.2}  total {:>7}\n",
            day.date, day.posts, average, day.cumulative
        ));
    }
    for spike in &volume.spikes {
        out.push_str(&format!(
            "    spike {}: {} vs {:.1} expected (x{:.1})\n",
            spike.date, spike.count, spike.expected, spike.magnitude
        ));
    }
    out
}
