pub mod cooccurrence;
pub mod daily;
pub mod engagement;
pub mod hashtags;
pub mod keywords;
pub mod report;
pub mod sentiment;
pub mod trends;
pub mod volume;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

// Re-export command functions for convenience
pub use cooccurrence::cooccurrence;
pub use daily::daily;
pub use engagement::engagement;
pub use hashtags::hashtags;
pub use keywords::keywords;
pub use report::report;
pub use sentiment::sentiment;
pub use trends::trends;
pub use volume::volume;

/// Output rendering for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print `value` as pretty JSON, or as the text produced by `render`
pub fn emit<T, F>(format: OutputFormat, value: &T, render: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", render(value)),
    }
    Ok(())
}

fn heading(title: &str) -> String {
    format!("{title}\n{}\n", "=".repeat(title.chars().count()))
}
