use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tweetlens::config::Config;
use tweetlens::dataset::load_csv;
use tweetlens::report::Analyzer;

mod commands;

use commands::OutputFormat;

#[derive(Parser)]
#[command(
    name = "tweetlens",
    version,
    about = "Keyword, trend, volume and engagement analysis for social media post exports",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// CSV dataset with created_at and full_text columns
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// First day kept (YYYY-MM-DD, inclusive)
    #[arg(long, global = true)]
    start: Option<NaiveDate>,

    /// Last day kept (YYYY-MM-DD, inclusive)
    #[arg(long, global = true)]
    end: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the most frequent keywords
    Keywords {
        /// Number of keywords to report
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Count keyword pairs appearing in the same post
    Cooccurrence {
        /// Number of pairs to report
        #[arg(short, long)]
        top: Option<usize>,

        /// Number of leading keywords to pair up
        #[arg(short, long)]
        keywords: Option<usize>,
    },

    /// Rank keywords for each day
    Daily {
        /// Keywords per day
        #[arg(short, long)]
        top: Option<usize>,

        /// Include days without posts
        #[arg(long, default_value = "false")]
        fill: bool,
    },

    /// Follow the leading keywords over time
    Trends {
        /// Number of leading keywords to follow
        #[arg(short, long)]
        keywords: Option<usize>,

        /// Moving average window in days
        #[arg(short, long)]
        window: Option<usize>,

        /// Spike threshold as a multiple of the moving average
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Label posts by lexicon sentiment
    Sentiment,

    /// Count posts per day, week, month, hour and weekday
    Volume {
        /// Moving average window in days
        #[arg(short, long)]
        window: Option<usize>,

        /// Spike threshold as a multiple of the moving average
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Summarize likes and retweets
    Engagement {
        /// Number of most engaged posts to list
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Rank the most used hashtags
    Hashtags {
        /// Number of hashtags to report
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Run every analysis
    Report,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    tracing::info!("tweetlens starting");

    let range = config.date_range()?;
    let documents = load_csv(&config.dataset.path)
        .with_context(|| format!("Failed to load dataset: {}", config.dataset.path.display()))?;
    let documents = range.filter(documents);
    tracing::info!(
        documents = documents.len(),
        start = %range.start,
        end = %range.end,
        "Documents in range"
    );

    let settings = config.analysis.clone();
    let mut analyzer = Analyzer::new(documents, config.analysis).with_period(range);

    match cli.command {
        Commands::Keywords { top } => {
            commands::keywords(&mut analyzer, top.unwrap_or(settings.top_keywords), cli.format)?;
        }

        Commands::Cooccurrence { top, keywords } => {
            commands::cooccurrence(
                &mut analyzer,
                keywords.unwrap_or(settings.top_keywords),
                top.unwrap_or(settings.cooccurrence_top),
                cli.format,
            )?;
        }

        Commands::Daily { top, fill } => {
            commands::daily(&mut analyzer, top.unwrap_or(settings.daily_top), fill, cli.format)?;
        }

        Commands::Trends {
            keywords,
            window,
            threshold,
        } => {
            commands::trends(
                &mut analyzer,
                keywords.unwrap_or(settings.trend_keywords),
                window.unwrap_or(settings.trend_window),
                threshold.unwrap_or(settings.spike_threshold),
                cli.format,
            )?;
        }

        Commands::Sentiment => {
            commands::sentiment(&mut analyzer, cli.format)?;
        }

        Commands::Volume { window, threshold } => {
            commands::volume(
                &mut analyzer,
                window.unwrap_or(settings.trend_window),
                threshold.unwrap_or(settings.spike_threshold),
                cli.format,
            )?;
        }

        Commands::Engagement { top } => {
            commands::engagement(&mut analyzer, top.unwrap_or(settings.top_posts), cli.format)?;
        }

        Commands::Hashtags { top } => {
            commands::hashtags(&mut analyzer, top.unwrap_or(settings.hashtag_top), cli.format)?;
        }

        Commands::Report => {
            commands::report(&mut analyzer, cli.format)?;
        }
    }

    Ok(())
}

/// File, then environment, then command-line flags
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply_env();

    if let Some(input) = &cli.input {
        config.dataset.path = input.clone();
    }
    if let Some(start) = cli.start {
        config.dataset.start_date = start;
    }
    if let Some(end) = cli.end {
        config.dataset.end_date = end;
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    config.validate()?;
    Ok(config)
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("tweetlens=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("tweetlens={level},warn"))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
