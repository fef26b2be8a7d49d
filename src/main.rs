use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tagrise::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "tagrise",
    version,
    about = "Tag co-occurrence analytics with importance ranking and rising-pair detection",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis pipeline over JSONL records
    Analyze {
        /// Input JSONL file(s)
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Report output path (JSON); printed to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the recent window length in days
        #[arg(long)]
        recent_days: Option<i64>,

        /// Override the historical window length in days
        #[arg(long)]
        historical_days: Option<i64>,

        /// Override the number of trend entries kept
        #[arg(long)]
        top_k: Option<usize>,
    },

    /// Build and inspect the co-occurrence graph without ranking
    Graph {
        /// Input JSONL file(s)
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Graph export output path (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of top tags and pairs to preview
        #[arg(long, default_value = "10")]
        top: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    setup_tracing(&cli.log_format, cli.verbose)?;

    tracing::info!("tagrise starting");

    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            input,
            output,
            recent_days,
            historical_days,
            top_k,
        } => {
            if let Some(days) = recent_days {
                config.analysis.recent_span_days = days;
            }
            if let Some(days) = historical_days {
                config.analysis.historical_span_days = days;
            }
            if let Some(k) = top_k {
                config.analysis.top_k_trend = k;
            }
            config.validate()?;

            tracing::info!(
                inputs = input.len(),
                output = ?output,
                recent_days = config.analysis.recent_span_days,
                historical_days = config.analysis.historical_span_days,
                "Starting analyze command"
            );
            commands::analyze(input, output, config).await?;
        }

        Commands::Graph { input, output, top } => {
            tracing::info!(
                inputs = input.len(),
                output = ?output,
                top = top,
                "Starting graph command"
            );
            commands::graph(input, output, top).await?;
        }
    }

    tracing::info!("tagrise completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("tagrise=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("tagrise=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
