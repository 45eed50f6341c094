// Review Sentiment - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use review_sentiment::cli::{run_analyze, run_serve, AnalyzeOptions, ServeOptions};
use review_sentiment::config::load_config;
use review_sentiment::logging::init_tracing;

#[derive(Parser)]
#[command(name = "review-sentiment")]
#[command(about = "Classify random product reviews and receive event logs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level used when RUST_LOG is not set
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Load reviews and classify random picks
    Analyze {
        /// TSV file path or http(s) URL (overrides config)
        #[arg(short, long)]
        source: Option<String>,

        /// Inference API token (overrides config and HF_API_TOKEN)
        #[arg(short, long)]
        token: Option<String>,

        /// Number of random reviews to classify
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Prompt for each analysis instead of exiting
        #[arg(short, long)]
        interactive: bool,
    },

    /// Run the event log receiver
    Serve {
        /// Bind address (e.g., 127.0.0.1:8000)
        #[arg(short, long)]
        bind: Option<String>,

        /// Directory holding sheet files
        #[arg(long)]
        log_dir: Option<PathBuf>,

        /// Sheet name to append to
        #[arg(long)]
        sheet: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = load_config()?;

    match cli.command {
        Commands::Analyze {
            source,
            token,
            count,
            interactive,
        } => {
            run_analyze(
                config,
                AnalyzeOptions {
                    source,
                    token,
                    count,
                    interactive,
                },
            )
            .await
        }
        Commands::Serve {
            bind,
            log_dir,
            sheet,
        } => {
            run_serve(
                config,
                ServeOptions {
                    bind,
                    log_dir,
                    sheet,
                },
            )
            .await
        }
    }
}
