// CLI subcommand runners

mod commands;
mod repl;

pub use commands::{format_help, Command};
pub use repl::Repl;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::app::App;
use crate::classifier::{build_http_client, SentimentClient};
use crate::config::Config;
use crate::receiver::ReceiverServer;
use crate::reviews::{ReviewLoader, ReviewSource};

/// Flags of `review-sentiment analyze`; `None` falls back to config
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub source: Option<String>,
    pub token: Option<String>,
    pub count: usize,
    pub interactive: bool,
}

/// Flags of `review-sentiment serve`; `None` falls back to config
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    pub bind: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub sheet: Option<String>,
}

pub async fn run_analyze(mut config: Config, options: AnalyzeOptions) -> Result<()> {
    if let Some(source) = options.source {
        config.reviews.source = source;
    }
    config
        .validate_analyze()
        .context("Invalid analyze options")?;

    let source = config.reviews.source.as_str();
    let token = options
        .token
        .or_else(|| config.api_token().map(str::to_string));

    let http = build_http_client(config.classifier.timeout_secs)?;
    let app = App::new(
        ReviewLoader::new(http.clone()),
        ReviewSource::from(source),
        SentimentClient::new(http, &config.classifier.endpoint),
    );

    if let Err(e) = app.load_reviews().await {
        println!("{}", app.display().await.render());
        return Err(e).with_context(|| format!("Cannot analyze reviews from {}", app.source()));
    }

    if options.interactive {
        return Repl::new(&app, token).run().await;
    }

    for _ in 0..options.count.max(1) {
        app.analyze(token.as_deref()).await;
        println!("{}\n", app.display().await.render());
    }

    Ok(())
}

pub async fn run_serve(mut config: Config, options: ServeOptions) -> Result<()> {
    if let Some(bind) = options.bind {
        config.receiver.bind_address = bind;
    }
    if let Some(log_dir) = options.log_dir {
        config.receiver.log_dir = log_dir;
    }
    if let Some(sheet) = options.sheet {
        config.receiver.sheet_name = sheet;
    }
    config
        .receiver
        .validate()
        .context("Invalid receiver options")?;

    ReceiverServer::new(&config.receiver)?.serve().await
}
