// Configuration structs

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

use super::constants::{
    CONFIG_DIR_NAME, DEFAULT_HTTP_ADDR, DEFAULT_INFERENCE_URL, DEFAULT_REVIEWS_SOURCE,
    DEFAULT_SHEET_NAME,
};

/// Where reviews are loaded from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewsConfig {
    /// URL (http/https) or local path of the TSV file
    pub source: String,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_REVIEWS_SOURCE.to_string(),
        }
    }
}

/// Inference endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Full URL of the hosted classification model
    pub endpoint: String,

    /// Bearer token sent with each request (optional)
    pub api_token: Option<String>,

    /// Request timeout. None leaves the network stack default in place.
    pub timeout_secs: Option<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_INFERENCE_URL.to_string(),
            api_token: None,
            timeout_secs: None,
        }
    }
}

/// Log receiver (HTTP service) settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Bind address (e.g., "127.0.0.1:8000")
    pub bind_address: String,

    /// Directory holding the sheet files
    pub log_dir: PathBuf,

    /// Sheet rows are appended to
    pub sheet_name: String,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_HTTP_ADDR.to_string(),
            log_dir: default_log_dir(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME).join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub reviews: ReviewsConfig,
    pub classifier: ClassifierConfig,
    pub receiver: ReceiverConfig,
}

impl ReviewsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            bail!("reviews.source must not be empty");
        }
        Ok(())
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        match reqwest::Url::parse(&self.endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => bail!(
                "classifier.endpoint must use http or https, got '{}'",
                url.scheme()
            ),
            Err(e) => bail!(
                "classifier.endpoint '{}' is not a valid URL: {}",
                self.endpoint,
                e
            ),
        }

        if self.timeout_secs == Some(0) {
            bail!("classifier.timeout_secs must be greater than zero");
        }

        Ok(())
    }
}

impl ReceiverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bind_address.parse::<SocketAddr>().is_err() {
            bail!(
                "receiver.bind_address '{}' is not a socket address",
                self.bind_address
            );
        }

        let sheet = self.sheet_name.trim();
        if sheet.is_empty() || sheet.contains(['/', '\\']) || sheet.starts_with('.') {
            bail!(
                "receiver.sheet_name '{}' must be a plain, non-empty name",
                self.sheet_name
            );
        }

        Ok(())
    }
}

impl Config {
    /// Settings used by `analyze`; the receiver section is not checked
    pub fn validate_analyze(&self) -> Result<()> {
        self.reviews.validate()?;
        self.classifier.validate()
    }

    /// Token from the config file, ignoring blank values
    pub fn api_token(&self) -> Option<&str> {
        self.classifier
            .api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
