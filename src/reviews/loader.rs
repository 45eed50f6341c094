// TSV review loader
// Fetches the review file (HTTP or local path) and keeps the non-empty `text` fields

use reqwest::{Client, StatusCode, Url};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::selector::ReviewSet;

/// Header of the column holding review text
pub const TEXT_COLUMN: &str = "text";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to fetch {location} (HTTP {status})")]
    Fetch { location: String, status: StatusCode },

    #[error("Failed to fetch {location}: {source}")]
    Request {
        location: String,
        source: reqwest::Error,
    },

    #[error("Failed to read {location}: {source}")]
    Io {
        location: String,
        source: std::io::Error,
    },

    #[error("TSV parsing failed: {0}")]
    Parse(#[from] csv::Error),

    #[error("TSV contains no rows.")]
    NoRows,

    #[error("No reviews found in TSV.")]
    NoReviews,
}

/// Where the review file lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewSource {
    Url(Url),
    File(PathBuf),
}

impl From<&str> for ReviewSource {
    fn from(source: &str) -> Self {
        match Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => ReviewSource::Url(url),
            _ => ReviewSource::File(PathBuf::from(source)),
        }
    }
}

impl fmt::Display for ReviewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewSource::Url(url) => write!(f, "{}", url),
            ReviewSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct ReviewLoader {
    client: Client,
}

impl ReviewLoader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch and parse the review file
    pub async fn load(&self, source: &ReviewSource) -> Result<ReviewSet, LoadError> {
        tracing::info!("Loading reviews from {}", source);

        let body = match source {
            ReviewSource::Url(url) => self.fetch(url).await?,
            ReviewSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        location: path.display().to_string(),
                        source,
                    })?
            }
        };

        let reviews = parse_reviews(&body)?;
        tracing::info!("Loaded {} reviews", reviews.len());

        Ok(reviews)
    }

    async fn fetch(&self, url: &Url) -> Result<String, LoadError> {
        let request_error = |source| LoadError::Request {
            location: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Fetch {
                location: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(request_error)
    }
}

/// Parse tab-separated text with a header row into the non-empty `text` values.
///
/// Blank lines are skipped and rows may have fewer or more fields than the
/// header. A file without a `text` column has no reviews.
pub fn parse_reviews(tsv: &str) -> Result<ReviewSet, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(tsv.as_bytes());

    let column = reader
        .headers()?
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}').trim() == TEXT_COLUMN);

    let mut rows = 0usize;
    let mut reviews = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows += 1;

        if let Some(text) = column.and_then(|idx| record.get(idx)) {
            if !text.trim().is_empty() {
                reviews.push(text.to_string());
            }
        }
    }

    if rows == 0 {
        return Err(LoadError::NoRows);
    }
    if reviews.is_empty() {
        return Err(LoadError::NoReviews);
    }

    tracing::debug!("Parsed {} rows, {} with review text", rows, reviews.len());
    Ok(ReviewSet::new(reviews))
}
