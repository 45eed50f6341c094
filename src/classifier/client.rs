// HTTP client for the hosted sentiment model

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use super::types::{api_error_message, ClassifyOutcome, InferenceRequest};

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Non-success status; `message` is what the user sees
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

pub struct SentimentClient {
    client: Client,
    endpoint: String,
}

impl SentimentClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Classify one text. A blank token sends no Authorization header.
    ///
    /// Single attempt, no retry.
    pub async fn classify(
        &self,
        text: &str,
        token: Option<&str>,
    ) -> Result<ClassifyOutcome, ClassifyError> {
        tracing::debug!("Sending {} chars to {}", text.len(), self.endpoint);

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&InferenceRequest { inputs: text });

        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = api_error_message(status.as_u16(), &error_body);
            tracing::warn!("Inference request failed ({}): {}", status, message);
            return Err(ClassifyError::Api { status, message });
        }

        let body = response.text().await?;
        tracing::debug!("Received inference response: {}", body);

        let outcome = ClassifyOutcome::from_body(&body);
        if outcome.is_unparseable() {
            tracing::warn!("Unexpected inference response shape");
        }

        Ok(outcome)
    }
}

/// Shared HTTP client. `timeout_secs = None` keeps reqwest's default.
pub fn build_http_client(timeout_secs: Option<u64>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().context("Failed to create HTTP client")
}
