// Sentiment classification via a hosted inference endpoint

mod client;
mod types;

pub use client::{build_http_client, ClassifyError, SentimentClient};
pub use types::{
    api_error_message, ClassifyOutcome, InferenceRequest, Prediction, Sentiment,
    CONFIDENCE_THRESHOLD,
};
