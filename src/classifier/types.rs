// Inference API request/response types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Scores at or below this never count as a confident label
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest<'a> {
    pub inputs: &'a str,
}

/// First label/score pair returned by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Map a prediction to a display category.
    ///
    /// Only `POSITIVE`/`NEGATIVE` with a score above 0.5 are taken at face
    /// value; every other label or score is neutral.
    pub fn from_prediction(prediction: &Prediction) -> Self {
        if prediction.score <= CONFIDENCE_THRESHOLD {
            return Sentiment::Neutral;
        }
        match prediction.label.as_str() {
            "POSITIVE" => Sentiment::Positive,
            "NEGATIVE" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of interpreting a successful inference response
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyOutcome {
    Classified {
        sentiment: Sentiment,
        prediction: Prediction,
    },
    /// Body did not match `[[{label, score}, ...]]`
    Unparseable,
}

impl ClassifyOutcome {
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                tracing::debug!("Inference response is not JSON: {}", e);
                ClassifyOutcome::Unparseable
            }
        }
    }

    pub fn from_value(value: &Value) -> Self {
        match first_prediction(value) {
            Some(prediction) => ClassifyOutcome::Classified {
                sentiment: Sentiment::from_prediction(&prediction),
                prediction,
            },
            None => ClassifyOutcome::Unparseable,
        }
    }

    /// Category shown to the user; unparseable bodies display as neutral
    pub fn sentiment(&self) -> Sentiment {
        match self {
            ClassifyOutcome::Classified { sentiment, .. } => *sentiment,
            ClassifyOutcome::Unparseable => Sentiment::Neutral,
        }
    }

    pub fn is_unparseable(&self) -> bool {
        matches!(self, ClassifyOutcome::Unparseable)
    }
}

fn first_prediction(value: &Value) -> Option<Prediction> {
    let object = value
        .as_array()?
        .first()?
        .as_array()?
        .first()?
        .as_object()?;

    Some(Prediction {
        label: object.get("label")?.as_str()?.to_string(),
        score: object.get("score")?.as_f64()?,
    })
}

/// Message for a non-success response: the service's `error` string when
/// it sent one, else the status code.
pub fn api_error_message(status: u16, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<Value>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|error| match error {
            Value::String(message) if !message.trim().is_empty() => Some(message),
            _ => None,
        })
        .unwrap_or_else(|| format!("API error: {}", status))
}
