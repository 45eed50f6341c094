// HTTP handlers for the log receiver

use axum::{
    extract::{Form, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::ReceiverError;
use super::row::{LogParams, LogRow};
use super::ReceiverState;

/// Body returned for every accepted log request
pub const ACK_BODY: &str = "OK";

pub fn create_router(state: Arc<ReceiverState>) -> Router {
    Router::new()
        .route("/exec", post(handle_log))
        .route("/log", post(handle_log))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Append one row built from query-string and form-body parameters.
///
/// Missing, malformed or non-form bodies count as "no parameters".
/// Within one source the first value of a repeated key is used.
pub async fn handle_log(
    State(state): State<Arc<ReceiverState>>,
    query: Option<Query<Vec<(String, String)>>>,
    form: Option<Form<Vec<(String, String)>>>,
) -> Result<&'static str, ReceiverError> {
    let query = query
        .map(|Query(pairs)| LogParams::from_pairs(pairs))
        .unwrap_or_default();
    let params = match form {
        Some(Form(pairs)) => query.merged_with(LogParams::from_pairs(pairs)),
        None => query,
    };

    let row = LogRow::from_params(params, Utc::now());
    tracing::debug!("Appending log row: {:?}", row);
    state.append(&row).await?;

    Ok(ACK_BODY)
}

pub async fn health_check(State(state): State<Arc<ReceiverState>>) -> Json<Value> {
    let rows = state.row_count().await.ok();
    Json(json!({
        "status": "ok",
        "sheet": state.sheet_name().await,
        "rows": rows,
    }))
}
