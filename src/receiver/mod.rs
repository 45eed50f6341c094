// Log receiver
// HTTP service that appends form-posted events to an append-only sheet

mod error;
mod handlers;
pub mod row;
pub mod sheet;

pub use error::ReceiverError;
pub use handlers::{create_router, handle_log, health_check, ACK_BODY};
pub use row::{resolve_timestamp, to_iso_string, LogParams, LogRow};
pub use sheet::{append_log_row, CsvSheet, LogSheet, MemorySheet, LOG_HEADER};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::config::ReceiverConfig;

/// Shared handler state. Appends go through one lock, so the header check
/// and the row write happen one request at a time.
pub struct ReceiverState {
    sheet: Mutex<Box<dyn LogSheet>>,
}

impl ReceiverState {
    pub fn new(sheet: Box<dyn LogSheet>) -> Self {
        Self {
            sheet: Mutex::new(sheet),
        }
    }

    /// Append a row, writing the header first if the sheet is empty
    pub async fn append(&self, row: &LogRow) -> Result<(), ReceiverError> {
        let mut sheet = self.sheet.lock().await;
        append_log_row(sheet.as_mut(), &row.to_record())
    }

    pub async fn row_count(&self) -> Result<usize, ReceiverError> {
        self.sheet.lock().await.last_row()
    }

    pub async fn sheet_name(&self) -> String {
        self.sheet.lock().await.name().to_string()
    }
}

pub struct ReceiverServer {
    bind_address: String,
    state: Arc<ReceiverState>,
}

impl ReceiverServer {
    /// Open (or create) the configured sheet
    pub fn new(config: &ReceiverConfig) -> Result<Self> {
        let sheet = CsvSheet::open(&config.log_dir, &config.sheet_name).with_context(|| {
            format!(
                "Failed to open sheet '{}' in {}",
                config.sheet_name,
                config.log_dir.display()
            )
        })?;

        Ok(Self::with_sheet(&config.bind_address, Box::new(sheet)))
    }

    pub fn with_sheet(bind_address: &str, sheet: Box<dyn LogSheet>) -> Self {
        Self {
            bind_address: bind_address.to_string(),
            state: Arc::new(ReceiverState::new(sheet)),
        }
    }

    pub fn state(&self) -> &Arc<ReceiverState> {
        &self.state
    }

    /// Start the HTTP server; returns after Ctrl-C
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.bind_address))?;

        let app = create_router(Arc::clone(&self.state)).layer(TraceLayer::new_for_http());

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Log receiver listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Log receiver failed")?;

        tracing::info!("Log receiver stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
