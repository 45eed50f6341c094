// Application context
// Owns the loaded reviews and display state, and wires the load/analyze
// actions to the review loader and the inference client.

mod display;

pub use display::{Display, Indicator, UNPARSEABLE_LABEL};

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::classifier::{ClassifyError, ClassifyOutcome, Sentiment, SentimentClient};
use crate::reviews::{LoadError, ReviewLoader, ReviewSet, ReviewSource};

pub const LOADING_MESSAGE: &str = "Loading reviews...";
pub const NO_REVIEWS_MESSAGE: &str = "No reviews loaded.";
pub const SELECTION_FAILED_MESSAGE: &str = "Could not select a review.";

/// A review sent for classification, tagged with the click that sent it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnalysis {
    pub ticket: u64,
    pub review: String,
}

pub struct App {
    loader: ReviewLoader,
    source: ReviewSource,
    classifier: SentimentClient,
    reviews: RwLock<ReviewSet>,
    display: RwLock<Display>,
    /// Ticket of the most recent analyze request
    latest_ticket: AtomicU64,
}

impl App {
    pub fn new(loader: ReviewLoader, source: ReviewSource, classifier: SentimentClient) -> Self {
        Self {
            loader,
            source,
            classifier,
            reviews: RwLock::new(ReviewSet::default()),
            display: RwLock::new(Display::default()),
            latest_ticket: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &ReviewSource {
        &self.source
    }

    /// Snapshot of what the user currently sees
    pub async fn display(&self) -> Display {
        self.display.read().await.clone()
    }

    pub async fn review_count(&self) -> usize {
        self.reviews.read().await.len()
    }

    pub async fn can_analyze(&self) -> bool {
        self.display.read().await.analyze_enabled
    }

    /// Load (or reload) reviews, replacing the current set wholesale.
    ///
    /// On failure the set is emptied and analysis stays disabled until a
    /// later load succeeds. The error is also shown on the display.
    pub async fn load_reviews(&self) -> Result<usize, LoadError> {
        {
            let mut display = self.display.write().await;
            display.analyze_enabled = false;
            display.hide_error();
            display.show_loading(LOADING_MESSAGE);
        }

        let result = self.loader.load(&self.source).await;

        let loaded = match &result {
            Ok(set) => set.clone(),
            Err(_) => ReviewSet::default(),
        };
        let count = loaded.len();
        *self.reviews.write().await = loaded;

        let mut display = self.display.write().await;
        display.hide_loading();
        match result {
            Ok(_) => {
                display.analyze_enabled = true;
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Failed to load reviews from {}: {}", self.source, e);
                display.show_error(format!("Error loading reviews: {}", e));
                Err(e)
            }
        }
    }

    /// Pick a random review, classify it and update the display.
    ///
    /// Returns the pending request when one was sent. If another analyze
    /// call started while this one was in flight, this call's response is
    /// discarded.
    pub async fn analyze(&self, token: Option<&str>) -> Option<PendingAnalysis> {
        let pending = self.begin_analysis().await?;
        let result = self.classifier.classify(&pending.review, token).await;
        self.finish_analysis(pending.ticket, result).await;
        Some(pending)
    }

    /// First half of `analyze`: reset the display and choose a review
    pub async fn begin_analysis(&self) -> Option<PendingAnalysis> {
        let mut display = self.display.write().await;
        // Taken under the display lock so ticket order matches display order
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        display.hide_error();
        display.clear_sentiment();
        display.clear_review();

        let reviews = self.reviews.read().await;
        if !display.analyze_enabled || reviews.is_empty() {
            display.show_error(NO_REVIEWS_MESSAGE);
            return None;
        }

        let Some(review) = reviews.random().map(str::to_owned) else {
            display.show_error(SELECTION_FAILED_MESSAGE);
            return None;
        };

        display.review = review.clone();
        display.show_spinner();
        tracing::debug!("Analysis #{} started", ticket);

        Some(PendingAnalysis { ticket, review })
    }

    /// Second half of `analyze`: apply a classification result.
    ///
    /// Returns false when `ticket` is stale and the result was dropped.
    pub async fn finish_analysis(
        &self,
        ticket: u64,
        result: Result<ClassifyOutcome, ClassifyError>,
    ) -> bool {
        let mut display = self.display.write().await;

        let latest = self.latest_ticket.load(Ordering::SeqCst);
        if ticket != latest {
            tracing::debug!("Dropping result of analysis #{} (latest is #{})", ticket, latest);
            return false;
        }

        match result {
            Ok(ClassifyOutcome::Classified {
                sentiment,
                prediction,
            }) => {
                tracing::info!(
                    "Classified as {} ({} {:.3})",
                    sentiment,
                    prediction.label,
                    prediction.score
                );
                display.set_sentiment(sentiment);
            }
            Ok(ClassifyOutcome::Unparseable) => {
                display.set_sentiment(Sentiment::Neutral);
                display.label = UNPARSEABLE_LABEL.to_string();
            }
            Err(e) => {
                tracing::error!("Sentiment analysis failed: {}", e);
                display.set_sentiment(Sentiment::Neutral);
                display.label.clear();
                display.show_error(format!("Sentiment analysis failed: {}", e));
            }
        }

        true
    }
}
