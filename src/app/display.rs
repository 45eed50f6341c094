// Display state for the analyze front end

use crossterm::style::Stylize;

use crate::classifier::Sentiment;

/// Shown in place of a label when the model response has the wrong shape
pub const UNPARSEABLE_LABEL: &str = "Could not parse API response";

/// What the sentiment slot currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indicator {
    #[default]
    Empty,
    /// Request in flight
    Spinner,
    Sentiment(Sentiment),
}

/// Everything the user can see, as plain data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Display {
    pub review: String,
    pub indicator: Indicator,
    pub label: String,
    pub error: Option<String>,
    pub loading: Option<String>,
    pub analyze_enabled: bool,
}

impl Display {
    pub fn show_loading(&mut self, message: impl Into<String>) {
        self.loading = Some(message.into());
    }

    pub fn hide_loading(&mut self) {
        self.loading = None;
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn hide_error(&mut self) {
        self.error = None;
    }

    pub fn clear_sentiment(&mut self) {
        self.indicator = Indicator::Empty;
        self.label.clear();
    }

    pub fn clear_review(&mut self) {
        self.review.clear();
    }

    pub fn show_spinner(&mut self) {
        self.indicator = Indicator::Spinner;
        self.label.clear();
    }

    pub fn set_sentiment(&mut self, sentiment: Sentiment) {
        self.indicator = Indicator::Sentiment(sentiment);
        self.label = sentiment.label().to_string();
    }

    pub fn sentiment(&self) -> Option<Sentiment> {
        match self.indicator {
            Indicator::Sentiment(sentiment) => Some(sentiment),
            _ => None,
        }
    }

    /// Terminal rendering of the current state
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        if let Some(loading) = &self.loading {
            lines.push(format!("{}", loading.as_str().dark_grey()));
        }

        if !self.review.is_empty() {
            lines.push(format!("{} {}", "Review:".bold(), self.review));
        }

        let icon = match self.indicator {
            Indicator::Empty => None,
            Indicator::Spinner => Some(format!("{}", "…".blue())),
            Indicator::Sentiment(Sentiment::Positive) => Some(format!("{}", "👍".green())),
            Indicator::Sentiment(Sentiment::Negative) => Some(format!("{}", "👎".red())),
            Indicator::Sentiment(Sentiment::Neutral) => Some(format!("{}", "?".yellow())),
        };
        match (icon, self.label.is_empty()) {
            (Some(icon), true) => lines.push(format!("{} {}", "Sentiment:".bold(), icon)),
            (Some(icon), false) => {
                lines.push(format!("{} {} {}", "Sentiment:".bold(), icon, self.label))
            }
            (None, false) => lines.push(format!("{} {}", "Sentiment:".bold(), self.label)),
            (None, true) => {}
        }

        if let Some(error) = &self.error {
            lines.push(format!("{}", error.as_str().red()));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_sentiment_sets_label() {
        let mut display = Display::default();
        display.set_sentiment(Sentiment::Negative);
        assert_eq!(display.sentiment(), Some(Sentiment::Negative));
        assert_eq!(display.label, "Negative");
    }

    #[test]
    fn test_spinner_has_no_sentiment() {
        let mut display = Display::default();
        display.set_sentiment(Sentiment::Positive);
        display.show_spinner();
        assert_eq!(display.sentiment(), None);
        assert!(display.label.is_empty());
    }

    #[test]
    fn test_render_includes_review_label_and_error() {
        let mut display = Display {
            review: "Sturdy and quiet.".to_string(),
            ..Default::default()
        };
        display.set_sentiment(Sentiment::Neutral);
        display.show_error("Sentiment analysis failed: API error: 500");

        let rendered = display.render();
        assert!(rendered.contains("Sturdy and quiet."));
        assert!(rendered.contains("Neutral"));
        assert!(rendered.contains("API error: 500"));
    }

    #[test]
    fn test_render_empty_display() {
        assert!(Display::default().render().is_empty());
    }
}
