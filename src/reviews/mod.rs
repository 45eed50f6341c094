// Review loading and random selection

pub mod loader;
mod selector;

pub use loader::{parse_reviews, LoadError, ReviewLoader, ReviewSource, TEXT_COLUMN};
pub use selector::ReviewSet;
