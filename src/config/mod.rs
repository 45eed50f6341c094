// Configuration module
// Public interface for configuration loading

pub mod constants;
mod loader;
mod settings;

pub use loader::{config_path, load_config, load_from_path};
pub use settings::{ClassifierConfig, Config, ReceiverConfig, ReviewsConfig};
