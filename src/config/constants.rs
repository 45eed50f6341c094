// Project-wide constants
//
// Centralised here so URLs, addresses and file names have one source of
// truth. Import via `use crate::config::constants::*;`.

/// Hosted sentiment model used when no endpoint is configured.
pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/siebert/sentiment-roberta-large-english";

/// Review file loaded when no source is configured (resolved against the
/// working directory).
pub const DEFAULT_REVIEWS_SOURCE: &str = "reviews_test.tsv";

/// Default bind address for the log receiver (localhost only).
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8000";

/// Name of the sheet log rows are appended to.
pub const DEFAULT_SHEET_NAME: &str = "logs";

/// Directory under $HOME holding config.toml and the default log directory.
pub const CONFIG_DIR_NAME: &str = ".review-sentiment";

/// Environment variable consulted for the inference token when the config
/// file does not set one.
pub const TOKEN_ENV_VAR: &str = "HF_API_TOKEN";
