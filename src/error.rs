use std::io;

/// Errors raised while extracting owner/repo/branch data from a payload.
///
/// All variants end up folded into a status-400 outcome at the pipeline
/// boundary; they never escape a validation call.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field: {0}")]
    MissingField(&'static str),
}

/// Errors raised while loading validator configuration from disk.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io { path: String, source: io::Error },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}
