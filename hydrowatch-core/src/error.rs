use thiserror::Error;

#[derive(Debug, Error)]
pub enum HydrowatchError {
    #[error("Sample store capacity must be at least 1")]
    ZeroCapacity,

    #[error("No telemetry source was provided for the monitor")]
    SourceNotDefined,

    #[error("Channel feed for '{0}' contained no entries")]
    EmptyFeed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Request to '{0}' failed: {1}")]
    Http(String, #[source] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("An error occurred during logging or rendering: {0}")]
    Reporting(#[from] anyhow::Error),
}
