use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("malformed record at position {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("unparsable {field} value '{value}'")]
    UnparsableValue { field: &'static str, value: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
