use thiserror::Error;

/// Failures while turning an exported file into rows. No dataset is installed when one occurs.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of row objects, found {0}")]
    NotAnArray(&'static str),
    #[error("row {0} is not a JSON object")]
    NotAnObject(usize),
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),
}
