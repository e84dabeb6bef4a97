use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChurnError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{kind} '{key}' not present in the data")]
    MissingCategory { kind: &'static str, key: String },

    #[error("churn category '{category}' has no reasons")]
    EmptyCategory { category: String },

    #[error("invalid filter: {reason}")]
    InvalidFilter { reason: String },
}

pub type ChurnResult<T> = Result<T, ChurnError>;
