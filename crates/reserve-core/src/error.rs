use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReserveError {
    #[error("Invalid parameter: {field} — {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ReserveError {
    fn from(e: serde_json::Error) -> Self {
        ReserveError::SerializationError(e.to_string())
    }
}
