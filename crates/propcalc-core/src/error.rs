use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PropCalcError {
    fn from(e: serde_json::Error) -> Self {
        PropCalcError::SerializationError(e.to_string())
    }
}
