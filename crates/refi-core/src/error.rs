use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefiError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error(
        "Invalid sale horizon: selling in {sale} gives {months_until_sale} total payments, \
         but {payments_made} have already been made"
    )]
    InvalidHorizon {
        sale: String,
        months_until_sale: i64,
        payments_made: u32,
    },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RefiError {
    fn from(e: serde_json::Error) -> Self {
        RefiError::SerializationError(e.to_string())
    }
}
