pub mod amortization;
pub mod error;
pub mod tipping_point;
pub mod types;

pub use error::RefiError;
pub use types::*;

/// Standard result type for all refi-core operations
pub type RefiResult<T> = Result<T, RefiError>;
