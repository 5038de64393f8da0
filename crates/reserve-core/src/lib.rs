pub mod error;
pub mod frequency;
pub mod time_value;
pub mod types;

#[cfg(feature = "multiplier")]
pub mod multiplier;

pub use error::ReserveError;
pub use frequency::CompoundingFrequency;
pub use types::*;

/// Standard result type for all reserve-core operations
pub type ReserveResult<T> = Result<T, ReserveError>;
