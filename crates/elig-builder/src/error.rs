//! Build-time failures
//!
//! These are local and fatal for the request; nothing that fails here is
//! ever transmitted.

use elig_x12::SchemaViolation;
use thiserror::Error;

/// Result type for message building
pub type BuildResult<T> = Result<T, BuildError>;

/// A request that cannot become a valid 270
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Required request field missing or empty
    #[error("required field {field} is missing or empty")]
    MissingField { field: &'static str },

    /// Field exceeds its wire limit; truncating would silently change
    /// externally visible data, so the build fails instead
    #[error("field {field} is {len} characters, maximum {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// An emitted segment violated the segment schema
    #[error(transparent)]
    Schema(#[from] SchemaViolation),
}
