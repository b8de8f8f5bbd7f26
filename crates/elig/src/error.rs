//! Pipeline-level error type
//!
//! Each stage keeps its own error enum; this one exists so a caller can run
//! the whole pipeline behind a single `?`. The stage a failure came from
//! stays visible in the variant.

use elig_builder::BuildError;
use elig_parser::ProtocolError;
use elig_soap::{FramingError, TransportError};
use thiserror::Error;

/// Result type for the assembled pipeline
pub type Result<T> = std::result::Result<T, EligibilityError>;

/// Any failure between accepting a request and producing a classification
#[derive(Debug, Error)]
pub enum EligibilityError {
    /// The 270 could not be built from the request
    #[error("failed to build 270: {0}")]
    Build(#[from] BuildError),

    /// The SOAP envelope failed its pre-transmission checks
    #[error("failed to frame request: {0}")]
    Framing(#[from] FramingError),

    /// The HTTP exchange failed
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The response could not be decoded
    #[error("protocol failure: {0}")]
    Protocol(#[from] ProtocolError),
}
