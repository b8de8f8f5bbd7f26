//! Framing and transport failures

use thiserror::Error;

/// Result type for envelope framing
pub type FrameResult<T> = Result<T, FramingError>;

/// An envelope that must not be transmitted.
///
/// The clearinghouse validates these fields by exact length and rejects the
/// whole request on a mismatch, so they are checked before anything leaves
/// the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FramingError {
    /// The Created timestamp is not one of the two accepted shapes
    #[error("Created timestamp {value:?} is {len} chars; must be exactly 20 or 24")]
    BadTimestampLength { value: String, len: usize },

    /// The PayloadID is not a canonical 36-character UUID
    #[error("PayloadID {value:?} is {len} chars; must be exactly 36")]
    BadPayloadIdLength { value: String, len: usize },
}

/// Result type for the HTTP exchange
pub type TransportResult<T> = Result<T, TransportError>;

/// A request that failed at the HTTP layer
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request failed at the connection level, after the single retry
    #[error("request to {endpoint} failed: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request deadline expired, after the single retry
    #[error("request to {endpoint} timed out: {source}")]
    Timeout {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status
    #[error("endpoint answered {status}: {excerpt}")]
    Status {
        status: u16,
        /// First part of the response body, bounded so log lines stay sane
        excerpt: String,
    },

    /// The response body could not be read
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}
