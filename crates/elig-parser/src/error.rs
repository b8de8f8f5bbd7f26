//! Protocol-level decode failures
//!
//! A response that cannot be decomposed into segments and loops is surfaced,
//! never retried; the same response would decode the same way again.

use elig_x12::DelimiterError;
use thiserror::Error;

/// Result type for response parsing
pub type ParseResult<T> = Result<T, ProtocolError>;

/// A response that could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// SOAP body carried no payload element
    #[error("SOAP body carries no X12 payload")]
    MissingPayload,

    /// The endpoint answered with a SOAP fault
    #[error("SOAP fault {code}: {reason}")]
    SoapFault { code: String, reason: String },

    /// The SOAP body is not well-formed XML
    #[error("malformed SOAP body: {0}")]
    Xml(String),

    /// Delimiters could not be resolved from the interchange header
    #[error(transparent)]
    Delimiters(#[from] DelimiterError),

    /// The interchange structure itself is broken
    #[error("malformed interchange: {0}")]
    MalformedInterchange(String),

    /// ST01 names a transaction set this pipeline does not decode
    #[error("unrecognized transaction set identifier {found:?}")]
    UnsupportedTransaction { found: String },

    /// SE01 disagrees with the segments actually present
    #[error("SE declares {declared} transaction segments, found {actual}")]
    SegmentCountMismatch { declared: usize, actual: usize },

    /// Header/trailer control numbers do not reconcile
    #[error("{envelope} control numbers do not reconcile ({header} vs {trailer})")]
    ControlMismatch {
        envelope: &'static str,
        header: String,
        trailer: String,
    },

    /// A structurally required segment is absent
    #[error("response is missing its {tag} segment")]
    MissingSegment { tag: &'static str },
}
