//! SOAP framing and transport
//!
//! Framing wraps a built 270 in the CORE-rule envelope with WS-Security
//! credentials; transport posts it and returns the raw response body for the
//! parser. Neither layer looks inside the X12 text.

mod envelope;
mod error;
mod transport;

pub use envelope::{frame, frame_with, FramedRequest};
pub use error::{FrameResult, FramingError, TransportError, TransportResult};
pub use transport::{Transport, TransportClient};
