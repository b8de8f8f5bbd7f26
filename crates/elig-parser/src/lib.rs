//! Clearinghouse response parser
//!
//! Takes the raw SOAP response body, extracts the X12 payload, resolves the
//! delimiters the payload actually declares, and decodes it into a
//! [`ParsedResponse`]: a 271 loop tree or a 999 acknowledgment error list.
//! No interpretation happens here; that is the classifier's job.

mod decode;
mod error;
mod soap;

pub use error::{ParseResult, ProtocolError};
pub use soap::extract_payload;

use elig_types::ParsedResponse;

/// Parse a raw SOAP response body into a structured response
pub fn parse(raw: &str) -> ParseResult<ParsedResponse> {
    let payload = soap::extract_payload(raw)?;
    parse_payload(&payload)
}

/// Parse a bare X12 payload (271 or 999) into a structured response
pub fn parse_payload(x12: &str) -> ParseResult<ParsedResponse> {
    decode::decode(x12)
}
