//! X12 wire primitives
//!
//! This crate provides the leaf types every pipeline stage builds on:
//! delimiters (with resolution from a live ISA header), the declarative
//! segment schema, segment/message types, and the shared control-number
//! counter.

mod control;
mod delimiters;
mod message;
mod schema;
mod segment;

pub use control::ControlNumbers;
pub use delimiters::{DelimiterError, Delimiters};
pub use message::X12Message;
pub use schema::{schema_for, validate, ElementSpec, SchemaViolation, ValueFormat};
pub use segment::X12Segment;
