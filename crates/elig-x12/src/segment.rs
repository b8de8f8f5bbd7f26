//! A single X12 segment: a tag plus ordered elements

use crate::Delimiters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One segment of an X12 message.
///
/// Elements are stored in wire order; empty strings keep unpopulated
/// positions so that element numbering is stable (`NM1*PR*2*NAME*****46*ID`
/// keeps its five empty slots).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct X12Segment {
    /// Segment tag (`ISA`, `NM1`, `EB`, ...)
    pub tag: String,
    /// Ordered element values, position 1 first
    pub elements: Vec<String>,
}

impl X12Segment {
    /// Create a segment from a tag and its elements
    pub fn new(tag: impl Into<String>, elements: Vec<String>) -> Self {
        Self {
            tag: tag.into(),
            elements,
        }
    }

    /// Element value by X12 position (1-based), or `""` when absent.
    ///
    /// `segment.element(1)` is the first element after the tag, matching how
    /// implementation guides number them (EB01, NM103, ...).
    pub fn element(&self, position: usize) -> &str {
        position
            .checked_sub(1)
            .and_then(|i| self.elements.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Serialize to wire text, terminator included
    pub fn serialize(&self, delimiters: &Delimiters) -> String {
        let mut out = String::with_capacity(self.tag.len() + self.elements.len() * 8);
        out.push_str(&self.tag);
        for element in &self.elements {
            out.push(delimiters.element);
            out.push_str(element);
        }
        out.push(delimiters.segment);
        out
    }

    /// Split one terminator-stripped segment into tag and elements
    pub fn parse(text: &str, delimiters: &Delimiters) -> Self {
        let mut parts = text.split(delimiters.element);
        let tag = parts.next().unwrap_or("").to_string();
        let elements = parts.map(str::to_string).collect();
        Self { tag, elements }
    }
}

impl fmt::Display for X12Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize(&Delimiters::default()))
    }
}
