//! An ordered interchange of segments, ISA through IEA

use crate::{Delimiters, X12Segment};
use serde::{Deserialize, Serialize};

/// A complete X12 interchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct X12Message {
    /// Segments in wire order
    pub segments: Vec<X12Segment>,
}

impl X12Message {
    /// Wrap an ordered segment list
    pub fn new(segments: Vec<X12Segment>) -> Self {
        Self { segments }
    }

    /// Serialize to wire text.
    ///
    /// Each segment ends with the terminator followed by a newline; the
    /// clearinghouse accepts the newlines and they keep captures readable.
    pub fn serialize(&self, delimiters: &Delimiters) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push_str(&segment.serialize(delimiters));
            out.push('\n');
        }
        out
    }

    /// Split wire text into segments using the given delimiters.
    ///
    /// Whitespace around segments (newlines after terminators) is ignored;
    /// empty trailing fragments are dropped.
    pub fn parse_wire(text: &str, delimiters: &Delimiters) -> Self {
        let segments = text
            .split(delimiters.segment)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| X12Segment::parse(s, delimiters))
            .collect();
        Self { segments }
    }

    /// First segment with the given tag
    pub fn find(&self, tag: &str) -> Option<&X12Segment> {
        self.segments.iter().find(|s| s.tag == tag)
    }

    /// Transaction set identifier (ST01), if an ST segment is present
    pub fn transaction_type(&self) -> Option<&str> {
        self.find("ST").map(|st| st.element(1))
    }

    /// Number of segments strictly between ST and SE.
    ///
    /// This is the count SE01 must carry; `None` when either marker is
    /// missing or they are out of order.
    pub fn transaction_segment_count(&self) -> Option<usize> {
        let st = self.segments.iter().position(|s| s.tag == "ST")?;
        let se = self.segments.iter().position(|s| s.tag == "SE")?;
        se.checked_sub(st + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seg(tag: &str, elements: &[&str]) -> X12Segment {
        X12Segment::new(tag, elements.iter().map(|s| s.to_string()).collect())
    }

    fn sample() -> X12Message {
        X12Message::new(vec![
            seg("ST", &["270", "0001", "005010X279A1"]),
            seg("BHT", &["0022", "13", "", "20240815", "1030"]),
            seg("HL", &["1", "", "20", "1"]),
            seg("SE", &["2", "0001"]),
        ])
    }

    #[test]
    fn counts_segments_strictly_between_markers() {
        assert_eq!(sample().transaction_segment_count(), Some(2));
    }

    #[test]
    fn wire_round_trip_recovers_identical_segments() {
        let delimiters = Delimiters::default();
        let wire = sample().serialize(&delimiters);
        let parsed = X12Message::parse_wire(&wire, &delimiters);
        assert_eq!(parsed, sample());
    }

    #[test]
    fn transaction_type_reads_st01() {
        assert_eq!(sample().transaction_type(), Some("270"));
    }
}
