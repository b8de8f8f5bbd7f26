//! X12 payload decoding
//!
//! Splits the payload with the delimiters its own ISA header declares,
//! reconciles the envelope bookkeeping, then routes on the transaction set
//! identifier: 271 to the loop decoder, 999 to the acknowledgment decoder.

use crate::error::{ParseResult, ProtocolError};
use elig_types::{AckError, Loops271, ParsedResponse};
use elig_x12::{Delimiters, X12Message, X12Segment};

pub(crate) fn decode(x12: &str) -> ParseResult<ParsedResponse> {
    let trimmed = x12.trim_start();
    let delimiters = Delimiters::from_isa(trimmed)?;
    let message = X12Message::parse_wire(trimmed, &delimiters);
    check_envelope(&message)?;

    let transaction = message
        .transaction_type()
        .ok_or(ProtocolError::MissingSegment { tag: "ST" })?;
    match transaction {
        "271" => Ok(ParsedResponse::Benefit271(decode_271(&message))),
        "999" => Ok(ParsedResponse::Ack999(decode_999(&message)?)),
        other => Err(ProtocolError::UnsupportedTransaction {
            found: other.to_string(),
        }),
    }
}

/// Reconcile segment counts and control numbers across the envelope pairs
fn check_envelope(message: &X12Message) -> ParseResult<()> {
    let isa = message
        .find("ISA")
        .ok_or(ProtocolError::MissingSegment { tag: "ISA" })?;
    let iea = message
        .find("IEA")
        .ok_or(ProtocolError::MissingSegment { tag: "IEA" })?;
    if isa.element(13) != iea.element(2) {
        return Err(ProtocolError::ControlMismatch {
            envelope: "interchange",
            header: isa.element(13).to_string(),
            trailer: iea.element(2).to_string(),
        });
    }

    if let (Some(gs), Some(ge)) = (message.find("GS"), message.find("GE")) {
        if gs.element(6) != ge.element(2) {
            return Err(ProtocolError::ControlMismatch {
                envelope: "functional group",
                header: gs.element(6).to_string(),
                trailer: ge.element(2).to_string(),
            });
        }
    }

    let st = message
        .find("ST")
        .ok_or(ProtocolError::MissingSegment { tag: "ST" })?;
    let se = message
        .find("SE")
        .ok_or(ProtocolError::MissingSegment { tag: "SE" })?;
    if st.element(2) != se.element(2) {
        return Err(ProtocolError::ControlMismatch {
            envelope: "transaction set",
            header: st.element(2).to_string(),
            trailer: se.element(2).to_string(),
        });
    }

    let declared: usize = se.element(1).parse().map_err(|_| {
        ProtocolError::MalformedInterchange(format!(
            "SE01 {:?} is not a segment count",
            se.element(1)
        ))
    })?;
    let actual = message
        .transaction_segment_count()
        .ok_or_else(|| ProtocolError::MalformedInterchange("SE precedes ST".to_string()))?;
    if declared != actual {
        return Err(ProtocolError::SegmentCountMismatch { declared, actual });
    }
    Ok(())
}

/// Rebuild the 271 loop hierarchy.
///
/// HL03 names the level: 20 information source, 21 information receiver,
/// 22 subscriber. Every segment of a loop is retained in original order;
/// segments before the first HL (BHT and friends) belong to no loop.
fn decode_271(message: &X12Message) -> Loops271 {
    let mut loops = Loops271::default();
    let mut current: Option<Level> = None;

    for segment in transaction_segments(message) {
        if segment.tag == "HL" {
            current = match segment.element(3) {
                "20" => Some(Level::Payer),
                "21" => Some(Level::Provider),
                "22" => Some(Level::Subscriber),
                _ => None,
            };
        }
        let target = match current {
            Some(Level::Payer) => &mut loops.payer,
            Some(Level::Provider) => &mut loops.provider,
            Some(Level::Subscriber) => &mut loops.subscriber,
            None => continue,
        };
        target.segments.push(segment.clone());
    }
    loops
}

#[derive(Clone, Copy)]
enum Level {
    Payer,
    Provider,
    Subscriber,
}

/// Collect acknowledgment error triples from a 999.
///
/// Each IK3 names a segment position; each IK4 under it contributes one
/// element-level triple. An IK3 with no IK4 children contributes a single
/// segment-level triple (no element position). Codes are carried verbatim;
/// interpreting them is not the parser's job.
fn decode_999(message: &X12Message) -> ParseResult<Vec<AckError>> {
    let mut errors = Vec::new();
    let mut open_ik3: Option<(usize, String, bool)> = None;

    for segment in transaction_segments(message) {
        match segment.tag.as_str() {
            "IK3" => {
                flush_ik3(&mut errors, open_ik3.take());
                let position: usize = segment.element(2).parse().map_err(|_| {
                    ProtocolError::MalformedInterchange(format!(
                        "IK3 segment position {:?} is not numeric",
                        segment.element(2)
                    ))
                })?;
                open_ik3 = Some((position, segment.element(4).to_string(), false));
            }
            "IK4" => {
                let Some((segment_position, _, ref mut saw_ik4)) = open_ik3 else {
                    return Err(ProtocolError::MalformedInterchange(
                        "IK4 without a preceding IK3".to_string(),
                    ));
                };
                let element_position: usize = segment.element(1).parse().map_err(|_| {
                    ProtocolError::MalformedInterchange(format!(
                        "IK4 element position {:?} is not numeric",
                        segment.element(1)
                    ))
                })?;
                *saw_ik4 = true;
                errors.push(AckError {
                    segment_position,
                    element_position: Some(element_position),
                    code: segment.element(3).to_string(),
                });
            }
            // AK2 opens the next acknowledged transaction set; IK5/AK9 close
            // out reporting. All of them end any open IK3.
            "AK2" | "IK5" | "AK9" => flush_ik3(&mut errors, open_ik3.take()),
            _ => {}
        }
    }
    flush_ik3(&mut errors, open_ik3.take());
    Ok(errors)
}

fn flush_ik3(errors: &mut Vec<AckError>, open: Option<(usize, String, bool)>) {
    if let Some((segment_position, code, saw_ik4)) = open {
        if !saw_ik4 {
            errors.push(AckError {
                segment_position,
                element_position: None,
                code,
            });
        }
    }
}

/// Segments strictly between ST and SE
fn transaction_segments(message: &X12Message) -> impl Iterator<Item = &X12Segment> {
    message
        .segments
        .iter()
        .skip_while(|s| s.tag != "ST")
        .skip(1)
        .take_while(|s| s.tag != "SE")
}
