//! SOAP body handling
//!
//! The clearinghouse wraps X12 text in a CORE-rule envelope. The payload is
//! the text content of the `Payload` element, XML-escaped; faults arrive as
//! a `Fault` element with code and reason children.

use crate::error::{ParseResult, ProtocolError};
use quick_xml::events::{BytesRef, Event};
use quick_xml::Reader;

/// Extract the X12 payload text from a SOAP response body.
///
/// Character data is reassembled across entity references, since the reader
/// reports `&amp;` and friends as separate events between text chunks. A
/// SOAP fault is surfaced as [`ProtocolError::SoapFault`]; a well-formed
/// envelope without a payload element is [`ProtocolError::MissingPayload`].
pub fn extract_payload(raw: &str) -> ParseResult<String> {
    let mut reader = Reader::from_str(raw);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current: Option<Field> = None;
    let mut payload: Option<String> = None;
    let mut in_fault = false;
    let mut fault_code = String::new();
    let mut fault_reason = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let local = name.local_name();
                match local.as_ref() {
                    b"Payload" => current = Some(Field::Payload),
                    b"Fault" => in_fault = true,
                    // SOAP 1.1 uses faultcode/faultstring, 1.2 uses
                    // Code/Value and Reason/Text. First element of each wins.
                    b"faultcode" | b"Value" if in_fault && fault_code.is_empty() => {
                        current = Some(Field::FaultCode);
                    }
                    b"faultstring" | b"Text" if in_fault && fault_reason.is_empty() => {
                        current = Some(Field::FaultReason);
                    }
                    _ => current = None,
                }
            }
            Ok(Event::Text(ref t)) => {
                let text = t.decode().map_err(|e| ProtocolError::Xml(e.to_string()))?;
                if let Some(target) =
                    target(current, &mut payload, &mut fault_code, &mut fault_reason)
                {
                    target.push_str(&text);
                }
            }
            Ok(Event::CData(ref c)) => {
                if let Some(target) =
                    target(current, &mut payload, &mut fault_code, &mut fault_reason)
                {
                    target.push_str(&String::from_utf8_lossy(c));
                }
            }
            Ok(Event::GeneralRef(ref r)) => {
                let resolved = resolve_reference(r)?;
                if let Some(target) =
                    target(current, &mut payload, &mut fault_code, &mut fault_reason)
                {
                    target.push(resolved);
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ProtocolError::Xml(e.to_string())),
        }
        buf.clear();
    }

    if in_fault {
        return Err(ProtocolError::SoapFault {
            code: fault_code,
            reason: fault_reason,
        });
    }
    payload
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .ok_or(ProtocolError::MissingPayload)
}

#[derive(Clone, Copy)]
enum Field {
    Payload,
    FaultCode,
    FaultReason,
}

/// Accumulator for the element the reader is currently inside
fn target<'a>(
    current: Option<Field>,
    payload: &'a mut Option<String>,
    fault_code: &'a mut String,
    fault_reason: &'a mut String,
) -> Option<&'a mut String> {
    match current {
        Some(Field::Payload) => Some(payload.get_or_insert_with(String::new)),
        Some(Field::FaultCode) => Some(fault_code),
        Some(Field::FaultReason) => Some(fault_reason),
        None => None,
    }
}

/// Resolve one entity reference: numeric character references plus the five
/// predefined XML entities. Anything else is a decode error.
fn resolve_reference(reference: &BytesRef<'_>) -> ParseResult<char> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| ProtocolError::Xml(e.to_string()))?
    {
        return Ok(ch);
    }
    let name = reference
        .decode()
        .map_err(|e| ProtocolError::Xml(e.to_string()))?;
    match name.as_ref() {
        "amp" => Ok('&'),
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "quot" => Ok('"'),
        "apos" => Ok('\''),
        other => Err(ProtocolError::Xml(format!("unresolvable entity &{other};"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_payload_text_with_entities_unescaped() {
        let raw = r#"<?xml version="1.0"?>
            <soap:Envelope xmlns:soap="http://www.w3.org/2003/05/soap-envelope">
              <soap:Body>
                <cor:COREEnvelopeRealTimeResponse xmlns:cor="http://www.caqh.org/SOAP/WSDL/CORERule2.2.0.xsd">
                  <PayloadID>5b1f6f55-9f1c-4d7a-a9a5-2ea4b6d1c001</PayloadID>
                  <Payload>ISA*00*&amp;TEST~IEA*1*000012345~</Payload>
                </cor:COREEnvelopeRealTimeResponse>
              </soap:Body>
            </soap:Envelope>"#;
        assert_eq!(
            extract_payload(raw).unwrap(),
            "ISA*00*&TEST~IEA*1*000012345~"
        );
    }

    #[test]
    fn text_around_every_entity_is_reassembled_in_order() {
        let raw = "<Envelope><Body><Payload>A&amp;B&lt;C&gt;D&#x7E;E</Payload></Body></Envelope>";
        assert_eq!(extract_payload(raw).unwrap(), "A&B<C>D~E");
    }

    #[test]
    fn missing_payload_is_an_error() {
        let raw = r#"<Envelope><Body><Response/></Body></Envelope>"#;
        assert_eq!(extract_payload(raw), Err(ProtocolError::MissingPayload));
    }

    #[test]
    fn soap_12_fault_is_surfaced_with_code_and_reason() {
        let raw = r#"<soap:Envelope xmlns:soap="http://www.w3.org/2003/05/soap-envelope">
              <soap:Body>
                <soap:Fault>
                  <soap:Code><soap:Value>soap:Sender</soap:Value></soap:Code>
                  <soap:Reason><soap:Text>Authentication failed</soap:Text></soap:Reason>
                </soap:Fault>
              </soap:Body>
            </soap:Envelope>"#;
        assert_eq!(
            extract_payload(raw),
            Err(ProtocolError::SoapFault {
                code: "soap:Sender".into(),
                reason: "Authentication failed".into(),
            })
        );
    }

    #[test]
    fn soap_11_fault_fields_are_recognized() {
        let raw = r#"<Envelope><Body><Fault>
              <faultcode>Client</faultcode>
              <faultstring>PayloadID length &amp; format invalid</faultstring>
            </Fault></Body></Envelope>"#;
        assert_eq!(
            extract_payload(raw),
            Err(ProtocolError::SoapFault {
                code: "Client".into(),
                reason: "PayloadID length & format invalid".into(),
            })
        );
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(matches!(
            extract_payload("<Envelope><Body>"),
            // An unterminated document either errors or simply never yields
            // a payload, depending on where it breaks.
            Err(ProtocolError::Xml(_) | ProtocolError::MissingPayload)
        ));
    }
}
