//! CORE-rule request framing
//!
//! Wraps an X12 270 payload in a CAQH CORE `COREEnvelopeRealTimeRequest`
//! with a WS-Security UsernameToken header. The clearinghouse enforces two
//! exact-length fields: the wsu:Created timestamp (20 chars without
//! milliseconds, 24 with) and the PayloadID (a canonical 36-char UUID). Both
//! are validated here so a bad envelope never reaches the wire.

use crate::error::{FrameResult, FramingError};
use chrono::Utc;
use elig_types::TradingPartnerConfig;
use quick_xml::escape::escape;
use uuid::Uuid;

/// A framed request ready for transmission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedRequest {
    /// Complete SOAP envelope text
    pub envelope: String,
    /// PayloadID carried in the envelope, for correlation with the response
    pub payload_id: String,
    /// wsu:Created timestamp carried in the security header
    pub created: String,
}

/// Frame an X12 payload with a fresh PayloadID and the current time.
pub fn frame(x12: &str, config: &TradingPartnerConfig) -> FrameResult<FramedRequest> {
    let payload_id = Uuid::new_v4().to_string();
    let created = created_timestamp();
    frame_with(x12, config, payload_id, created)
}

/// Frame with caller-supplied PayloadID and Created values.
///
/// Both are length-validated; the generated values from [`frame`] always
/// pass, caller-supplied ones may not.
pub fn frame_with(
    x12: &str,
    config: &TradingPartnerConfig,
    payload_id: String,
    created: String,
) -> FrameResult<FramedRequest> {
    validate_created(&created)?;
    validate_payload_id(&payload_id)?;

    let envelope = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://www.w3.org/2003/05/soap-envelope" xmlns:cor="http://www.caqh.org/SOAP/WSDL/CORERule2.2.0.xsd">
  <soapenv:Header>
    <wsse:Security xmlns:wsse="http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd" soapenv:mustUnderstand="1">
      <wsse:UsernameToken>
        <wsse:Username>{username}</wsse:Username>
        <wsse:Password Type="http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordText">{password}</wsse:Password>
        <wsu:Created xmlns:wsu="http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd">{created}</wsu:Created>
      </wsse:UsernameToken>
    </wsse:Security>
  </soapenv:Header>
  <soapenv:Body>
    <cor:COREEnvelopeRealTimeRequest>
      <PayloadType>X12_270_Request_005010X279A1</PayloadType>
      <ProcessingMode>RealTime</ProcessingMode>
      <PayloadID>{payload_id}</PayloadID>
      <TimeStamp>{created}</TimeStamp>
      <SenderID>{sender}</SenderID>
      <ReceiverID>{receiver}</ReceiverID>
      <CORERuleVersion>2.2.0</CORERuleVersion>
      <Payload>{payload}</Payload>
    </cor:COREEnvelopeRealTimeRequest>
  </soapenv:Body>
</soapenv:Envelope>"#,
        username = escape(&config.username),
        password = escape(&config.password),
        created = created,
        payload_id = payload_id,
        sender = escape(&config.trading_partner),
        receiver = escape(&config.receiver_id),
        payload = escape(x12),
    );

    Ok(FramedRequest {
        envelope,
        payload_id,
        created,
    })
}

/// Current time in the 24-char `CCYY-MM-DDTHH:MM:SS.mmmZ` shape
fn created_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn validate_created(created: &str) -> FrameResult<()> {
    let len = created.chars().count();
    if len == 20 || len == 24 {
        Ok(())
    } else {
        Err(FramingError::BadTimestampLength {
            value: created.to_string(),
            len,
        })
    }
}

fn validate_payload_id(payload_id: &str) -> FrameResult<()> {
    let len = payload_id.chars().count();
    if len == 36 {
        Ok(())
    } else {
        Err(FramingError::BadPayloadIdLength {
            value: payload_id.to_string(),
            len,
        })
    }
}
