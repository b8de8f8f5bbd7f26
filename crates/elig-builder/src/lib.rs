//! X12 270 message builder
//!
//! Turns an [`EligibilityRequest`] plus a [`TradingPartnerConfig`] into a
//! complete 005010X279A1 interchange. Every segment passes schema validation
//! before it is accepted, so format problems fail locally as a
//! [`BuildError`] instead of coming back as a remote 999.

mod error;

pub use error::{BuildError, BuildResult};

use chrono::{NaiveDate, Utc};
use elig_types::{DateRange, EligibilityRequest, Gender, TradingPartnerConfig};
use elig_x12::{validate, ControlNumbers, X12Message, X12Segment};

const TRACE_REFERENCE_LEN: usize = 10;
const IMPLEMENTATION_VERSION: &str = "005010X279A1";
const TRANSACTION_CONTROL: &str = "0001";

/// Build a 270 interchange for one inquiry.
///
/// Control numbers and the generated trace reference come from the shared
/// [`ControlNumbers`] counter; everything else is a pure function of the
/// request and configuration.
pub fn build(
    request: &EligibilityRequest,
    config: &TradingPartnerConfig,
    control: &ControlNumbers,
) -> BuildResult<X12Message> {
    require_field("member_id", &request.member_id)?;
    require_field("last_name", &request.last_name)?;
    require_field("first_name", &request.first_name)?;

    let trace_reference = match &request.trace_reference {
        Some(reference) => {
            let len = reference.chars().count();
            if len > TRACE_REFERENCE_LEN {
                return Err(BuildError::FieldTooLong {
                    field: "trace_reference",
                    len,
                    max: TRACE_REFERENCE_LEN,
                });
            }
            reference.clone()
        }
        None => control.next_trace(),
    };

    let now = Utc::now();
    let control_number = control.next_control();
    let date6 = now.format("%y%m%d").to_string();
    let date8 = now.format("%Y%m%d").to_string();
    let time4 = now.format("%H%M").to_string();

    let service_dates = request
        .service_dates
        .unwrap_or_else(|| DateRange::single(now.date_naive()));

    // Unset gender defaults to M: the payer accepts only M or F, and the
    // default is the documented rule for this inquiry path.
    let gender = request.gender.unwrap_or(Gender::Male);

    let mut interchange = Interchange::default();

    interchange.push(X12Segment::new(
        "ISA",
        vec![
            "00".into(),
            " ".repeat(10),
            "00".into(),
            " ".repeat(10),
            "ZZ".into(),
            pad_id(&config.trading_partner, 15),
            "ZZ".into(),
            pad_id(&config.receiver_id, 15),
            date6,
            time4.clone(),
            config.delimiters.repetition.to_string(),
            "00501".into(),
            control_number.clone(),
            "1".into(),
            config.usage_indicator().into(),
            config.delimiters.component.to_string(),
        ],
    ))?;
    interchange.push(X12Segment::new(
        "GS",
        vec![
            "HS".into(),
            config.trading_partner.clone(),
            config.receiver_id.clone(),
            date8.clone(),
            time4.clone(),
            control_number.clone(),
            "X".into(),
            IMPLEMENTATION_VERSION.into(),
        ],
    ))?;
    interchange.push(X12Segment::new(
        "ST",
        vec![
            "270".into(),
            TRANSACTION_CONTROL.into(),
            IMPLEMENTATION_VERSION.into(),
        ],
    ))?;
    interchange.push(X12Segment::new(
        "BHT",
        vec!["0022".into(), "13".into(), String::new(), date8, time4],
    ))?;

    // 2100A information source (payer)
    interchange.push(X12Segment::new(
        "HL",
        vec!["1".into(), String::new(), "20".into(), "1".into()],
    ))?;
    interchange.push(X12Segment::new(
        "NM1",
        vec![
            "PR".into(),
            "2".into(),
            config.payer_name.to_uppercase(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            "46".into(),
            config.receiver_id.clone(),
        ],
    ))?;

    // 2100B information receiver (provider). The qualifier is XX because the
    // value is an NPI; a license-number qualifier never pairs with an NPI.
    interchange.push(X12Segment::new(
        "HL",
        vec!["2".into(), "1".into(), "21".into(), "1".into()],
    ))?;
    interchange.push(X12Segment::new(
        "NM1",
        vec![
            "1P".into(),
            "1".into(),
            config.provider_last_name.to_uppercase(),
            config.provider_first_name.to_uppercase(),
            String::new(),
            String::new(),
            String::new(),
            "XX".into(),
            config.provider_npi.clone(),
        ],
    ))?;

    // 2100C subscriber, with exactly one TRN
    interchange.push(X12Segment::new(
        "HL",
        vec!["3".into(), "2".into(), "22".into(), "0".into()],
    ))?;
    interchange.push(X12Segment::new(
        "TRN",
        vec![
            "1".into(),
            trace_reference,
            trace_originator(&config.provider_npi),
        ],
    ))?;
    interchange.push(X12Segment::new(
        "NM1",
        vec![
            "IL".into(),
            "1".into(),
            request.last_name.to_uppercase(),
            request.first_name.to_uppercase(),
            String::new(),
            String::new(),
            String::new(),
            "MI".into(),
            request.member_id.clone(),
        ],
    ))?;
    interchange.push(X12Segment::new(
        "DMG",
        vec![
            "D8".into(),
            format_date(request.date_of_birth),
            gender.as_x12().into(),
        ],
    ))?;
    interchange.push(X12Segment::new(
        "DTP",
        vec![
            "291".into(),
            "RD8".into(),
            format!(
                "{}-{}",
                format_date(service_dates.start),
                format_date(service_dates.end)
            ),
        ],
    ))?;
    for service_type in service_types(config) {
        interchange.push(X12Segment::new("EQ", vec![service_type]))?;
    }

    // SE01 is counted from what was actually emitted, never hard-coded.
    let transaction_count = interchange.segments_since_st();
    interchange.push(X12Segment::new(
        "SE",
        vec![transaction_count.to_string(), TRANSACTION_CONTROL.into()],
    ))?;
    interchange.push(X12Segment::new(
        "GE",
        vec!["1".into(), control_number.clone()],
    ))?;
    interchange.push(X12Segment::new("IEA", vec!["1".into(), control_number]))?;

    Ok(interchange.into_message())
}

/// Accumulates schema-validated segments
#[derive(Default)]
struct Interchange {
    segments: Vec<X12Segment>,
}

impl Interchange {
    fn push(&mut self, segment: X12Segment) -> BuildResult<()> {
        validate(&segment)?;
        self.segments.push(segment);
        Ok(())
    }

    /// Count of segments strictly after the ST marker
    fn segments_since_st(&self) -> usize {
        self.segments
            .iter()
            .position(|s| s.tag == "ST")
            .map(|st| self.segments.len() - st - 1)
            .unwrap_or(0)
    }

    fn into_message(self) -> X12Message {
        X12Message::new(self.segments)
    }
}

fn require_field(field: &'static str, value: &str) -> BuildResult<()> {
    if value.trim().is_empty() {
        return Err(BuildError::MissingField { field });
    }
    Ok(())
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Left-justified, space-padded fixed-width id for the ISA header
fn pad_id(id: &str, width: usize) -> String {
    format!("{id:<width$}")
}

/// TRN03 originator: the provider identifier normalized to exactly 10
/// characters. Deterministic per provider, independent of request content.
fn trace_originator(npi: &str) -> String {
    let mut originator: String = npi.chars().take(TRACE_REFERENCE_LEN).collect();
    while originator.chars().count() < TRACE_REFERENCE_LEN {
        originator.push('0');
    }
    originator
}

fn service_types(config: &TradingPartnerConfig) -> Vec<String> {
    if config.service_types.is_empty() {
        vec!["30".to_string()]
    } else {
        config.service_types.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn originator_is_exactly_ten_characters() {
        assert_eq!(trace_originator("1275348807"), "1275348807");
        assert_eq!(trace_originator("12753"), "1275300000");
        assert_eq!(trace_originator("127534880712"), "1275348807");
    }

    #[test]
    fn pad_id_is_fixed_width() {
        assert_eq!(pad_id("HT009582-001", 15), "HT009582-001   ");
        assert_eq!(pad_id("HT009582-001", 15).len(), 15);
    }
}
