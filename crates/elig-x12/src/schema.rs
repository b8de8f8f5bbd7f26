//! Declarative segment schema
//!
//! A static table of element rules per segment tag, checked at build time so
//! format problems surface as local errors instead of remote rejections.

use crate::X12Segment;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Value format constraint for one element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// No constraint beyond length
    Any,
    /// ASCII digits only
    Numeric,
    /// `YYYYMMDD`
    Date8,
    /// `YYMMDD`
    Date6,
    /// `HHMM` (up to `HHMMSSdd`)
    Time,
}

impl fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueFormat::Any => "free-form",
            ValueFormat::Numeric => "numeric",
            ValueFormat::Date8 => "CCYYMMDD date",
            ValueFormat::Date6 => "YYMMDD date",
            ValueFormat::Time => "HHMM time",
        };
        write!(f, "{name}")
    }
}

/// Rules for one element position
#[derive(Debug, Clone, Copy)]
pub struct ElementSpec {
    /// Element id, e.g. `ISA06`
    pub id: &'static str,
    /// Maximum length in characters
    pub max_len: usize,
    /// Whether the element must be populated
    pub required: bool,
    /// Value format constraint
    pub format: ValueFormat,
}

const fn req(id: &'static str, max_len: usize, format: ValueFormat) -> ElementSpec {
    ElementSpec {
        id,
        max_len,
        required: true,
        format,
    }
}

const fn opt(id: &'static str, max_len: usize, format: ValueFormat) -> ElementSpec {
    ElementSpec {
        id,
        max_len,
        required: false,
        format,
    }
}

use ValueFormat::{Any, Date6, Date8, Numeric, Time};

// Element rules for every tag the 270/271/999 grammar uses. Lengths follow
// the 005010 implementation guides, tightened where the clearinghouse imposes
// a harder limit (TRN02/TRN03 are capped at 10). Each list is a const item so
// the table holds `'static` slices.
const ISA: &[ElementSpec] = &[
    req("ISA01", 2, Any),
    opt("ISA02", 10, Any),
    req("ISA03", 2, Any),
    opt("ISA04", 10, Any),
    req("ISA05", 2, Any),
    req("ISA06", 15, Any),
    req("ISA07", 2, Any),
    req("ISA08", 15, Any),
    req("ISA09", 6, Date6),
    req("ISA10", 4, Time),
    req("ISA11", 1, Any),
    req("ISA12", 5, Any),
    req("ISA13", 9, Numeric),
    req("ISA14", 1, Any),
    req("ISA15", 1, Any),
    req("ISA16", 1, Any),
];

const GS: &[ElementSpec] = &[
    req("GS01", 2, Any),
    req("GS02", 15, Any),
    req("GS03", 15, Any),
    req("GS04", 8, Date8),
    req("GS05", 8, Time),
    req("GS06", 9, Numeric),
    req("GS07", 2, Any),
    req("GS08", 12, Any),
];

const ST: &[ElementSpec] = &[
    req("ST01", 3, Numeric),
    req("ST02", 9, Any),
    opt("ST03", 35, Any),
];

const BHT: &[ElementSpec] = &[
    req("BHT01", 4, Any),
    req("BHT02", 2, Any),
    opt("BHT03", 50, Any),
    opt("BHT04", 8, Date8),
    opt("BHT05", 8, Time),
];

const HL: &[ElementSpec] = &[
    req("HL01", 12, Numeric),
    opt("HL02", 12, Numeric),
    req("HL03", 2, Any),
    opt("HL04", 1, Numeric),
];

const NM1: &[ElementSpec] = &[
    req("NM101", 3, Any),
    req("NM102", 1, Any),
    opt("NM103", 60, Any),
    opt("NM104", 35, Any),
    opt("NM105", 25, Any),
    opt("NM106", 10, Any),
    opt("NM107", 10, Any),
    opt("NM108", 2, Any),
    opt("NM109", 80, Any),
];

const TRN: &[ElementSpec] = &[
    req("TRN01", 2, Any),
    req("TRN02", 10, Any),
    opt("TRN03", 10, Any),
    opt("TRN04", 30, Any),
];

const DMG: &[ElementSpec] = &[
    req("DMG01", 3, Any),
    req("DMG02", 8, Date8),
    req("DMG03", 1, Any),
];

const DTP: &[ElementSpec] = &[
    req("DTP01", 3, Any),
    req("DTP02", 3, Any),
    req("DTP03", 35, Any),
];

const EQ: &[ElementSpec] = &[req("EQ01", 2, Any)];
const SE: &[ElementSpec] = &[req("SE01", 10, Numeric), req("SE02", 9, Any)];
const GE: &[ElementSpec] = &[req("GE01", 6, Numeric), req("GE02", 9, Numeric)];
const IEA: &[ElementSpec] = &[req("IEA01", 5, Numeric), req("IEA02", 9, Numeric)];

// Response-side tags, so parsed 271/999 segments can be checked too.
const EB: &[ElementSpec] = &[
    req("EB01", 2, Any),
    opt("EB02", 3, Any),
    opt("EB03", 99, Any),
    opt("EB04", 3, Any),
    opt("EB05", 80, Any),
    opt("EB06", 2, Any),
    opt("EB07", 18, Any),
    opt("EB08", 10, Any),
    opt("EB09", 2, Any),
    opt("EB10", 15, Any),
    opt("EB11", 1, Any),
    opt("EB12", 1, Any),
    opt("EB13", 99, Any),
    opt("EB14", 1, Any),
];

const REF: &[ElementSpec] = &[
    req("REF01", 3, Any),
    opt("REF02", 50, Any),
    opt("REF03", 80, Any),
];

const MSG: &[ElementSpec] = &[req("MSG01", 264, Any)];

const AAA: &[ElementSpec] = &[
    req("AAA01", 1, Any),
    opt("AAA02", 2, Any),
    opt("AAA03", 2, Any),
    opt("AAA04", 1, Any),
];

const AK1: &[ElementSpec] = &[
    req("AK101", 2, Any),
    req("AK102", 9, Numeric),
    opt("AK103", 12, Any),
];

const AK2: &[ElementSpec] = &[
    req("AK201", 3, Numeric),
    req("AK202", 9, Any),
    opt("AK203", 35, Any),
];

const IK3: &[ElementSpec] = &[
    req("IK301", 3, Any),
    req("IK302", 10, Numeric),
    opt("IK303", 4, Any),
    opt("IK304", 3, Any),
];

const IK4: &[ElementSpec] = &[
    req("IK401", 2, Numeric),
    opt("IK402", 4, Numeric),
    req("IK403", 3, Any),
    opt("IK404", 99, Any),
];

const IK5: &[ElementSpec] = &[
    req("IK501", 1, Any),
    opt("IK502", 3, Any),
    opt("IK503", 3, Any),
];

const AK9: &[ElementSpec] = &[
    req("AK901", 1, Any),
    req("AK902", 6, Numeric),
    req("AK903", 6, Numeric),
    req("AK904", 6, Numeric),
    opt("AK905", 3, Any),
];

static SCHEMA: Lazy<HashMap<&'static str, &'static [ElementSpec]>> = Lazy::new(|| {
    HashMap::from([
        ("ISA", ISA),
        ("GS", GS),
        ("ST", ST),
        ("BHT", BHT),
        ("HL", HL),
        ("NM1", NM1),
        ("TRN", TRN),
        ("DMG", DMG),
        ("DTP", DTP),
        ("EQ", EQ),
        ("SE", SE),
        ("GE", GE),
        ("IEA", IEA),
        ("EB", EB),
        ("REF", REF),
        ("MSG", MSG),
        ("AAA", AAA),
        ("AK1", AK1),
        ("AK2", AK2),
        ("IK3", IK3),
        ("IK4", IK4),
        ("IK5", IK5),
        ("AK9", AK9),
    ])
});

/// Look up the element specs for a segment tag
pub fn schema_for(tag: &str) -> Option<&'static [ElementSpec]> {
    SCHEMA.get(tag).copied()
}

/// A segment that violates its schema entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    /// No schema entry for the tag
    #[error("segment tag {tag} has no schema entry")]
    UnknownTag { tag: String },
    /// More elements than the schema declares
    #[error("{tag} carries {found} elements, schema allows at most {max}")]
    TooManyElements { tag: String, found: usize, max: usize },
    /// Required element missing or empty
    #[error("required element {id} is empty")]
    MissingElement { id: &'static str },
    /// Element exceeds its maximum length
    #[error("element {id} is {len} characters, maximum {max}")]
    ElementTooLong { id: &'static str, len: usize, max: usize },
    /// Element value does not match its declared format
    #[error("element {id} value {value:?} is not a valid {format}")]
    BadFormat {
        id: &'static str,
        value: String,
        format: ValueFormat,
    },
}

fn format_ok(value: &str, format: ValueFormat) -> bool {
    let digits = || value.chars().all(|c| c.is_ascii_digit());
    match format {
        ValueFormat::Any => true,
        ValueFormat::Numeric => digits(),
        ValueFormat::Date8 => value.len() == 8 && digits(),
        ValueFormat::Date6 => value.len() == 6 && digits(),
        ValueFormat::Time => (4..=8).contains(&value.len()) && digits(),
    }
}

/// Validate a segment against the schema table.
///
/// Checks element count, required-ness, length, and value format. Must pass
/// before a segment is serialized.
pub fn validate(segment: &X12Segment) -> Result<(), SchemaViolation> {
    let specs = schema_for(&segment.tag).ok_or_else(|| SchemaViolation::UnknownTag {
        tag: segment.tag.clone(),
    })?;

    if segment.elements.len() > specs.len() {
        return Err(SchemaViolation::TooManyElements {
            tag: segment.tag.clone(),
            found: segment.elements.len(),
            max: specs.len(),
        });
    }

    for (i, spec) in specs.iter().enumerate() {
        let value = segment.elements.get(i).map(String::as_str).unwrap_or("");
        if value.is_empty() {
            if spec.required {
                return Err(SchemaViolation::MissingElement { id: spec.id });
            }
            continue;
        }
        let len = value.chars().count();
        if len > spec.max_len {
            return Err(SchemaViolation::ElementTooLong {
                id: spec.id,
                len,
                max: spec.max_len,
            });
        }
        if !format_ok(value, spec.format) {
            return Err(SchemaViolation::BadFormat {
                id: spec.id,
                value: value.to_string(),
                format: spec.format,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn seg(tag: &str, elements: &[&str]) -> X12Segment {
        X12Segment::new(tag, elements.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn accepts_well_formed_dmg() {
        assert_eq!(validate(&seg("DMG", &["D8", "19840717", "M"])), Ok(()));
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = validate(&seg("ZZZ", &["1"])).unwrap_err();
        assert!(matches!(err, SchemaViolation::UnknownTag { .. }));
    }

    #[test]
    fn rejects_missing_required_element() {
        let err = validate(&seg("DMG", &["D8", "", "M"])).unwrap_err();
        assert_eq!(err, SchemaViolation::MissingElement { id: "DMG02" });
    }

    #[test]
    fn rejects_overlong_trace_reference() {
        let err = validate(&seg("TRN", &["1", "12345678901", "1275348807"])).unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::ElementTooLong {
                id: "TRN02",
                len: 11,
                max: 10
            }
        );
    }

    #[test]
    fn rejects_excess_elements() {
        let err = validate(&seg("EQ", &["30", "HM"])).unwrap_err();
        assert!(matches!(err, SchemaViolation::TooManyElements { found: 2, max: 1, .. }));
    }

    #[rstest]
    #[case("1984717")] // seven digits
    #[case("19840717X")]
    #[case("1984-07-1")]
    fn rejects_malformed_dates(#[case] dob: &str) {
        let err = validate(&seg("DMG", &["D8", dob, "M"])).unwrap_err();
        assert!(matches!(err, SchemaViolation::BadFormat { id: "DMG02", .. } | SchemaViolation::ElementTooLong { id: "DMG02", .. }));
    }

    #[test]
    fn table_covers_the_full_grammar() {
        for tag in [
            "ISA", "GS", "ST", "BHT", "HL", "NM1", "TRN", "DMG", "DTP", "EQ", "SE", "GE",
            "IEA", "EB", "REF", "MSG", "AAA", "AK1", "AK2", "IK3", "IK4", "IK5", "AK9",
        ] {
            assert!(schema_for(tag).is_some(), "no entry for {tag}");
        }
        assert_eq!(schema_for("ISA").unwrap().len(), 16);
        assert_eq!(schema_for("EB").unwrap().len(), 14);
    }
}
