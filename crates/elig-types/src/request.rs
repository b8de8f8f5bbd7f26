//! The per-inquiry eligibility request

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Patient gender as the 270 DMG segment accepts it.
///
/// The transaction set admits only `M` and `F`; there is no third code on
/// this wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// DMG03 `M`
    Male,
    /// DMG03 `F`
    Female,
}

impl Gender {
    /// The DMG03 code
    pub fn as_x12(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_x12())
    }
}

/// Input was not `M` or `F`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("gender must be M or F, got {input:?}")]
pub struct GenderParseError {
    pub input: String,
}

impl FromStr for Gender {
    type Err = GenderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" => Ok(Gender::Male),
            "F" | "f" => Ok(Gender::Female),
            other => Err(GenderParseError {
                input: other.to_string(),
            }),
        }
    }
}

/// Inclusive service date range for the DTP segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Single-day range
    pub fn single(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }
}

/// One eligibility inquiry, owned by one request lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    /// Unset defaults to `M` at build time; the payer rejects anything else
    /// and the default is an accepted business rule for this program.
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Medicaid member id (NM109 with the `MI` qualifier)
    pub member_id: String,
    /// Service date range; defaults to a single-day range of today
    #[serde(default)]
    pub service_dates: Option<DateRange>,
    /// Caller-supplied trace reference (TRN02). At most 10 characters;
    /// longer values fail the build rather than being truncated, since
    /// truncation would silently change correlation data.
    #[serde(default)]
    pub trace_reference: Option<String>,
}
