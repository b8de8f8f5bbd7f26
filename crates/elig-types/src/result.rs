//! The classification outcome

use crate::{AckError, Loops271};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one eligibility check.
///
/// Produced exactly once per request and handed back to the caller; the core
/// keeps nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibilityResult {
    /// Active Traditional fee-for-service Medicaid
    TraditionalFfs,
    /// Active Targeted Adult Medicaid (an FFS-qualifying category)
    TargetedAdultMedicaid,
    /// Enrolled in a managed-care organization
    ManagedCare {
        /// Registry display name of the matched plan
        plan: String,
    },
    /// No benefit segment signals active coverage
    NotEnrolled,
    /// Well-formed 271 that no rule matched; carries the full loop tree for
    /// manual review instead of defaulting either way
    Unknown {
        loops: Loops271,
    },
    /// The 270 was rejected with a 999 functional acknowledgment
    Rejected {
        errors: Vec<AckError>,
    },
}

impl EligibilityResult {
    /// Whether this outcome is in an FFS-qualifying category
    pub fn qualifies_for_ffs(&self) -> bool {
        matches!(
            self,
            EligibilityResult::TraditionalFfs | EligibilityResult::TargetedAdultMedicaid
        )
    }

    /// Whether this outcome needs a human to look at it
    pub fn needs_review(&self) -> bool {
        matches!(self, EligibilityResult::Unknown { .. })
    }
}

impl fmt::Display for EligibilityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityResult::TraditionalFfs => {
                write!(f, "Traditional fee-for-service Medicaid (qualifies)")
            }
            EligibilityResult::TargetedAdultMedicaid => {
                write!(f, "Targeted Adult Medicaid (qualifies)")
            }
            EligibilityResult::ManagedCare { plan } => {
                write!(f, "managed care: {plan} (does not qualify)")
            }
            EligibilityResult::NotEnrolled => write!(f, "not enrolled"),
            EligibilityResult::Unknown { .. } => {
                write!(f, "enrolled, category unclear (needs manual review)")
            }
            EligibilityResult::Rejected { errors } => {
                write!(f, "inquiry rejected ({} acknowledgment errors)", errors.len())
            }
        }
    }
}
