//! Real-time X12 270/271 Medicaid eligibility verification
//!
//! Builds a 270 inquiry, frames it in a CORE-rule SOAP envelope, posts it to
//! the clearinghouse, decodes the 271 (or 999) that comes back, and
//! classifies the member's coverage.
//!
//! # Example
//!
//! ```ignore
//! use elig::{EligibilityChecker, EligibilityRequest};
//!
//! let checker = EligibilityChecker::connect(config, elig::pipeline::DEFAULT_TIMEOUT)?;
//! let result = checker.check(&request).await?;
//! if result.qualifies_for_ffs() {
//!     // schedule the visit
//! }
//! ```

// Re-export the stage crates under stable names
pub use elig_builder as builder;
pub use elig_classify as classify;
pub use elig_parser as parser;
pub use elig_soap as soap;
pub use elig_types as types;
pub use elig_x12 as x12;

// Convenience re-exports
pub use elig_types::{
    EligibilityRequest, EligibilityResult, PlanRegistry, TradingPartnerConfig,
};

mod error;
pub mod pipeline;

pub use error::{EligibilityError, Result};
pub use pipeline::EligibilityChecker;

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
