//! Domain types for the 270/271 eligibility pipeline
//!
//! Everything the pipeline stages exchange lives here: trading-partner
//! configuration, the per-inquiry request, the parsed response tree, the
//! classification result, and the plan-name registries that drive
//! classification.

mod config;
mod registry;
mod request;
mod response;
mod result;

pub use config::TradingPartnerConfig;
pub use registry::{FfsCategory, FfsEntry, McoEntry, PlanRegistry};
pub use request::{DateRange, EligibilityRequest, Gender, GenderParseError};
pub use response::{AckError, BenefitInfo, LoopSegments, Loops271, ParsedResponse};
pub use result::EligibilityResult;
