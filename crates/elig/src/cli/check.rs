//! The `check` command

use crate::cli::{load_config, output};
use crate::pipeline::EligibilityChecker;
use anyhow::Result;
use chrono::NaiveDate;
use elig_types::{DateRange, EligibilityRequest, Gender};
use std::path::Path;
use std::time::Duration;

/// Patient identity for one check, as parsed from the command line
#[derive(Debug, Clone)]
pub struct CheckParams {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Option<Gender>,
    pub member_id: String,
    pub service_start: Option<NaiveDate>,
    pub service_end: Option<NaiveDate>,
    /// Print the full JSON result instead of the one-line summary
    pub json: bool,
}

/// Run one eligibility check and print the outcome
pub async fn run(config_path: &Path, params: CheckParams) -> Result<()> {
    let config = load_config(config_path)?;

    let service_dates = match (params.service_start, params.service_end) {
        (Some(start), Some(end)) => Some(DateRange { start, end }),
        (Some(start), None) => Some(DateRange::single(start)),
        (None, _) => None,
    };
    let request = EligibilityRequest {
        first_name: params.first_name,
        last_name: params.last_name,
        date_of_birth: params.date_of_birth,
        gender: params.gender,
        member_id: params.member_id,
        service_dates,
        trace_reference: None,
    };

    let mut checker = EligibilityChecker::connect(
        config.partner,
        Duration::from_secs(config.timeout_secs),
    )?;
    if let Some(registry) = config.registry {
        checker = checker.with_registry(registry);
    }

    let result = checker.check(&request).await?;
    if params.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", output::format_result(&result));
    }

    // Shell-friendly: 0 qualifies, 1 everything else
    if !result.qualifies_for_ffs() {
        std::process::exit(1);
    }
    Ok(())
}
