//! Output formatting utilities

use colored::Colorize;
use elig_types::EligibilityResult;

/// One-line colored summary of an outcome
pub fn format_result(result: &EligibilityResult) -> String {
    let line = result.to_string();
    match result {
        EligibilityResult::TraditionalFfs | EligibilityResult::TargetedAdultMedicaid => {
            line.green().bold().to_string()
        }
        EligibilityResult::ManagedCare { .. } | EligibilityResult::NotEnrolled => {
            line.yellow().to_string()
        }
        EligibilityResult::Unknown { .. } => line.cyan().to_string(),
        EligibilityResult::Rejected { .. } => line.red().bold().to_string(),
    }
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {error:#}", "Error:".red().bold())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_carries_the_display_text() {
        colored::control::set_override(false);
        assert_eq!(
            format_result(&EligibilityResult::NotEnrolled),
            "not enrolled"
        );
    }
}
