//! Plan-name registries
//!
//! Classification is driven by configuration, not hard-coded string checks:
//! an MCO registry (pattern plus display name), an exclusion list for
//! non-payer vendors that show up in plan text, and an FFS registry mapping
//! plan-name patterns to qualifying categories. New payers are added by
//! editing configuration, never classification code.

use serde::{Deserialize, Serialize};

/// A managed-care organization entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McoEntry {
    /// Case-insensitive substring to match in plan text
    pub pattern: String,
    /// Display name reported back in the result
    pub name: String,
}

/// FFS-qualifying category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FfsCategory {
    /// Traditional fee-for-service Medicaid
    Traditional,
    /// Targeted Adult Medicaid
    TargetedAdult,
}

/// A fee-for-service registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FfsEntry {
    /// Case-insensitive substring to match in plan text
    pub pattern: String,
    /// Category the match maps to
    pub category: FfsCategory,
}

/// The full classification registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRegistry {
    /// Managed-care organizations, checked first
    #[serde(default)]
    pub managed_care: Vec<McoEntry>,
    /// Non-payer vendor patterns (transportation brokers and the like) that
    /// must never count as a managed-care match
    #[serde(default)]
    pub exclusions: Vec<String>,
    /// FFS plan-name patterns, checked in order; more specific entries
    /// (Targeted Adult) must precede broader ones (Traditional)
    #[serde(default)]
    pub fee_for_service: Vec<FfsEntry>,
}

impl PlanRegistry {
    /// The Utah Medicaid registry this program launched with.
    ///
    /// The authoritative category boundary is not published; these entries
    /// are inferred from observed responses and are expected to change, which
    /// is why the registry is data, not logic.
    pub fn utah_defaults() -> Self {
        let mco = |pattern: &str, name: &str| McoEntry {
            pattern: pattern.to_string(),
            name: name.to_string(),
        };
        let ffs = |pattern: &str, category: FfsCategory| FfsEntry {
            pattern: pattern.to_string(),
            category,
        };
        Self {
            managed_care: vec![
                mco("MOLINA", "Molina Healthcare"),
                mco("SELECTHEALTH", "SelectHealth"),
                mco("ANTHEM", "Anthem BCBS"),
                mco("HEALTHY U", "Healthy U"),
                mco("U OF U HEALTH", "U of U Health Plans"),
            ],
            exclusions: vec![
                "MODIVCARE".to_string(),
                "LOGISTICARE".to_string(),
                "TRANSPORTATION".to_string(),
            ],
            fee_for_service: vec![
                ffs("TARGETED ADULT", FfsCategory::TargetedAdult),
                ffs("TRADITIONAL ADULT", FfsCategory::Traditional),
                ffs("TRADITIONAL", FfsCategory::Traditional),
            ],
        }
    }

    /// Whether text names an excluded non-payer vendor
    pub fn is_excluded(&self, text: &str) -> bool {
        let upper = text.to_uppercase();
        self.exclusions
            .iter()
            .any(|excl| upper.contains(&excl.to_uppercase()))
    }

    /// First managed-care entry whose pattern appears in the text.
    ///
    /// Excluded vendor names never match, whatever else the text contains.
    pub fn match_mco(&self, text: &str) -> Option<&McoEntry> {
        if self.is_excluded(text) {
            return None;
        }
        let upper = text.to_uppercase();
        self.managed_care
            .iter()
            .find(|entry| upper.contains(&entry.pattern.to_uppercase()))
    }

    /// First FFS entry whose pattern appears in the text
    pub fn match_ffs(&self, text: &str) -> Option<FfsCategory> {
        let upper = text.to_uppercase();
        self.fee_for_service
            .iter()
            .find(|entry| upper.contains(&entry.pattern.to_uppercase()))
            .map(|entry| entry.category)
    }
}

impl Default for PlanRegistry {
    fn default() -> Self {
        Self::utah_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("MOLINA HEALTHCARE OF UTAH", "Molina Healthcare")]
    #[case("selecthealth community care", "SelectHealth")]
    #[case("HEALTHY U MEDICAID", "Healthy U")]
    fn mco_matching_is_case_insensitive_substring(#[case] text: &str, #[case] name: &str) {
        let registry = PlanRegistry::utah_defaults();
        assert_eq!(registry.match_mco(text).unwrap().name, name);
    }

    #[test]
    fn excluded_vendors_never_match_as_mco() {
        let mut registry = PlanRegistry::utah_defaults();
        registry.managed_care.push(McoEntry {
            pattern: "MODIVCARE".into(),
            name: "Modivcare".into(),
        });
        assert!(registry.match_mco("MODIVCARE SOLUTIONS").is_none());
    }

    #[test]
    fn targeted_adult_wins_over_traditional() {
        let registry = PlanRegistry::utah_defaults();
        assert_eq!(
            registry.match_ffs("TARGETED ADULT MEDICAID"),
            Some(FfsCategory::TargetedAdult)
        );
        assert_eq!(
            registry.match_ffs("TRADITIONAL MEDICAID"),
            Some(FfsCategory::Traditional)
        );
    }

    #[test]
    fn registry_is_plain_data() {
        let toml = r#"
            exclusions = ["BROKER"]

            [[managed_care]]
            pattern = "ACME"
            name = "Acme Health"

            [[fee_for_service]]
            pattern = "STATE PLAN"
            category = "traditional"
        "#;
        let registry: PlanRegistry = toml::from_str(toml).unwrap();
        assert_eq!(registry.match_mco("ACME PLAN").unwrap().name, "Acme Health");
        assert_eq!(registry.match_ffs("STATE PLAN"), Some(FfsCategory::Traditional));
    }
}
