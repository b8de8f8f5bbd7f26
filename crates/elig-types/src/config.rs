//! Trading-partner configuration
//!
//! Static per-deployment identity, loaded once by the caller and shared
//! read-only across requests. No module-level state anywhere in the pipeline;
//! every stage takes this value explicitly.

use elig_x12::Delimiters;
use serde::{Deserialize, Serialize};

/// Identity and endpoint details for one clearinghouse trading partner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingPartnerConfig {
    /// Submitter trading-partner number (ISA06/GS02), e.g. `HT009582-001`
    pub trading_partner: String,
    /// Payer receiver id (ISA08/GS03), e.g. `HT000004-001`
    pub receiver_id: String,
    /// Payer organization name for the information-source NM1
    pub payer_name: String,
    /// Provider NPI (NM109 with the `XX` qualifier, TRN originator)
    pub provider_npi: String,
    /// Provider last or organization name
    pub provider_last_name: String,
    /// Provider first name, when the provider is a person
    #[serde(default)]
    pub provider_first_name: String,
    /// WS-Security username
    pub username: String,
    /// WS-Security password
    pub password: String,
    /// Clearinghouse SOAP endpoint URL
    pub endpoint: String,
    /// Wire delimiters declared for this partner
    #[serde(default)]
    pub delimiters: Delimiters,
    /// Service type codes to inquire on (EQ01), one EQ segment each
    #[serde(default = "default_service_types")]
    pub service_types: Vec<String>,
    /// Use the interchange test indicator (`T` instead of `P`)
    #[serde(default)]
    pub test_mode: bool,
}

fn default_service_types() -> Vec<String> {
    // 30 = Health Benefit Plan Coverage
    vec!["30".to_string()]
}

impl TradingPartnerConfig {
    /// ISA15 usage indicator for this deployment
    pub fn usage_indicator(&self) -> &'static str {
        if self.test_mode { "T" } else { "P" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_toml_with_defaults() {
        let config: TradingPartnerConfig = toml::from_str(
            r#"
            trading_partner = "HT009582-001"
            receiver_id = "HT000004-001"
            payer_name = "UTAH MEDICAID FFS"
            provider_npi = "1275348807"
            provider_last_name = "DESERT RIDGE CLINIC"
            username = "user"
            password = "secret"
            endpoint = "https://ws.example.org/core/soaptype4"
            "#,
        )
        .unwrap();
        assert_eq!(config.service_types, vec!["30"]);
        assert_eq!(config.delimiters, Delimiters::default());
        assert_eq!(config.usage_indicator(), "P");
    }

    #[test]
    fn test_mode_flips_usage_indicator() {
        let config: TradingPartnerConfig = toml::from_str(
            r#"
            trading_partner = "HT009582-001"
            receiver_id = "HT000004-003"
            payer_name = "UTAH MEDICAID FFS"
            provider_npi = "1275348807"
            provider_last_name = "DESERT RIDGE CLINIC"
            username = "user"
            password = "secret"
            endpoint = "https://ws.example.org/core/soaptype4"
            test_mode = true
            "#,
        )
        .unwrap();
        assert_eq!(config.usage_indicator(), "T");
    }
}
