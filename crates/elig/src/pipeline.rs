//! The assembled check pipeline
//!
//! Build, frame, exchange, parse, classify. The checker owns no per-request
//! state beyond the shared control-number counter, so one instance behind an
//! `Arc` serves any number of concurrent checks; every outcome is returned
//! to its caller and nothing is stored.

use crate::error::Result;
use elig_soap::{Transport, TransportClient};
use elig_types::{EligibilityRequest, EligibilityResult, PlanRegistry, TradingPartnerConfig};
use elig_x12::ControlNumbers;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Default per-request HTTP timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// One configured connection to a clearinghouse
pub struct EligibilityChecker {
    config: Arc<TradingPartnerConfig>,
    registry: PlanRegistry,
    control: ControlNumbers,
    transport: Arc<dyn Transport>,
}

impl EligibilityChecker {
    /// Build a checker over an explicit transport
    pub fn new(config: TradingPartnerConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            registry: PlanRegistry::default(),
            control: ControlNumbers::new(),
            transport,
        }
    }

    /// Build a checker with the production HTTP transport
    pub fn connect(config: TradingPartnerConfig, timeout: Duration) -> Result<Self> {
        let transport = TransportClient::new(timeout).map_err(crate::EligibilityError::from)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    /// Replace the default plan registry
    #[must_use]
    pub fn with_registry(mut self, registry: PlanRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Run one eligibility check end to end.
    ///
    /// Each call builds a fresh 270 with its own control numbers and trace
    /// reference, so the same request value can be checked repeatedly and
    /// concurrently.
    pub async fn check(&self, request: &EligibilityRequest) -> Result<EligibilityResult> {
        let message = elig_builder::build(request, &self.config, &self.control)?;
        let wire = message.serialize(&self.config.delimiters);
        let framed = elig_soap::frame(&wire, &self.config)?;
        info!(
            payload_id = %framed.payload_id,
            member = %request.member_id,
            "submitting eligibility inquiry"
        );

        let body = self
            .transport
            .exchange(&self.config.endpoint, &framed.envelope)
            .await?;
        let parsed = elig_parser::parse(&body)?;
        let result = elig_classify::classify(&parsed, &self.registry);
        info!(payload_id = %framed.payload_id, %result, "eligibility determined");
        Ok(result)
    }
}
