use shield_types::{ComponentId, Request, TraceEntry};

use super::{clamp_unit, component_context_hash, risk_field, scored_entry};
use crate::error::BridgeError;
use crate::traits::RiskBridge;

/// Sentinel AI bridge.
///
/// Network-level anomaly signal. Reads `sentinel_risk` (default 0.20).
pub struct SentinelBridge;

impl SentinelBridge {
    const DEFAULT_RISK: f64 = 0.20;

    pub fn new() -> Self {
        Self
    }
}

impl Default for SentinelBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskBridge for SentinelBridge {
    fn component(&self) -> ComponentId {
        ComponentId::Sentinel
    }

    fn evaluate(&self, request: &Request) -> Result<TraceEntry, BridgeError> {
        let name = self.component().name();
        let hash = component_context_hash(name, request)?;
        let score = risk_field(&request.payload, "sentinel_risk", Self::DEFAULT_RISK);
        Ok(scored_entry(self.component(), hash, clamp_unit(score)))
    }
}
