use shield_types::{ComponentId, Request, TraceEntry};

use super::{clamp_unit, component_context_hash, risk_field, scored_entry};
use crate::error::BridgeError;
use crate::traits::RiskBridge;

/// ADN bridge (autonomous defense node). Reads `node_risk` (default 0.20).
pub struct AdnBridge;

impl AdnBridge {
    const DEFAULT_RISK: f64 = 0.20;

    pub fn new() -> Self {
        Self
    }
}

impl Default for AdnBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskBridge for AdnBridge {
    fn component(&self) -> ComponentId {
        ComponentId::Adn
    }

    fn evaluate(&self, request: &Request) -> Result<TraceEntry, BridgeError> {
        let name = self.component().name();
        let hash = component_context_hash(name, request)?;
        let score = risk_field(&request.payload, "node_risk", Self::DEFAULT_RISK);
        Ok(scored_entry(self.component(), hash, clamp_unit(score)))
    }
}
