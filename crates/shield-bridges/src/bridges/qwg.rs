use shield_types::{ComponentId, Request, TraceEntry};

use super::{clamp_unit, component_context_hash, risk_field, scored_entry};
use crate::error::BridgeError;
use crate::traits::RiskBridge;

/// Quantum Wallet Guard bridge.
///
/// Reads `quantum_risk` (default 0.30); a truthy `quantum_flag` adds 0.20.
pub struct QwgBridge;

impl QwgBridge {
    const DEFAULT_RISK: f64 = 0.30;
    const FLAG_PENALTY: f64 = 0.20;

    pub fn new() -> Self {
        Self
    }
}

impl Default for QwgBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskBridge for QwgBridge {
    fn component(&self) -> ComponentId {
        ComponentId::Qwg
    }

    fn evaluate(&self, request: &Request) -> Result<TraceEntry, BridgeError> {
        let name = self.component().name();
        let hash = component_context_hash(name, request)?;
        let mut score = risk_field(&request.payload, "quantum_risk", Self::DEFAULT_RISK);
        if request
            .payload
            .get("quantum_flag")
            .is_some_and(|flag| flag.is_truthy())
        {
            score += Self::FLAG_PENALTY;
        }
        Ok(scored_entry(self.component(), hash, clamp_unit(score)))
    }
}
