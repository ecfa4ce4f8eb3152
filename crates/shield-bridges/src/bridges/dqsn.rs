use shield_types::{ComponentId, Request, TraceEntry};

use super::{clamp_unit, component_context_hash, risk_field, scored_entry};
use crate::error::BridgeError;
use crate::traits::RiskBridge;

/// DQSN bridge (distributed quantum sentinel network).
///
/// Reads `dqsn_risk` (default 0.20), raised by 0.10 per reported reorg
/// block in `reorg_depth`.
pub struct DqsnBridge;

impl DqsnBridge {
    const DEFAULT_RISK: f64 = 0.20;
    const REORG_STEP: f64 = 0.10;

    pub fn new() -> Self {
        Self
    }
}

impl Default for DqsnBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskBridge for DqsnBridge {
    fn component(&self) -> ComponentId {
        ComponentId::Dqsn
    }

    fn evaluate(&self, request: &Request) -> Result<TraceEntry, BridgeError> {
        let name = self.component().name();
        let hash = component_context_hash(name, request)?;
        let base = risk_field(&request.payload, "dqsn_risk", Self::DEFAULT_RISK);
        let reorg_depth = risk_field(&request.payload, "reorg_depth", 0.0).max(0.0);
        let score = base + Self::REORG_STEP * reorg_depth.floor();
        Ok(scored_entry(self.component(), hash, clamp_unit(score)))
    }
}
