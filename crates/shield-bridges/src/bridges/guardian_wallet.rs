use shield_types::{ComponentId, Request, TraceEntry};

use super::{clamp_unit, component_context_hash, risk_field, scored_entry};
use crate::error::BridgeError;
use crate::traits::RiskBridge;

/// Guardian Wallet bridge.
///
/// Reads `wallet_risk` (default 0.25); transfers above 100 000 DGB in
/// `amount_dgb` add 0.15.
pub struct GuardianWalletBridge;

impl GuardianWalletBridge {
    const DEFAULT_RISK: f64 = 0.25;
    const LARGE_AMOUNT_DGB: f64 = 100_000.0;
    const LARGE_AMOUNT_PENALTY: f64 = 0.15;

    pub fn new() -> Self {
        Self
    }
}

impl Default for GuardianWalletBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskBridge for GuardianWalletBridge {
    fn component(&self) -> ComponentId {
        ComponentId::GuardianWallet
    }

    fn evaluate(&self, request: &Request) -> Result<TraceEntry, BridgeError> {
        let name = self.component().name();
        let hash = component_context_hash(name, request)?;
        let mut score = risk_field(&request.payload, "wallet_risk", Self::DEFAULT_RISK);
        let amount = risk_field(&request.payload, "amount_dgb", 0.0);
        if amount > Self::LARGE_AMOUNT_DGB {
            score += Self::LARGE_AMOUNT_PENALTY;
        }
        Ok(scored_entry(self.component(), hash, clamp_unit(score)))
    }
}
