use std::fmt;

use serde::{Deserialize, Serialize};

/// Component name used for entries produced by the orchestrator itself.
pub const ORCHESTRATOR: &str = "orchestrator";

/// Component (and stage) name of the read-only Adaptive Core sink.
pub const ADAPTIVE_CORE: &str = "adaptive_core";

/// The risk-assessment bridges known to the v3 protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentId {
    Sentinel,
    Dqsn,
    Adn,
    GuardianWallet,
    Qwg,
}

impl ComponentId {
    /// Contract-defined invocation order.
    ///
    /// Changing this order changes which failure is reported first and
    /// therefore requires a contract version bump.
    pub const PROTOCOL_ORDER: [ComponentId; 5] = [
        ComponentId::Sentinel,
        ComponentId::Dqsn,
        ComponentId::Adn,
        ComponentId::GuardianWallet,
        ComponentId::Qwg,
    ];

    /// Component name as it appears in trace entries. Bridges use it as
    /// their stage name too.
    pub fn name(&self) -> &'static str {
        match self {
            ComponentId::Sentinel => "sentinel_ai",
            ComponentId::Dqsn => "dqsn",
            ComponentId::Adn => "adn",
            ComponentId::GuardianWallet => "guardian_wallet",
            ComponentId::Qwg => "qwg",
        }
    }

    /// Zero-based position in [`ComponentId::PROTOCOL_ORDER`].
    pub fn position(&self) -> usize {
        match self {
            ComponentId::Sentinel => 0,
            ComponentId::Dqsn => 1,
            ComponentId::Adn => 2,
            ComponentId::GuardianWallet => 3,
            ComponentId::Qwg => 4,
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_order_is_sentinel_first_qwg_last() {
        let names: Vec<_> = ComponentId::PROTOCOL_ORDER.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["sentinel_ai", "dqsn", "adn", "guardian_wallet", "qwg"]);
    }

    #[test]
    fn position_matches_protocol_order() {
        for (i, id) in ComponentId::PROTOCOL_ORDER.iter().enumerate() {
            assert_eq!(id.position(), i);
        }
    }
}
