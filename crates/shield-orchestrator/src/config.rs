use std::fmt;
use std::sync::Arc;

use shield_bridges::{default_bridge, AdaptiveCoreSink, AuditSink, RiskBridge};
use shield_types::ComponentId;

use crate::synthesis::{DecisionPolicy, DenyByDefault};

/// One slot per protocol component.
///
/// Iteration always follows [`ComponentId::PROTOCOL_ORDER`], whatever order
/// bridges were wired in. An empty slot is a registered but unwired
/// component.
#[derive(Clone, Default)]
pub struct BridgeRegistry {
    slots: [Option<Arc<dyn RiskBridge>>; 5],
}

impl BridgeRegistry {
    /// All slots empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every slot filled with its stock bridge.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for id in ComponentId::PROTOCOL_ORDER {
            registry.wire(default_bridge(id));
        }
        registry
    }

    /// Place `bridge` in the slot named by its `component()`, returning the
    /// bridge it replaced.
    pub fn wire(&mut self, bridge: Arc<dyn RiskBridge>) -> Option<Arc<dyn RiskBridge>> {
        let slot = bridge.component().position();
        self.slots[slot].replace(bridge)
    }

    /// Empty the slot for `id`.
    pub fn unwire(&mut self, id: ComponentId) -> Option<Arc<dyn RiskBridge>> {
        self.slots[id.position()].take()
    }

    pub fn with_bridge(mut self, bridge: Arc<dyn RiskBridge>) -> Self {
        self.wire(bridge);
        self
    }

    pub fn without(mut self, id: ComponentId) -> Self {
        self.unwire(id);
        self
    }

    pub fn get(&self, id: ComponentId) -> Option<&Arc<dyn RiskBridge>> {
        self.slots[id.position()].as_ref()
    }

    pub fn is_wired(&self, id: ComponentId) -> bool {
        self.get(id).is_some()
    }

    /// Slots in protocol order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, Option<&Arc<dyn RiskBridge>>)> + '_ {
        ComponentId::PROTOCOL_ORDER
            .into_iter()
            .map(move |id| (id, self.get(id)))
    }

    /// Components with no bridge wired.
    pub fn missing(&self) -> Vec<ComponentId> {
        self.iter()
            .filter(|(_, bridge)| bridge.is_none())
            .map(|(id, _)| id)
            .collect()
    }
}

impl fmt::Debug for BridgeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(id, bridge)| (id.name(), bridge.is_some())))
            .finish()
    }
}

/// Everything an [`Orchestrator`](crate::Orchestrator) is built from.
///
/// Passed in explicitly; nothing here is global or mutated during an
/// evaluation.
#[derive(Clone)]
pub struct OrchestratorConfig {
    pub registry: BridgeRegistry,
    pub sink: Option<Arc<dyn AuditSink>>,
    pub policy: Arc<dyn DecisionPolicy>,
}

impl OrchestratorConfig {
    /// Given bridges, no sink, deny-by-default policy.
    pub fn new(registry: BridgeRegistry) -> Self {
        Self {
            registry,
            sink: None,
            policy: Arc::new(DenyByDefault),
        }
    }

    /// The stock protocol: all five bridges and the Adaptive Core sink.
    pub fn default_wiring() -> Self {
        Self::new(BridgeRegistry::with_defaults()).with_sink(Arc::new(AdaptiveCoreSink::new()))
    }

    pub fn with_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn without_sink(mut self) -> Self {
        self.sink = None;
        self
    }

    pub fn with_policy(mut self, policy: Arc<dyn DecisionPolicy>) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self::default_wiring()
    }
}

impl fmt::Debug for OrchestratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrchestratorConfig")
            .field("registry", &self.registry)
            .field("sink", &self.sink.as_ref().map(|s| s.name().to_string()))
            .field("policy", &self.policy.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use shield_bridges::StaticBridge;

    use super::*;

    #[test]
    fn defaults_fill_every_slot() {
        let registry = BridgeRegistry::with_defaults();
        assert!(registry.missing().is_empty());
        for (id, bridge) in registry.iter() {
            assert_eq!(bridge.map(|b| b.component()), Some(id));
        }
    }

    #[test]
    fn iteration_ignores_wiring_order() {
        let mut registry = BridgeRegistry::empty();
        for id in ComponentId::PROTOCOL_ORDER.into_iter().rev() {
            registry.wire(Arc::new(StaticBridge::ok(id)));
        }
        let order: Vec<_> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(order, ComponentId::PROTOCOL_ORDER.to_vec());
    }

    #[test]
    fn wire_replaces_and_unwire_empties() {
        let mut registry = BridgeRegistry::with_defaults();
        let previous = registry.wire(Arc::new(StaticBridge::ok(ComponentId::Adn)));
        assert!(previous.is_some());

        assert!(registry.unwire(ComponentId::Qwg).is_some());
        assert!(!registry.is_wired(ComponentId::Qwg));
        assert_eq!(registry.missing(), vec![ComponentId::Qwg]);
        assert!(registry.unwire(ComponentId::Qwg).is_none());
    }

    #[test]
    fn default_wiring_has_sink_and_policy() {
        let config = OrchestratorConfig::default_wiring();
        assert_eq!(config.sink.as_ref().map(|s| s.name()), Some("adaptive_core"));
        assert_eq!(config.policy.name(), "deny_by_default");
        assert!(OrchestratorConfig::new(BridgeRegistry::empty()).sink.is_none());
    }

    #[test]
    fn debug_lists_slots_by_name() {
        let registry = BridgeRegistry::with_defaults().without(ComponentId::Dqsn);
        let rendered = format!("{:?}", registry);
        assert!(rendered.contains("\"dqsn\": false"));
        assert!(rendered.contains("\"sentinel_ai\": true"));
    }
}
