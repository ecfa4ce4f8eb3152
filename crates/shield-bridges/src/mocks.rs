//! Test doubles for bridges and sinks.
//!
//! Used by the orchestrator's tests to force every failure path without
//! relying on particular payload contents.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use shield_audit::CanonicalError;
use shield_types::{ComponentId, Outcome, ReasonId, Request, TraceEntry, TraceStatus, ADAPTIVE_CORE};

use crate::error::BridgeError;
use crate::traits::{AuditSink, RiskBridge};

/// Bridge that returns a fixed entry and counts its calls.
pub struct StaticBridge {
    component: ComponentId,
    entry: TraceEntry,
    calls: AtomicUsize,
}

impl StaticBridge {
    /// A healthy bridge: OK entry, no reasons.
    pub fn ok(component: ComponentId) -> Self {
        Self::with_entry(component, TraceEntry::ok(component.name(), component.name()))
    }

    /// A bridge that reports a finding with the given status.
    pub fn with_status(component: ComponentId, status: TraceStatus) -> Self {
        Self::with_entry(
            component,
            TraceEntry::new(component.name(), component.name(), status),
        )
    }

    pub fn with_entry(component: ComponentId, entry: TraceEntry) -> Self {
        Self {
            component,
            entry,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RiskBridge for StaticBridge {
    fn component(&self) -> ComponentId {
        self.component
    }

    fn evaluate(&self, _request: &Request) -> Result<TraceEntry, BridgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entry.clone())
    }
}

type ErrorFactory = Box<dyn Fn(&str) -> BridgeError + Send + Sync>;

/// Bridge that always fails with a configured error.
pub struct FailingBridge {
    component: ComponentId,
    make_error: ErrorFactory,
    calls: AtomicUsize,
}

impl FailingBridge {
    pub fn new(
        component: ComponentId,
        make_error: impl Fn(&str) -> BridgeError + Send + Sync + 'static,
    ) -> Self {
        Self {
            component,
            make_error: Box::new(make_error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn component_error(component: ComponentId) -> Self {
        Self::new(component, |name| BridgeError::failed(name, "mock failure"))
    }

    pub fn hashing(component: ComponentId) -> Self {
        Self::new(component, |name| {
            BridgeError::hashing(name, CanonicalError::Unserializable("mock payload".into()))
        })
    }

    pub fn timeout(component: ComponentId, timeout_ms: u64) -> Self {
        Self::new(component, move |name| BridgeError::Timeout {
            component: name.to_string(),
            timeout_ms,
        })
    }

    pub fn invalid_response(component: ComponentId) -> Self {
        Self::new(component, |name| BridgeError::InvalidResponse {
            component: name.to_string(),
            reason: "mock malformed output".into(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RiskBridge for FailingBridge {
    fn component(&self) -> ComponentId {
        self.component
    }

    fn evaluate(&self, _request: &Request) -> Result<TraceEntry, BridgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err((self.make_error)(self.component.name()))
    }
}

/// Bridge that answers under another component's name.
pub struct MisreportingBridge {
    component: ComponentId,
    claims_to_be: String,
}

impl MisreportingBridge {
    pub fn new(component: ComponentId, claims_to_be: impl Into<String>) -> Self {
        Self {
            component,
            claims_to_be: claims_to_be.into(),
        }
    }
}

impl RiskBridge for MisreportingBridge {
    fn component(&self) -> ComponentId {
        self.component
    }

    fn evaluate(&self, _request: &Request) -> Result<TraceEntry, BridgeError> {
        Ok(TraceEntry::ok(self.claims_to_be.clone(), self.claims_to_be.clone()))
    }
}

/// Bridge that panics; stands in for any unanticipated fault.
pub struct PanickingBridge {
    component: ComponentId,
}

impl PanickingBridge {
    pub fn new(component: ComponentId) -> Self {
        Self { component }
    }
}

impl RiskBridge for PanickingBridge {
    fn component(&self) -> ComponentId {
        self.component
    }

    fn evaluate(&self, _request: &Request) -> Result<TraceEntry, BridgeError> {
        panic!("{} exploded: secret internal detail", self.component.name())
    }
}

/// Sink that records what it was shown.
#[derive(Default)]
pub struct RecordingSink {
    seen: Mutex<Vec<(Outcome, Vec<ReasonId>)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<(Outcome, Vec<ReasonId>)> {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl AuditSink for RecordingSink {
    fn report(
        &self,
        _request: &Request,
        outcome: Outcome,
        reason_ids: &[ReasonId],
    ) -> Result<TraceEntry, BridgeError> {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((outcome, reason_ids.to_vec()));
        Ok(TraceEntry::ok(ADAPTIVE_CORE, ADAPTIVE_CORE))
    }
}

/// Sink that always fails.
pub struct FailingSink;

impl AuditSink for FailingSink {
    fn report(
        &self,
        _request: &Request,
        _outcome: Outcome,
        _reason_ids: &[ReasonId],
    ) -> Result<TraceEntry, BridgeError> {
        Err(BridgeError::Unavailable {
            component: ADAPTIVE_CORE.into(),
            reason: "mock sink offline".into(),
        })
    }
}

/// Sink that panics.
pub struct PanickingSink;

impl AuditSink for PanickingSink {
    fn report(
        &self,
        _request: &Request,
        _outcome: Outcome,
        _reason_ids: &[ReasonId],
    ) -> Result<TraceEntry, BridgeError> {
        panic!("adaptive core exploded")
    }
}
