use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::hash::ContextHash;
use crate::reason::ReasonId;

/// Stage names owned by the orchestrator.
pub mod stage {
    pub const INPUT_VALIDATION: &str = "input_validation";
    pub const FINAL_SYNTHESIS: &str = "final_synthesis";
    pub const FAIL_CLOSED: &str = "fail_closed";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// Status of a single pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraceStatus {
    Ok,
    Deny,
    Error,
    Skipped,
}

impl TraceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceStatus::Ok => "OK",
            TraceStatus::Deny => "DENY",
            TraceStatus::Error => "ERROR",
            TraceStatus::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for TraceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit record describing one stage's status and reasons.
///
/// Entries are values: once appended to a trace they are never modified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub stage: String,
    pub component: String,
    pub status: TraceStatus,
    #[serde(default)]
    pub reason_ids: Vec<ReasonId>,
    #[serde(default)]
    pub component_context_hash: Option<ContextHash>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TraceEntry {
    pub fn new(stage: impl Into<String>, component: impl Into<String>, status: TraceStatus) -> Self {
        Self {
            stage: stage.into(),
            component: component.into(),
            status,
            reason_ids: Vec::new(),
            component_context_hash: None,
            notes: None,
        }
    }

    pub fn ok(stage: impl Into<String>, component: impl Into<String>) -> Self {
        Self::new(stage, component, TraceStatus::Ok)
    }

    pub fn with_reason(mut self, reason: ReasonId) -> Self {
        self.reason_ids.push(reason);
        self
    }

    pub fn with_reasons(mut self, reasons: impl IntoIterator<Item = ReasonId>) -> Self {
        self.reason_ids.extend(reasons);
        self
    }

    pub fn with_component_hash(mut self, hash: ContextHash) -> Self {
        self.component_context_hash = Some(hash);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Audit representation of this entry.
    ///
    /// Built only from closed vocabulary and owned strings, so producing it
    /// cannot fail. Matches the serde representation field for field.
    pub fn to_audit_value(&self) -> Value {
        json!({
            "stage": self.stage,
            "component": self.component,
            "status": self.status.as_str(),
            "reason_ids": self.reason_ids.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
            "component_context_hash": self.component_context_hash.as_ref().map(|h| h.to_hex()),
            "notes": self.notes,
        })
    }
}
