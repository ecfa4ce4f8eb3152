use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use shield_audit::{decision_material, request_material, AuditRecord};
use shield_bridges::AuditSink;
use shield_types::{stage, Outcome, ReasonId, Request, Response, TraceEntry, TraceStatus, ORCHESTRATOR};
use tracing::{debug, error, info, warn};

use crate::boundary;
use crate::config::OrchestratorConfig;
use crate::error::OrchestrationError;
use crate::invocation::invoke_bridges;
use crate::validation::validate;

/// Notes on the entry recorded when the sink fails.
pub const SINK_FAILED_NOTES: &str = "sink_failed";

/// The v3 orchestrator.
///
/// Pipeline: validate → bridges in protocol order → synthesis → sink report
/// → hash. The whole pipeline sits behind the fail-closed boundary:
///
/// - a recognized failure yields DENY with its reason id and a single
///   `fail_closed` entry
/// - anything else, panics included, yields DENY with `INTERNAL_ERROR` and a
///   single `internal_error` entry
///
/// Evaluation never returns an error and never panics to the caller. The
/// orchestrator holds no per-request state and can be shared across threads.
pub struct Orchestrator {
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(config: OrchestratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Evaluate a request.
    pub fn evaluate(&self, request: &Request) -> Response {
        self.evaluate_with_material(request).0
    }

    /// Evaluate a request and also return the audit record whose hash is
    /// the response's `context_hash`.
    pub fn evaluate_with_material(&self, request: &Request) -> (Response, AuditRecord) {
        info!(
            subject_id = %request.subject_id,
            action = %request.action,
            nonce = %request.nonce,
            "Evaluating request"
        );

        let result = panic::catch_unwind(AssertUnwindSafe(|| self.run_pipeline(request)));

        let (response, record) = match result {
            Ok(Ok(resolved)) => resolved,
            Ok(Err(err)) => {
                warn!(
                    reason_id = %err.reason_id,
                    message = %err.message,
                    "Evaluation failed closed"
                );
                boundary::fail_closed(request, err.reason_id)
            }
            Err(_) => {
                error!(
                    reason_id = %ReasonId::InternalError,
                    "Unexpected fault during evaluation; failing closed"
                );
                boundary::internal_error(request)
            }
        };

        info!(
            outcome = %response.outcome(),
            reason_ids = ?response.reason_ids(),
            context_hash = %response.context_hash(),
            trace_len = response.trace().len(),
            "Evaluation resolved"
        );

        (response, record)
    }

    fn run_pipeline(&self, request: &Request) -> Result<(Response, AuditRecord), OrchestrationError> {
        validate(request)?;

        let mut trace = vec![TraceEntry::ok(stage::INPUT_VALIDATION, ORCHESTRATOR)];
        trace.extend(invoke_bridges(&self.config.registry, request)?);

        let synthesis = self.config.policy.synthesize(&trace);
        debug!(
            policy = self.config.policy.name(),
            outcome = %synthesis.outcome,
            "Synthesized outcome"
        );
        trace.push(synthesis.trace_entry());

        if let Some(sink) = &self.config.sink {
            trace.push(report_to_sink(
                sink,
                request,
                synthesis.outcome,
                &synthesis.reason_ids,
            ));
        }

        let record = AuditRecord::seal(&decision_material(
            request_material(request)?,
            synthesis.outcome,
            &synthesis.reason_ids,
            &trace,
        ));
        let response = Response::new(record.context_hash, synthesis.outcome, synthesis.reason_ids, trace);
        Ok((response, record))
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(OrchestratorConfig::default_wiring())
    }
}

/// Show the resolved decision to the sink.
///
/// Any failure here, a panic or an entry under the wrong name included,
/// becomes one ERROR entry. The decision itself is already fixed.
fn report_to_sink(
    sink: &Arc<dyn AuditSink>,
    request: &Request,
    outcome: Outcome,
    reason_ids: &[ReasonId],
) -> TraceEntry {
    let result = panic::catch_unwind(AssertUnwindSafe(|| sink.report(request, outcome, reason_ids)));

    let failure = match result {
        Ok(Ok(entry)) if entry.stage == sink.name() && entry.component == sink.name() => {
            return entry;
        }
        Ok(Ok(entry)) => format!(
            "sink answered as stage={} component={}",
            entry.stage, entry.component
        ),
        Ok(Err(err)) => err.to_string(),
        Err(_) => "sink panicked".to_string(),
    };

    warn!(
        component = sink.name(),
        message = %failure,
        "Sink failed; decision unchanged"
    );
    sink_failure_entry(sink.name())
}

fn sink_failure_entry(name: &str) -> TraceEntry {
    TraceEntry::new(name, name, TraceStatus::Error)
        .with_reason(ReasonId::ComponentError)
        .with_notes(SINK_FAILED_NOTES)
}

/// Evaluate `request` with the stock wiring: all five bridges and the
/// Adaptive Core sink under the deny-by-default policy.
pub fn orchestrate(request: &Request) -> Response {
    Orchestrator::default().evaluate(request)
}
