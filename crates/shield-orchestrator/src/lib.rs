//! Orchestrator v3.
//!
//! Gates an action by consulting the protocol bridges in a fixed order and
//! resolving their findings into one auditable [`Response`].
//!
//! ## Guarantees
//!
//! - **Fail-Closed**: every failure resolves to DENY with exactly one
//!   [`ReasonId`]. Nothing is ever raised to the caller.
//! - **Determinism**: equal requests yield equal responses, context hash
//!   included.
//! - **No Hidden Inputs**: the context hash covers exactly the request,
//!   outcome, reason ids and trace.
//! - **Read-Only Sink**: the sink is shown the resolved decision after
//!   synthesis and cannot change it.
//!
//! ```
//! use shield_orchestrator::orchestrate;
//! use shield_types::{Outcome, ReasonId, Request};
//!
//! let response = orchestrate(&Request::new("w1", "SEND", "n1", 60));
//! assert_eq!(response.outcome(), Outcome::Deny);
//! assert_eq!(response.reason_ids(), &[ReasonId::DenyByPolicy]);
//! ```
//!
//! [`Response`]: shield_types::Response
//! [`ReasonId`]: shield_types::ReasonId

pub mod boundary;
pub mod config;
pub mod error;
pub mod invocation;
pub mod orchestrator;
pub mod synthesis;
pub mod validation;

pub use config::{BridgeRegistry, OrchestratorConfig};
pub use error::{OrchestrationError, ValidationError};
pub use invocation::{check_entry, consult, invoke_bridges, BridgeOutcome};
pub use orchestrator::{orchestrate, Orchestrator, SINK_FAILED_NOTES};
pub use synthesis::{DecisionPolicy, DenyByDefault, Synthesis};
pub use validation::validate;
