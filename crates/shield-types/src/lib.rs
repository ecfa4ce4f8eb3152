//! Orchestrator v3 contract vocabulary.
//!
//! Every value that crosses the orchestrator boundary is defined here:
//! the caller's [`Request`], the per-stage [`TraceEntry`], the closed
//! [`ReasonId`] registry and the immutable [`Response`] envelope.
//!
//! ## Contract Invariants
//!
//! - **Version Pinning**: every [`Response`] carries [`CONTRACT_VERSION`],
//!   whatever the request declared.
//! - **Closed Vocabulary**: outcomes are explained only with [`ReasonId`]
//!   values; there is no free-form reason string in a response.
//! - **Fixed Protocol Order**: [`ComponentId::PROTOCOL_ORDER`] is part of the
//!   contract. Reordering it is a breaking change.

pub mod component;
pub mod hash;
pub mod reason;
pub mod request;
pub mod response;
pub mod trace;

pub use component::{ComponentId, ADAPTIVE_CORE, ORCHESTRATOR};
pub use hash::{ContextHash, ContextHashError};
pub use reason::{ReasonCategory, ReasonId, UnknownReasonId};
pub use request::{Payload, Request};
pub use response::{ContractVersionMismatch, Outcome, Response};
pub use trace::{stage, TraceEntry, TraceStatus};

/// The only orchestrator contract version this crate speaks.
pub const CONTRACT_VERSION: i64 = 3;
