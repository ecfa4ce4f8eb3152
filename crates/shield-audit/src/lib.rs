//! # shield-audit
//!
//! Tamper-evidence primitives for the v3 orchestrator.
//!
//! - **Canonical Serializer** ([`canonical`]): deterministic JSON text with
//!   keys sorted at every level and no insignificant whitespace.
//! - **Audit Hasher** ([`hasher`]): SHA-256 over the canonical text.
//! - **Audit material** ([`material`]): the exact shape that is hashed,
//!   `{request, outcome, reason_ids, trace}`. Changing this shape is a
//!   breaking change and requires a contract version bump.
//!
//! The context hash is a pure function of the material ("no hidden inputs").

pub mod canonical;
pub mod error;
pub mod hasher;
pub mod material;

pub use canonical::{encode_value, to_canonical_json, to_canonical_value};
pub use error::CanonicalError;
pub use hasher::{compute_context_hash, AuditHasher};
pub use material::{
    component_material, decision_material, redacted_request_material, request_material,
    AuditRecord,
};
