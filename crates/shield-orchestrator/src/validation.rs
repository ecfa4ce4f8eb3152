//! Request Validator.
//!
//! Checks run in a fixed order and stop at the first failure. The payload is
//! opaque here and component availability is never consulted.

use shield_types::{Request, CONTRACT_VERSION};

use crate::error::ValidationError;

pub fn validate(request: &Request) -> Result<(), ValidationError> {
    if request.contract_version != CONTRACT_VERSION {
        return Err(ValidationError::UnsupportedContractVersion {
            expected: CONTRACT_VERSION,
            found: request.contract_version,
        });
    }

    for (field, value) in [
        ("subject_id", &request.subject_id),
        ("action", &request.action),
        ("nonce", &request.nonce),
    ] {
        if value.is_empty() {
            return Err(ValidationError::EmptyField(field));
        }
    }

    if request.ttl_seconds <= 0 {
        return Err(ValidationError::NonPositiveTtl(request.ttl_seconds));
    }

    Ok(())
}
