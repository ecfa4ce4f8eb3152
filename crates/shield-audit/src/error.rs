use thiserror::Error;

/// Errors from canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalError {
    /// The value contains content with no canonical encoding
    /// (raw bytes, non-finite floats, non-string map keys, ...).
    #[error("value is not canonically serializable: {0}")]
    Unserializable(String),
}

impl From<serde_json::Error> for CanonicalError {
    fn from(err: serde_json::Error) -> Self {
        CanonicalError::Unserializable(err.to_string())
    }
}
