//! CLI transport errors.
//!
//! None of these is a decision: an unreadable or malformed request never
//! reaches the orchestrator, so no response exists to print.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

pub type CliResult<T> = Result<T, CliError>;
