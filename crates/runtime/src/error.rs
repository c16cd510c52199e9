//! Error types surfaced by the runtime API.
//!
//! Loader failures arrive as `anyhow::Error` with the offending path already
//! in the message; they are wrapped here so hosts can match on one type.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("ruleset data directory not found: {0}")]
    DataDirNotFound(PathBuf),

    #[error("ruleset name must not be empty")]
    EmptyRulesetName,

    #[error(transparent)]
    Content(#[from] anyhow::Error),
}
