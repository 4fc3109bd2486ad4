//! Error types for the move-selection layer.

use std::path::PathBuf;

use thiserror::Error;
use xiangqi_core::MoveError;

/// The forced-mate search ran past its deadline.
///
/// This is a cancellation signal, not a failure: the orchestrator reacts by
/// moving on to the next phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search deadline reached")]
pub struct SearchTimedOut;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("an AI search is still running")]
    SearchPending,
    #[error("no AI search has been requested")]
    NoSearch,
    #[error("the search worker went away without answering")]
    WorkerLost,
    #[error(transparent)]
    Move(#[from] MoveError),
}
