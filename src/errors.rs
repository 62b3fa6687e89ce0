//! Error types for the external collaborators of the timer core.
//! Neither is ever propagated out of an event handler: callers log them and
//! keep the last known-good state.

use std::io;
use thiserror::Error;

/// Failures reading page configuration from the settings store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Settings store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Settings store holds malformed data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Settings store unavailable: {0}")]
    Unavailable(String),
}

/// Failures touching the host document
#[derive(Error, Debug)]
pub enum HostError {
    #[error("No element with class {0} on the page")]
    MissingElement(String),

    #[error("Host document rejected the operation: {0}")]
    Rejected(String),
}
