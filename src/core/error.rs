//! Error kinds for fsc.
//!
//! Only [FscError::InvalidStartPath] is fatal, and it is raised before the interactive
//! session starts. Everything raised while the session runs is recovered from by the
//! state machine or reported after the terminal has been restored.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FscError {
    #[error("path '{}' cannot be opened: {reason}", path.display())]
    InvalidStartPath { path: PathBuf, reason: String },

    #[error("cannot list '{}': {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidFilterPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("no editor found (checked: {checked})")]
    NoEditorAvailable { checked: String },

    #[error("editor '{editor}' failed: {source}")]
    EditorFailed {
        editor: String,
        #[source]
        source: io::Error,
    },

    #[error("editor '{editor}' exited with {status}")]
    EditorExited {
        editor: String,
        status: std::process::ExitStatus,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FscError {
    pub(crate) fn invalid_start(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        FscError::InvalidStartPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
