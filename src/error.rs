//! Error taxonomy shared by every command.
//!
//! Operations return `anyhow::Result`; the root cause of a fatal failure is
//! one of these variants so callers and tests can `downcast_ref::<TcError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TcError {
    /// A required value is missing or empty.
    #[error("{0}")]
    InvalidArgument(String),

    /// A scheme template is missing a placeholder or carries an unknown one.
    #[error("Invalid scheme template: {0}")]
    Template(String),

    /// `--source` names a scheme outside the built-in table.
    #[error("No such scheme: {0}")]
    UnknownScheme(String),

    #[error("Failed to prepare {path:?}: {message}")]
    Filesystem { path: PathBuf, message: String },

    #[error("Failed to download {url}: {message}")]
    Network { url: String, message: String },

    /// An external tool exited unsuccessfully.
    #[error("`{program}` failed with {status}")]
    Subprocess { program: String, status: String },
}
