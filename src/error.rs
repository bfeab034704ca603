//! Recoverable argfile errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a referenced argfile.
///
/// These never abort expansion; they are rendered into the caller's
/// diagnostics and the reference expands to nothing.
#[derive(Debug, Error)]
pub enum ArgfileError {
    #[error("Argfile not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Error while reading argfile: {0}")]
    Read(#[from] std::io::Error),
}
