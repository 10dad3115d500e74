//! Structured error types for script generation
//!
//! Every failure here is fatal to the current translation run: nothing
//! retries internally, and each variant carries the offending path plus the
//! underlying cause so the top-level caller can report it and exit non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Error type covering the whole translation pipeline
#[derive(Debug, Error)]
pub enum InjectorError {
    // Loader errors
    #[error("events input file not found: {path}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("events input file is not valid JSON: {path}")]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Script file errors
    #[error("could not create script file")]
    ResourceCreation {
        #[source]
        source: std::io::Error,
    },

    #[error("could not write to script file: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, InjectorError>;
