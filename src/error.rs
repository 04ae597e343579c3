//! Error types for preference store operations.
//!
//! This module defines [`PrefError`], the error type used throughout the
//! crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Absence of a key is never an error; accessors return `Ok(None)`
//! - Reading a key through a getter of the wrong type is a programmer error
//!   and fails fast with [`PrefError::TypeMismatch`]
//! - Failures of the backing file surface as [`PrefError::StorageUnavailable`]
//!   or [`PrefError::Io`]

use std::path::PathBuf;
use thiserror::Error;

use crate::store::ValueKind;

/// Core error type for preference store operations.
#[derive(Debug, Error)]
pub enum PrefError {
    /// The backing store could not be read, parsed or written.
    #[error("Preference store unavailable at {path}: {message}")]
    StorageUnavailable { path: PathBuf, message: String },

    /// A key was read with a getter that does not match its stored type.
    #[error("Type mismatch for key '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// A textual value could not be converted to the requested type.
    #[error("Invalid {kind} value for key '{key}': {message}")]
    InvalidValue {
        key: String,
        kind: String,
        message: String,
    },

    /// Configuration file not found at an explicitly given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for preference store operations.
pub type Result<T> = std::result::Result<T, PrefError>;
