//! Unified error types for the S2S exchange.
//!
//! Infrastructure failures are mapped into [`AppError`] for consistent
//! propagation through the ? operator. Protocol-level failures are
//! expressed with [`ShareError`], which adds the structured validation
//! report that callers display per entity.

use std::fmt;
use thiserror::Error;

use crate::types::validation::ValidationReport;

/// Top-level error kind categorization used across the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// An internal error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// Encrypting or decrypting a payload failed.
    Encryption,
    /// A peer instance could not be reached or rejected the request.
    ExternalService,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Encryption => write!(f, "ENCRYPTION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
        }
    }
}

/// The unified infrastructure error.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an encryption error.
    pub fn encryption(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Encryption, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

/// Failure of a share, return, or sync operation.
#[derive(Debug, Error)]
pub enum ShareError {
    /// Unrecoverable protocol failure: transport, decryption, pre-send
    /// validation, or a missing precondition. Nothing was persisted or
    /// recorded in the ledger.
    #[error("{message}")]
    Share {
        /// Human-readable summary.
        message: String,
        /// Per-entity detail, when the failure came from pre-send validation.
        errors: Option<ValidationReport>,
    },

    /// One or more entities of a batch failed validation. The whole batch
    /// was rejected.
    #[error("Received data failed validation for {} entities", .0.len())]
    Validation(ValidationReport),

    /// Infrastructure failure or unresolved identifier.
    #[error(transparent)]
    App(#[from] AppError),
}

impl ShareError {
    /// Create a protocol failure without per-entity detail.
    pub fn share(message: impl Into<String>) -> Self {
        Self::Share {
            message: message.into(),
            errors: None,
        }
    }

    /// Create a protocol failure carrying per-entity validation detail.
    pub fn share_with_errors(message: impl Into<String>, errors: ValidationReport) -> Self {
        Self::Share {
            message: message.into(),
            errors: Some(errors),
        }
    }

    /// Return the validation report carried by this error, if any.
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Share { errors, .. } => errors.as_ref(),
            Self::Validation(report) => Some(report),
            Self::App(_) => None,
        }
    }
}
