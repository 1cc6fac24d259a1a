//! Convenience result type aliases.

use crate::error::{AppError, ShareError};

/// A specialized `Result` type for infrastructure operations.
pub type AppResult<T> = Result<T, AppError>;

/// A specialized `Result` type for share protocol operations.
///
/// Protocol operations can fail with a validation report in addition to
/// the plain infrastructure errors carried by [`AppError`].
pub type ShareResult<T> = Result<T, ShareError>;
