//! Core type definitions used across the S2S workspace.

pub mod encrypted;
pub mod id;
pub mod validation;

pub use encrypted::EncryptedData;
pub use id::*;
pub use validation::{ValidationError, ValidationErrors, ValidationReport};
