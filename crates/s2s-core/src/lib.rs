//! # s2s-core
//!
//! Core crate for the SORMAS-to-SORMAS exchange service. Contains the
//! unified error system, configuration schemas, typed identifiers,
//! validation report types, and the transport trait implemented by
//! `s2s-transport`.
//!
//! This crate has **no** internal dependencies on other S2S crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ShareError};
pub use result::{AppResult, ShareResult};
