//! Case domain records.

pub mod model;

pub use model::{Case, CaseClassification};
