//! Sample domain records.

pub mod model;

pub use model::Sample;
