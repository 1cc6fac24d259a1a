//! Contact domain records.

pub mod model;

pub use model::Contact;
