//! Custom Axum extractors.

pub mod json;
pub mod sender;

pub use json::JsonBody;
pub use sender::Sender;
