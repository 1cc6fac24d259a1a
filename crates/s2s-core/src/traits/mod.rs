//! Core traits defined in `s2s-core` and implemented by other crates.

pub mod transport;

pub use transport::S2sTransport;
