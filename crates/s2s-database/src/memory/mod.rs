//! In-memory store used for development instances and tests.

pub mod store;

pub use store::MemoryStore;
