//! # s2s-database
//!
//! Storage for the S2S exchange: the store traits the protocol engine
//! consumes, the [`ChangeSet`] that carries every write of a batch, and two
//! implementations of the traits (PostgreSQL and in-memory).

pub mod changeset;
pub mod connection;
#[cfg(feature = "memory")]
pub mod memory;
pub mod migration;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod store;

pub use changeset::{ChangeSet, Write};
pub use connection::DatabasePool;
#[cfg(feature = "memory")]
pub use memory::MemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PgStore;
pub use store::{ChangeSetWriter, DataStore, LedgerStore, RecordStore, RelatedRecords};
