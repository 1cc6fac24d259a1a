//! # s2s-service
//!
//! The SORMAS-to-SORMAS protocol engine. [`protocol::ShareProtocol`] is
//! generic over a [`protocol::ShareKind`] and orchestrates share, return,
//! and sync in both directions; each kind (case, contact, event) supplies a
//! share-data builder and a received-data processor. The share-info ledger
//! computes its writes with pure planning functions and every batch is
//! committed through one change set.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references.

pub mod case;
pub mod contact;
pub mod context;
pub mod event;
pub mod ledger;
pub mod merge;
pub mod messages;
pub mod protocol;
pub mod pseudonymize;
pub mod wiring;

pub use context::RequestContext;
pub use ledger::ShareInfoLedger;
pub use protocol::{ShareProtocol, SormasToSormasEntityInterface};
pub use wiring::{S2sServices, build_services};
