//! # s2s-entity
//!
//! Domain records exchanged between instances (cases, contacts, samples,
//! events, event participants), the durable ledger records kept by the
//! exchange (share info, origin info), and the envelopes that travel on
//! the wire. Domain records carry only the fields the exchange needs; the
//! rest of the surveillance model is opaque to this workspace.

pub mod case;
pub mod contact;
pub mod event;
pub mod person;
pub mod record;
pub mod sample;
pub mod share;

pub use record::Record;
