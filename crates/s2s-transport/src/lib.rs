//! # s2s-transport
//!
//! Everything between a serialized batch of envelopes and a peer instance:
//! AES-256-GCM payload encryption, the registry of configured peer
//! organizations, the reqwest-based HTTP transport, and the
//! [`ExchangeClient`] that ties them together.

pub mod client;
pub mod crypto;
pub mod exchange;
pub mod registry;

pub use client::RestTransport;
pub use exchange::{ExchangeClient, SendMethod};
pub use registry::{OrganizationRegistry, OrganizationSummary, PeerAccess};
