//! Event domain records.

pub mod model;
pub mod participant;

pub use model::{Event, EventStatus};
pub use participant::EventParticipant;
