//! Events: shared together with their participants.

pub mod builder;
pub mod processor;

use s2s_entity::event::Event;
use s2s_entity::share::EventShareDto;

use crate::protocol::ShareKind;

pub use builder::EventShareDataBuilder;
pub use processor::EventReceivedDataProcessor;

/// The event entity kind.
#[derive(Debug, Clone, Copy)]
pub struct EventKind;

impl ShareKind for EventKind {
    type Entity = Event;
    type Envelope = EventShareDto;
    const ENDPOINT: &'static str = "/events";
}
