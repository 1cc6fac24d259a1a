//! Contacts: shared on their own together with their samples.

pub mod builder;
pub mod processor;

use s2s_entity::contact::Contact;
use s2s_entity::share::ContactShareDto;

use crate::protocol::ShareKind;

pub use builder::ContactShareDataBuilder;
pub use processor::ContactReceivedDataProcessor;

/// The contact entity kind.
#[derive(Debug, Clone, Copy)]
pub struct ContactKind;

impl ShareKind for ContactKind {
    type Entity = Contact;
    type Envelope = ContactShareDto;
    const ENDPOINT: &'static str = "/contacts";
}
