//! Envelopes: the unit transmitted for one shared entity.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::case::Case;
use crate::contact::Contact;
use crate::event::{Event, EventParticipant};
use crate::record::Record;
use crate::sample::Sample;

use super::origin::ShareOrigin;

/// Common access to the primary entity and origin metadata of an envelope.
pub trait ShareEnvelope:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The primary entity type.
    type Entity: Record;

    /// The primary entity.
    fn entity(&self) -> &Self::Entity;

    /// Origin metadata written by the sender.
    fn origin(&self) -> &ShareOrigin;
}

/// A shared case with its contacts and samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseShareDto {
    /// The case.
    pub entity: Case,
    /// Contacts of the case, if requested.
    #[serde(default)]
    pub associated_contacts: Vec<Contact>,
    /// Samples of the case, if requested.
    #[serde(default)]
    pub samples: Vec<Sample>,
    /// Origin metadata.
    pub origin: ShareOrigin,
}

/// A shared contact with its samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactShareDto {
    /// The contact.
    pub entity: Contact,
    /// Samples of the contact, if requested.
    #[serde(default)]
    pub samples: Vec<Sample>,
    /// Origin metadata.
    pub origin: ShareOrigin,
}

/// A shared event with its participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventShareDto {
    /// The event.
    pub entity: Event,
    /// Participants of the event, if requested.
    #[serde(default)]
    pub participants: Vec<EventParticipant>,
    /// Origin metadata.
    pub origin: ShareOrigin,
}

macro_rules! impl_envelope {
    ($ty:ty, $entity:ty) => {
        impl ShareEnvelope for $ty {
            type Entity = $entity;

            fn entity(&self) -> &$entity {
                &self.entity
            }

            fn origin(&self) -> &ShareOrigin {
                &self.origin
            }
        }
    };
}

impl_envelope!(CaseShareDto, Case);
impl_envelope!(ContactShareDto, Contact);
impl_envelope!(EventShareDto, Event);
