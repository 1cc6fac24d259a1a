//! Back-reference from a ledger record to exactly one domain record.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of domain record a ledger record points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_association_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    /// A case.
    Case,
    /// A contact.
    Contact,
    /// A sample.
    Sample,
    /// An event.
    Event,
    /// An event participant.
    EventParticipant,
}

impl AssociationKind {
    /// Stable lowercase name, as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Case => "case",
            Self::Contact => "contact",
            Self::Sample => "sample",
            Self::Event => "event",
            Self::EventParticipant => "event_participant",
        }
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single domain record a share info belongs to.
///
/// The variants are mutually exclusive, so a ledger record can never point
/// at two records at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "uuid", rename_all = "snake_case")]
pub enum ShareAssociation {
    /// A case.
    Case(Uuid),
    /// A contact.
    Contact(Uuid),
    /// A sample.
    Sample(Uuid),
    /// An event.
    Event(Uuid),
    /// An event participant.
    EventParticipant(Uuid),
}

impl ShareAssociation {
    /// Build an association from its stored parts.
    pub fn from_parts(kind: AssociationKind, uuid: Uuid) -> Self {
        match kind {
            AssociationKind::Case => Self::Case(uuid),
            AssociationKind::Contact => Self::Contact(uuid),
            AssociationKind::Sample => Self::Sample(uuid),
            AssociationKind::Event => Self::Event(uuid),
            AssociationKind::EventParticipant => Self::EventParticipant(uuid),
        }
    }

    /// Kind of the referenced record.
    pub fn kind(&self) -> AssociationKind {
        match self {
            Self::Case(_) => AssociationKind::Case,
            Self::Contact(_) => AssociationKind::Contact,
            Self::Sample(_) => AssociationKind::Sample,
            Self::Event(_) => AssociationKind::Event,
            Self::EventParticipant(_) => AssociationKind::EventParticipant,
        }
    }

    /// Identifier of the referenced record.
    pub fn uuid(&self) -> Uuid {
        match self {
            Self::Case(uuid)
            | Self::Contact(uuid)
            | Self::Sample(uuid)
            | Self::Event(uuid)
            | Self::EventParticipant(uuid) => *uuid,
        }
    }
}

impl fmt::Display for ShareAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.uuid())
    }
}
