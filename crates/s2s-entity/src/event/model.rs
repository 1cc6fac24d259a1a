//! Event record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use s2s_core::types::OriginInfoId;

use crate::record::impl_record;

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Signal, not yet verified.
    #[default]
    Signal,
    /// Verified event.
    Event,
    /// Screening.
    Screening,
    /// Cluster of cases.
    Cluster,
    /// Dropped.
    Dropped,
}

/// An outbreak event, e.g. a gathering with several infections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Globally unique event identifier.
    pub uuid: Uuid,
    /// Short title.
    pub title: String,
    /// Disease name, if known.
    #[serde(default)]
    pub disease: Option<String>,
    /// Status.
    #[serde(default)]
    pub status: EventStatus,
    /// When the event started.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Sensitive free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Date the event was reported.
    pub report_date: DateTime<Utc>,
    /// Origin of a received event.
    #[serde(default)]
    pub origin_info_id: Option<OriginInfoId>,
    /// Last modification time.
    pub change_date: DateTime<Utc>,
}

impl Event {
    /// Create a new, locally owned event.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            disease: None,
            status: EventStatus::default(),
            start_date: None,
            description: None,
            report_date: now,
            origin_info_id: None,
            change_date: now,
        }
    }
}

impl_record!(Event, "events", "Event", Event);
