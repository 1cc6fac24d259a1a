//! Processes received event envelopes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use s2s_core::error::ShareError;
use s2s_core::result::ShareResult;
use s2s_core::types::ValidationReport;
use s2s_database::RecordStore;
use s2s_entity::event::{Event, EventParticipant};
use s2s_entity::share::{EventShareDto, OriginInfo};

use super::EventKind;
use crate::merge::{merge_event, merge_participant};
use crate::messages;
use crate::protocol::processing::{process_associated, report_error};
use crate::protocol::{ProcessedData, ReceivedDataProcessor};

/// Received-data processor for events.
#[derive(Debug, Clone)]
pub struct EventReceivedDataProcessor {
    participants: Arc<dyn RecordStore<EventParticipant>>,
}

impl EventReceivedDataProcessor {
    /// Creates a new processor.
    pub fn new(participants: Arc<dyn RecordStore<EventParticipant>>) -> Self {
        Self { participants }
    }
}

#[async_trait]
impl ReceivedDataProcessor<EventKind> for EventReceivedDataProcessor {
    async fn process_received_data(
        &self,
        envelope: EventShareDto,
        existing: Option<Event>,
    ) -> ShareResult<ProcessedData<Event>> {
        let EventShareDto {
            entity,
            participants,
            origin,
        } = envelope;
        let new_flow = existing.is_none();

        let event = match existing {
            Some(local) => merge_event(entity, local, &origin),
            None => {
                let mut event = entity;
                event.origin_info_id = None;
                event.change_date = Utc::now();
                event
            }
        };

        let mut report = ValidationReport::new();
        let (own, foreign): (Vec<_>, Vec<_>) = participants
            .into_iter()
            .partition(|p| p.event_uuid == event.uuid);
        for participant in &foreign {
            report_error(
                &mut report,
                "EventParticipant",
                &participant.uuid,
                messages::PARTICIPANT_NOT_ASSOCIATED,
            );
        }

        let associated = process_associated(
            self.participants.as_ref(),
            own,
            new_flow,
            &mut report,
            |incoming, local| merge_participant(incoming, local, &origin),
        )
        .await?;

        if !report.is_empty() {
            return Err(ShareError::Validation(report));
        }

        Ok(ProcessedData {
            entity: event,
            associated,
            origin_info: OriginInfo::from_share_origin(&origin),
        })
    }
}
