//! Builds outgoing event envelopes.

use std::sync::Arc;

use async_trait::async_trait;

use s2s_core::result::AppResult;
use s2s_core::types::ValidationErrors;
use s2s_database::RelatedRecords;
use s2s_entity::event::Event;
use s2s_entity::share::{AssociatedEntityWrapper, EventShareDto, ShareOptions};

use super::EventKind;
use crate::context::RequestContext;
use crate::ledger::ShareInfoLedger;
use crate::protocol::building::{editability_errors, outgoing, share_origin};
use crate::protocol::{ShareData, ShareDataBuilder};

/// Share-data builder for events.
#[derive(Debug, Clone)]
pub struct EventShareDataBuilder {
    related: Arc<dyn RelatedRecords>,
    ledger: Arc<ShareInfoLedger>,
    organization_id: String,
}

impl EventShareDataBuilder {
    /// Creates a new builder sending on behalf of `organization_id`.
    pub fn new(
        related: Arc<dyn RelatedRecords>,
        ledger: Arc<ShareInfoLedger>,
        organization_id: impl Into<String>,
    ) -> Self {
        Self {
            related,
            ledger,
            organization_id: organization_id.into(),
        }
    }
}

#[async_trait]
impl ShareDataBuilder<EventKind> for EventShareDataBuilder {
    async fn validate_before_send(&self, event: &Event) -> AppResult<ValidationErrors> {
        editability_errors(&self.ledger, event).await
    }

    async fn build_share_data(
        &self,
        event: &Event,
        sender: &RequestContext,
        options: &ShareOptions,
    ) -> AppResult<ShareData<EventShareDto>> {
        let participants = if options.with_event_participants {
            self.related.participants_of_event(event.uuid).await?
        } else {
            Vec::new()
        };

        Ok(ShareData {
            associated: participants.iter().map(AssociatedEntityWrapper::of).collect(),
            envelope: EventShareDto {
                entity: outgoing(event, options),
                participants: participants.iter().map(|p| outgoing(p, options)).collect(),
                origin: share_origin(&self.organization_id, sender, options),
            },
        })
    }
}
