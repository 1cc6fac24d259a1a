//! Processes received contact envelopes.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use s2s_core::error::ShareError;
use s2s_core::result::ShareResult;
use s2s_core::types::ValidationReport;
use s2s_database::RecordStore;
use s2s_entity::case::Case;
use s2s_entity::contact::Contact;
use s2s_entity::sample::Sample;
use s2s_entity::share::{ContactShareDto, OriginInfo};

use super::ContactKind;
use crate::merge::{merge_contact, merge_sample};
use crate::messages;
use crate::protocol::processing::{process_associated, report_error};
use crate::protocol::{ProcessedData, ReceivedDataProcessor};

/// Received-data processor for contacts.
#[derive(Debug, Clone)]
pub struct ContactReceivedDataProcessor {
    cases: Arc<dyn RecordStore<Case>>,
    samples: Arc<dyn RecordStore<Sample>>,
}

impl ContactReceivedDataProcessor {
    /// Creates a new processor.
    pub fn new(cases: Arc<dyn RecordStore<Case>>, samples: Arc<dyn RecordStore<Sample>>) -> Self {
        Self { cases, samples }
    }
}

#[async_trait]
impl ReceivedDataProcessor<ContactKind> for ContactReceivedDataProcessor {
    async fn process_received_data(
        &self,
        envelope: ContactShareDto,
        existing: Option<Contact>,
    ) -> ShareResult<ProcessedData<Contact>> {
        let ContactShareDto {
            mut entity,
            samples,
            origin,
        } = envelope;
        let new_flow = existing.is_none();

        // The source case only travels with the contact when it was shared
        // too; a link to a case unknown here is dropped.
        if let Some(case_uuid) = entity.case_uuid {
            if !self.cases.exists(case_uuid).await? {
                debug!(contact = %entity.uuid, case = %case_uuid, "Dropping link to unknown case");
                entity.case_uuid = None;
            }
        }

        let contact = match existing {
            Some(local) => merge_contact(entity, local, &origin),
            None => {
                entity.origin_info_id = None;
                entity.change_date = Utc::now();
                entity
            }
        };

        let mut report = ValidationReport::new();
        let mut linked_samples = Vec::with_capacity(samples.len());
        for sample in samples {
            if sample.contact_uuid == Some(contact.uuid) {
                linked_samples.push(sample);
            } else {
                report_error(&mut report, "Sample", &sample.uuid, messages::SAMPLE_NOT_ASSOCIATED);
            }
        }

        let associated = process_associated(
            self.samples.as_ref(),
            linked_samples,
            new_flow,
            &mut report,
            |incoming, local| merge_sample(incoming, local, &origin),
        )
        .await?;

        if !report.is_empty() {
            return Err(ShareError::Validation(report));
        }

        Ok(ProcessedData {
            entity: contact,
            associated,
            origin_info: OriginInfo::from_share_origin(&origin),
        })
    }
}
