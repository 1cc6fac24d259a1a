//! Processes received case envelopes.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use s2s_core::error::ShareError;
use s2s_core::result::ShareResult;
use s2s_core::types::ValidationReport;
use s2s_database::RecordStore;
use s2s_entity::case::Case;
use s2s_entity::contact::Contact;
use s2s_entity::sample::Sample;
use s2s_entity::share::{CaseShareDto, OriginInfo};

use super::CaseKind;
use crate::merge::{merge_case, merge_contact, merge_sample};
use crate::messages;
use crate::protocol::processing::{process_associated, report_error};
use crate::protocol::{ProcessedData, ReceivedDataProcessor};

/// Received-data processor for cases.
#[derive(Debug, Clone)]
pub struct CaseReceivedDataProcessor {
    contacts: Arc<dyn RecordStore<Contact>>,
    samples: Arc<dyn RecordStore<Sample>>,
}

impl CaseReceivedDataProcessor {
    /// Creates a new processor.
    pub fn new(contacts: Arc<dyn RecordStore<Contact>>, samples: Arc<dyn RecordStore<Sample>>) -> Self {
        Self { contacts, samples }
    }
}

#[async_trait]
impl ReceivedDataProcessor<CaseKind> for CaseReceivedDataProcessor {
    async fn process_received_data(
        &self,
        envelope: CaseShareDto,
        existing: Option<Case>,
    ) -> ShareResult<ProcessedData<Case>> {
        let CaseShareDto {
            entity,
            associated_contacts,
            samples,
            origin,
        } = envelope;
        let new_flow = existing.is_none();

        let case = match existing {
            Some(local) => merge_case(entity, local, &origin),
            None => {
                let mut case = entity;
                case.origin_info_id = None;
                case.change_date = Utc::now();
                case
            }
        };

        let mut report = ValidationReport::new();

        let contacts: Vec<Contact> = associated_contacts
            .into_iter()
            .map(|mut contact| {
                contact.case_uuid = Some(case.uuid);
                contact
            })
            .collect();
        let contact_uuids: HashSet<Uuid> = contacts.iter().map(|c| c.uuid).collect();

        let mut linked_samples = Vec::with_capacity(samples.len());
        for sample in samples {
            let of_case = sample.case_uuid == Some(case.uuid);
            let of_contact = sample
                .contact_uuid
                .is_some_and(|uuid| contact_uuids.contains(&uuid));
            if of_case || of_contact {
                linked_samples.push(sample);
            } else {
                report_error(&mut report, "Sample", &sample.uuid, messages::SAMPLE_NOT_ASSOCIATED);
            }
        }

        let mut associated = process_associated(
            self.contacts.as_ref(),
            contacts,
            new_flow,
            &mut report,
            |incoming, local| merge_contact(incoming, local, &origin),
        )
        .await?;
        associated.extend(
            process_associated(
                self.samples.as_ref(),
                linked_samples,
                new_flow,
                &mut report,
                |incoming, local| merge_sample(incoming, local, &origin),
            )
            .await?,
        );

        if !report.is_empty() {
            return Err(ShareError::Validation(report));
        }

        Ok(ProcessedData {
            entity: case,
            associated,
            origin_info: OriginInfo::from_share_origin(&origin),
        })
    }
}
