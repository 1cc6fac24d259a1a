//! Builds outgoing case envelopes.

use std::sync::Arc;

use async_trait::async_trait;

use s2s_core::result::AppResult;
use s2s_core::types::ValidationErrors;
use s2s_database::RelatedRecords;
use s2s_entity::case::Case;
use s2s_entity::share::{AssociatedEntityWrapper, CaseShareDto, ShareOptions};

use super::CaseKind;
use crate::context::RequestContext;
use crate::ledger::ShareInfoLedger;
use crate::protocol::building::{editability_errors, outgoing, share_origin};
use crate::protocol::{ShareData, ShareDataBuilder};

/// Share-data builder for cases.
#[derive(Debug, Clone)]
pub struct CaseShareDataBuilder {
    related: Arc<dyn RelatedRecords>,
    ledger: Arc<ShareInfoLedger>,
    organization_id: String,
}

impl CaseShareDataBuilder {
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
impl ShareDataBuilder<CaseKind> for CaseShareDataBuilder {
    async fn validate_before_send(&self, case: &Case) -> AppResult<ValidationErrors> {
        editability_errors(&self.ledger, case).await
    }

    async fn build_share_data(
        &self,
        case: &Case,
        sender: &RequestContext,
        options: &ShareOptions,
    ) -> AppResult<ShareData<CaseShareDto>> {
        let contacts = if options.with_associated_contacts {
            self.related.contacts_of_case(case.uuid).await?
        } else {
            Vec::new()
        };

        let mut samples = Vec::new();
        if options.with_samples {
            samples = self.related.samples_of_case(case.uuid).await?;
            // Samples of shared contacts travel with the case as well.
            for contact in &contacts {
                samples.extend(self.related.samples_of_contact(contact.uuid).await?);
            }
        }

        let associated = contacts
            .iter()
            .map(AssociatedEntityWrapper::of)
            .chain(samples.iter().map(AssociatedEntityWrapper::of))
            .collect();

        let envelope = CaseShareDto {
            entity: outgoing(case, options),
            associated_contacts: contacts.iter().map(|c| outgoing(c, options)).collect(),
            samples: samples.iter().map(|s| outgoing(s, options)).collect(),
            origin: share_origin(&self.organization_id, sender, options),
        };

        Ok(ShareData {
            envelope,
            associated,
        })
    }
}
