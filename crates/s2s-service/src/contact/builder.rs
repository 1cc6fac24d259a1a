//! Builds outgoing contact envelopes.

use std::sync::Arc;

use async_trait::async_trait;

use s2s_core::result::AppResult;
use s2s_core::types::ValidationErrors;
use s2s_database::RelatedRecords;
use s2s_entity::contact::Contact;
use s2s_entity::share::{AssociatedEntityWrapper, ContactShareDto, ShareOptions};

use super::ContactKind;
use crate::context::RequestContext;
use crate::ledger::ShareInfoLedger;
use crate::protocol::building::{editability_errors, outgoing, share_origin};
use crate::protocol::{ShareData, ShareDataBuilder};

/// Share-data builder for contacts.
#[derive(Debug, Clone)]
pub struct ContactShareDataBuilder {
    related: Arc<dyn RelatedRecords>,
    ledger: Arc<ShareInfoLedger>,
    organization_id: String,
}

impl ContactShareDataBuilder {
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
impl ShareDataBuilder<ContactKind> for ContactShareDataBuilder {
    async fn validate_before_send(&self, contact: &Contact) -> AppResult<ValidationErrors> {
        editability_errors(&self.ledger, contact).await
    }

    async fn build_share_data(
        &self,
        contact: &Contact,
        sender: &RequestContext,
        options: &ShareOptions,
    ) -> AppResult<ShareData<ContactShareDto>> {
        let samples = if options.with_samples {
            self.related.samples_of_contact(contact.uuid).await?
        } else {
            Vec::new()
        };

        Ok(ShareData {
            associated: samples.iter().map(AssociatedEntityWrapper::of).collect(),
            envelope: ContactShareDto {
                entity: outgoing(contact, options),
                samples: samples.iter().map(|s| outgoing(s, options)).collect(),
                origin: share_origin(&self.organization_id, sender, options),
            },
        })
    }
}
