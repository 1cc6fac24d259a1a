//! Helpers shared by the per-kind share-data builders.

use s2s_core::result::AppResult;
use s2s_core::types::ValidationErrors;
use s2s_entity::Record;
use s2s_entity::share::{ShareOptions, ShareOrigin};

use crate::context::RequestContext;
use crate::ledger::ShareInfoLedger;
use crate::messages;
use crate::pseudonymize::Pseudonymize;

/// Origin metadata written into every envelope of a call.
pub fn share_origin(
    organization_id: &str,
    sender: &RequestContext,
    options: &ShareOptions,
) -> ShareOrigin {
    ShareOrigin {
        organization_id: organization_id.to_string(),
        sender_name: sender.user_name.clone(),
        ownership_handed_over: options.hand_over_ownership,
        with_associated_contacts: options.with_associated_contacts,
        with_samples: options.with_samples,
        with_event_participants: options.with_event_participants,
        pseudonymized_personal_data: options.pseudonymize_personal_data,
        pseudonymized_sensitive_data: options.pseudonymize_sensitive_data,
        comment: options.comment.clone(),
    }
}

/// The copy of a record that leaves the instance: no local origin
/// reference, pseudonymized as requested.
pub fn outgoing<R: Record + Pseudonymize>(record: &R, options: &ShareOptions) -> R {
    let mut copy = record.clone();
    copy.set_origin_info_id(None);
    copy.pseudonymize_for(options);
    copy
}

/// The editability check every kind runs before sending.
pub async fn editability_errors<R: Record>(
    ledger: &ShareInfoLedger,
    record: &R,
) -> AppResult<ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if !ledger.is_edit_allowed(record).await? {
        errors.add(R::CAPTION, messages::NOT_EDITABLE);
    }
    Ok(errors)
}
