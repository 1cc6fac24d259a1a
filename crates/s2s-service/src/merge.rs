//! Field-level merge of received records into their local copies.
//!
//! Incoming values win, except where the sender blanked them through
//! pseudonymization; the local origin reference is always kept.

use chrono::Utc;

use s2s_entity::case::Case;
use s2s_entity::contact::Contact;
use s2s_entity::event::{Event, EventParticipant};
use s2s_entity::sample::Sample;
use s2s_entity::share::ShareOrigin;

use crate::protocol::processing::{keep_local_if, personal_pseudonymized};

/// Merge a received case.
pub fn merge_case(mut incoming: Case, local: Case, origin: &ShareOrigin) -> Case {
    incoming.person = keep_local_if(personal_pseudonymized(origin), incoming.person, local.person);
    incoming.additional_details = keep_local_if(
        origin.pseudonymized_sensitive_data,
        incoming.additional_details,
        local.additional_details,
    );
    incoming.origin_info_id = local.origin_info_id;
    incoming.change_date = Utc::now();
    incoming
}

/// Merge a received contact. An unresolved source case keeps the local link.
pub fn merge_contact(mut incoming: Contact, local: Contact, origin: &ShareOrigin) -> Contact {
    incoming.person = keep_local_if(personal_pseudonymized(origin), incoming.person, local.person);
    incoming.description = keep_local_if(
        origin.pseudonymized_sensitive_data,
        incoming.description,
        local.description,
    );
    incoming.case_uuid = incoming.case_uuid.or(local.case_uuid);
    incoming.origin_info_id = local.origin_info_id;
    incoming.change_date = Utc::now();
    incoming
}

/// Merge a received sample.
pub fn merge_sample(mut incoming: Sample, local: Sample, origin: &ShareOrigin) -> Sample {
    incoming.comment = keep_local_if(
        origin.pseudonymized_sensitive_data,
        incoming.comment,
        local.comment,
    );
    incoming.origin_info_id = local.origin_info_id;
    incoming.change_date = Utc::now();
    incoming
}

/// Merge a received event.
pub fn merge_event(mut incoming: Event, local: Event, origin: &ShareOrigin) -> Event {
    incoming.description = keep_local_if(
        origin.pseudonymized_sensitive_data,
        incoming.description,
        local.description,
    );
    incoming.origin_info_id = local.origin_info_id;
    incoming.change_date = Utc::now();
    incoming
}

/// Merge a received event participant.
pub fn merge_participant(
    mut incoming: EventParticipant,
    local: EventParticipant,
    origin: &ShareOrigin,
) -> EventParticipant {
    incoming.person = keep_local_if(personal_pseudonymized(origin), incoming.person, local.person);
    incoming.involvement_description = keep_local_if(
        origin.pseudonymized_sensitive_data,
        incoming.involvement_description,
        local.involvement_description,
    );
    incoming.origin_info_id = local.origin_info_id;
    incoming.change_date = Utc::now();
    incoming
}
