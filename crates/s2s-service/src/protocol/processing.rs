//! Helpers shared by the per-kind received-data processors.

use std::collections::HashMap;

use uuid::Uuid;

use s2s_core::result::AppResult;
use s2s_core::types::validation::validation_group_name;
use s2s_core::types::{ValidationErrors, ValidationReport};
use s2s_database::RecordStore;
use s2s_entity::Record;
use s2s_entity::share::ShareOrigin;

use super::processed::{AssociatedRecord, ProcessedAssociate};
use crate::messages;

/// Record a validation error for one entity.
pub fn report_error(report: &mut ValidationReport, caption: &str, uuid: &Uuid, message: &str) {
    report.insert(
        validation_group_name(caption, uuid),
        ValidationErrors::create(caption, message),
    );
}

/// Resolve received sub-entities against local storage.
///
/// In a new share (`new_flow`) a sub-entity that already exists is a
/// validation error. Otherwise existing sub-entities are merged with
/// `merge(incoming, local)` and keep their local origin; unknown ones are
/// marked new.
pub async fn process_associated<R, F>(
    store: &dyn RecordStore<R>,
    incoming: Vec<R>,
    new_flow: bool,
    report: &mut ValidationReport,
    merge: F,
) -> AppResult<Vec<ProcessedAssociate>>
where
    R: Record + Into<AssociatedRecord>,
    F: Fn(R, R) -> R + Send + Sync,
{
    if incoming.is_empty() {
        return Ok(Vec::new());
    }

    let uuids: Vec<Uuid> = incoming.iter().map(Record::uuid).collect();
    let mut existing: HashMap<Uuid, R> = store
        .get_by_uuids(&uuids)
        .await?
        .into_iter()
        .map(|r| (r.uuid(), r))
        .collect();

    let mut processed = Vec::with_capacity(incoming.len());
    for mut record in incoming {
        let uuid = record.uuid();
        match existing.remove(&uuid) {
            Some(_) if new_flow => {
                report_error(report, R::CAPTION, &uuid, messages::ALREADY_EXISTS);
            }
            Some(local) => {
                let local_origin = local.origin_info_id();
                let mut merged = merge(record, local);
                merged.set_origin_info_id(local_origin);
                processed.push(ProcessedAssociate {
                    record: merged.into(),
                    is_new: false,
                });
            }
            None => {
                record.set_origin_info_id(None);
                processed.push(ProcessedAssociate {
                    record: record.into(),
                    is_new: true,
                });
            }
        }
    }
    Ok(processed)
}

/// Keep `local` when the sender blanked the value through pseudonymization.
pub fn keep_local_if<T>(pseudonymized: bool, incoming: T, local: T) -> T {
    if pseudonymized { local } else { incoming }
}

/// Whether the sender pseudonymized personal data.
pub fn personal_pseudonymized(origin: &ShareOrigin) -> bool {
    origin.pseudonymized_personal_data || origin.pseudonymized_sensitive_data
}
