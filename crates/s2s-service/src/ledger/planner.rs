//! Pure planning of ledger writes.
//!
//! Each function takes the current ledger state of the affected records and
//! returns the writes an operation implies. Nothing here touches storage;
//! the caller stages the result into the batch's change set.

use s2s_entity::share::{AssociatedEntityWrapper, ShareAssociation, ShareInfo, ShareOptions};

use crate::context::RequestContext;

/// An intended ledger write.
#[derive(Debug, Clone, PartialEq)]
pub enum ShareInfoWrite {
    /// First share of a record to an organization.
    Create(ShareInfo),
    /// In-place update of an existing relationship.
    Update(ShareInfo),
}

impl ShareInfoWrite {
    /// Consume the write, returning the record to store.
    pub fn into_share_info(self) -> ShareInfo {
        match self {
            Self::Create(info) | Self::Update(info) => info,
        }
    }
}

/// A record about to be sent and its current share info towards the target.
#[derive(Debug, Clone)]
pub struct ShareTarget {
    /// The record.
    pub association: ShareAssociation,
    /// Existing share info towards the target organization.
    pub existing: Option<ShareInfo>,
}

fn create_or_update(
    sender: &RequestContext,
    options: &ShareOptions,
    target: ShareTarget,
    take_sender: bool,
) -> ShareInfoWrite {
    match target.existing {
        Some(mut info) => {
            info.apply_options(options);
            if take_sender {
                info.sender_id = sender.user_id;
                info.sender_name = sender.user_name.clone();
            }
            ShareInfoWrite::Update(info)
        }
        None => ShareInfoWrite::Create(ShareInfo::new(
            target.association,
            sender.user_id,
            sender.user_name.clone(),
            options,
        )),
    }
}

/// Writes after a successful share: one record per primary and associated
/// entity. A repeated share updates the existing record and takes over the
/// new sender.
pub fn plan_share(
    sender: &RequestContext,
    options: &ShareOptions,
    targets: Vec<ShareTarget>,
) -> Vec<ShareInfoWrite> {
    targets
        .into_iter()
        .map(|target| create_or_update(sender, options, target, true))
        .collect()
}

/// Writes after a successful return: associated entities that were not
/// themselves received get a share info, since they now exist on the
/// receiving side too.
pub fn plan_return(
    sender: &RequestContext,
    options: &ShareOptions,
    associated: Vec<(AssociatedEntityWrapper, Option<ShareInfo>)>,
) -> Vec<ShareInfoWrite> {
    associated
        .into_iter()
        .filter(|(wrapper, _)| !wrapper.has_origin_info())
        .map(|(wrapper, existing)| {
            create_or_update(
                sender,
                options,
                ShareTarget {
                    association: wrapper.association,
                    existing,
                },
                true,
            )
        })
        .collect()
}

/// Writes after a successful sync: the primary relationship, which must
/// exist, gets the new option snapshot; associated entities are updated or
/// created.
pub fn plan_sync(
    sender: &RequestContext,
    options: &ShareOptions,
    primary: ShareInfo,
    associated: Vec<ShareTarget>,
) -> Vec<ShareInfoWrite> {
    let mut writes = Vec::with_capacity(associated.len() + 1);
    writes.push(create_or_update(
        sender,
        options,
        ShareTarget {
            association: primary.association,
            existing: Some(primary),
        },
        false,
    ));
    writes.extend(
        associated
            .into_iter()
            .map(|target| create_or_update(sender, options, target, false)),
    );
    writes
}

/// Writes after a record came back from the organization that held its
/// ownership: the hand-over flag is cleared wherever it is set.
pub fn plan_ownership_returned(share_infos: Vec<ShareInfo>) -> Vec<ShareInfoWrite> {
    share_infos
        .into_iter()
        .filter(|info| info.ownership_handed_over)
        .map(|mut info| {
            info.ownership_handed_over = false;
            info.change_date = chrono::Utc::now();
            ShareInfoWrite::Update(info)
        })
        .collect()
}
