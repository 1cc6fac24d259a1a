//! Share-info ledger record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use s2s_core::types::{ShareInfoId, UserId};

use super::association::ShareAssociation;
use super::options::ShareOptions;
use super::origin::OriginInfo;

/// One (domain record, peer organization) sharing relationship.
///
/// Created on the first share of a record to an organization and updated in
/// place by every later share, sync, or return. Never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareInfo {
    /// Unique ledger record identifier.
    pub uuid: ShareInfoId,
    /// When the record was first shared to the organization.
    pub creation_date: DateTime<Utc>,
    /// Last time the option snapshot changed.
    pub change_date: DateTime<Utc>,
    /// Peer organization id.
    pub organization_id: String,
    /// User who shared the record.
    pub sender_id: UserId,
    /// Display name of the sender.
    pub sender_name: String,
    /// The shared record.
    pub association: ShareAssociation,
    /// Editing authority lies with the peer.
    pub ownership_handed_over: bool,
    /// Contacts were shared along.
    pub with_associated_contacts: bool,
    /// Samples were shared along.
    pub with_samples: bool,
    /// Event participants were shared along.
    pub with_event_participants: bool,
    /// Personal data was pseudonymized.
    pub pseudonymized_personal_data: bool,
    /// Sensitive data was pseudonymized.
    pub pseudonymized_sensitive_data: bool,
    /// Comment sent with the last share.
    pub comment: Option<String>,
}

impl ShareInfo {
    /// Create a ledger record for a first share.
    pub fn new(
        association: ShareAssociation,
        sender_id: UserId,
        sender_name: impl Into<String>,
        options: &ShareOptions,
    ) -> Self {
        let now = Utc::now();
        let mut info = Self {
            uuid: ShareInfoId::new(),
            creation_date: now,
            change_date: now,
            organization_id: options.organization_id.clone(),
            sender_id,
            sender_name: sender_name.into(),
            association,
            ownership_handed_over: false,
            with_associated_contacts: false,
            with_samples: false,
            with_event_participants: false,
            pseudonymized_personal_data: false,
            pseudonymized_sensitive_data: false,
            comment: None,
        };
        info.apply_options(options);
        info
    }

    /// Overwrite the option snapshot with the options of a later call.
    pub fn apply_options(&mut self, options: &ShareOptions) {
        self.ownership_handed_over = options.hand_over_ownership;
        self.with_associated_contacts = options.with_associated_contacts;
        self.with_samples = options.with_samples;
        self.with_event_participants = options.with_event_participants;
        self.pseudonymized_personal_data = options.pseudonymize_personal_data;
        self.pseudonymized_sensitive_data = options.pseudonymize_sensitive_data;
        self.comment = options.comment.clone();
        self.change_date = Utc::now();
    }
}

/// Whether a record may be edited (and therefore shared) on this instance.
///
/// A received record is editable only if ownership was handed over to us;
/// any record is read-only while a peer holds its ownership.
pub fn is_edit_allowed(origin: Option<&OriginInfo>, share_infos: &[ShareInfo]) -> bool {
    let owned_here = origin.is_none_or(|o| o.ownership_handed_over);
    let handed_away = share_infos.iter().any(|s| s.ownership_handed_over);
    owned_here && !handed_away
}
