//! Share-info ledger and origin-info lookups.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use s2s_core::error::{AppError, ErrorKind};
use s2s_core::result::AppResult;
use s2s_core::types::{OriginInfoId, ShareInfoId, UserId};
use s2s_entity::share::{AssociationKind, OriginInfo, ShareAssociation, ShareInfo};

use super::PgStore;
use crate::store::LedgerStore;

pub(super) const SHARE_INFO_COLUMNS: &str = "uuid, creation_date, change_date, organization_id, \
    sender_id, sender_name, association_kind, associated_uuid, ownership_handed_over, \
    with_associated_contacts, with_samples, with_event_participants, \
    pseudonymized_personal_data, pseudonymized_sensitive_data, comment";

/// Row shape of the `share_infos` table.
#[derive(Debug, FromRow)]
struct ShareInfoRow {
    uuid: ShareInfoId,
    creation_date: DateTime<Utc>,
    change_date: DateTime<Utc>,
    organization_id: String,
    sender_id: UserId,
    sender_name: String,
    association_kind: AssociationKind,
    associated_uuid: Uuid,
    ownership_handed_over: bool,
    with_associated_contacts: bool,
    with_samples: bool,
    with_event_participants: bool,
    pseudonymized_personal_data: bool,
    pseudonymized_sensitive_data: bool,
    comment: Option<String>,
}

impl From<ShareInfoRow> for ShareInfo {
    fn from(row: ShareInfoRow) -> Self {
        Self {
            uuid: row.uuid,
            creation_date: row.creation_date,
            change_date: row.change_date,
            organization_id: row.organization_id,
            sender_id: row.sender_id,
            sender_name: row.sender_name,
            association: ShareAssociation::from_parts(row.association_kind, row.associated_uuid),
            ownership_handed_over: row.ownership_handed_over,
            with_associated_contacts: row.with_associated_contacts,
            with_samples: row.with_samples,
            with_event_participants: row.with_event_participants,
            pseudonymized_personal_data: row.pseudonymized_personal_data,
            pseudonymized_sensitive_data: row.pseudonymized_sensitive_data,
            comment: row.comment,
        }
    }
}

#[async_trait]
impl LedgerStore for PgStore {
    async fn find_share_info(
        &self,
        association: &ShareAssociation,
        organization_id: &str,
    ) -> AppResult<Option<ShareInfo>> {
        let sql = format!(
            "SELECT {SHARE_INFO_COLUMNS} FROM share_infos \
             WHERE association_kind = $1 AND associated_uuid = $2 AND organization_id = $3"
        );
        let row = sqlx::query_as::<_, ShareInfoRow>(&sql)
            .bind(association.kind())
            .bind(association.uuid())
            .bind(organization_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share info", e))?;
        Ok(row.map(ShareInfo::from))
    }

    async fn share_infos_of(&self, association: &ShareAssociation) -> AppResult<Vec<ShareInfo>> {
        let sql = format!(
            "SELECT {SHARE_INFO_COLUMNS} FROM share_infos \
             WHERE association_kind = $1 AND associated_uuid = $2 ORDER BY creation_date"
        );
        let rows = sqlx::query_as::<_, ShareInfoRow>(&sql)
            .bind(association.kind())
            .bind(association.uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list share infos", e))?;
        Ok(rows.into_iter().map(ShareInfo::from).collect())
    }

    async fn find_origin_info(&self, id: OriginInfoId) -> AppResult<Option<OriginInfo>> {
        sqlx::query_as::<_, OriginInfo>("SELECT * FROM origin_infos WHERE uuid = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find origin info", e))
    }
}
