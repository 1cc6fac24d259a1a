//! Transactional change-set application.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use s2s_core::error::{AppError, ErrorKind};
use s2s_core::result::AppResult;
use s2s_entity::share::{OriginInfo, ShareInfo};

use super::PgStore;
use super::ledger::SHARE_INFO_COLUMNS;
use crate::changeset::{ChangeSet, Write};
use crate::store::ChangeSetWriter;

#[async_trait]
impl ChangeSetWriter for PgStore {
    async fn apply(&self, changes: ChangeSet) -> AppResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let count = changes.len();
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        for write in changes {
            match write {
                Write::Record {
                    table,
                    uuid,
                    payload,
                } => {
                    let sql = format!(
                        "INSERT INTO {table} (uuid, payload, change_date) VALUES ($1, $2, NOW()) \
                         ON CONFLICT (uuid) DO UPDATE SET payload = EXCLUDED.payload, \
                         change_date = EXCLUDED.change_date"
                    );
                    sqlx::query(&sql)
                        .bind(uuid)
                        .bind(Json(payload))
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| {
                            AppError::with_source(
                                ErrorKind::Database,
                                format!("Failed to upsert {table} record"),
                                e,
                            )
                        })?;
                }
                Write::OriginInfo(origin_info) => upsert_origin_info(&mut tx, &origin_info).await?,
                Write::ShareInfo(share_info) => upsert_share_info(&mut tx, &share_info).await?,
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit change set", e)
        })?;

        debug!(writes = count, "Applied change set");
        Ok(())
    }
}

async fn upsert_origin_info(
    tx: &mut Transaction<'static, Postgres>,
    origin_info: &OriginInfo,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO origin_infos (uuid, organization_id, sender_name, ownership_handed_over, \
         with_associated_contacts, with_samples, with_event_participants, comment, \
         creation_date, change_date) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         ON CONFLICT (uuid) DO UPDATE SET \
         organization_id = EXCLUDED.organization_id, \
         sender_name = EXCLUDED.sender_name, \
         ownership_handed_over = EXCLUDED.ownership_handed_over, \
         with_associated_contacts = EXCLUDED.with_associated_contacts, \
         with_samples = EXCLUDED.with_samples, \
         with_event_participants = EXCLUDED.with_event_participants, \
         comment = EXCLUDED.comment, \
         change_date = EXCLUDED.change_date",
    )
    .bind(origin_info.uuid)
    .bind(&origin_info.organization_id)
    .bind(&origin_info.sender_name)
    .bind(origin_info.ownership_handed_over)
    .bind(origin_info.with_associated_contacts)
    .bind(origin_info.with_samples)
    .bind(origin_info.with_event_participants)
    .bind(&origin_info.comment)
    .bind(origin_info.creation_date)
    .bind(origin_info.change_date)
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert origin info", e))?;
    Ok(())
}

async fn upsert_share_info(
    tx: &mut Transaction<'static, Postgres>,
    share_info: &ShareInfo,
) -> AppResult<()> {
    // The (association, organization) key wins over the incoming uuid, so a
    // repeated share keeps the ledger record created by the first one.
    let sql = format!(
        "INSERT INTO share_infos ({SHARE_INFO_COLUMNS}) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
         ON CONFLICT (association_kind, associated_uuid, organization_id) DO UPDATE SET \
         change_date = EXCLUDED.change_date, \
         sender_id = EXCLUDED.sender_id, \
         sender_name = EXCLUDED.sender_name, \
         ownership_handed_over = EXCLUDED.ownership_handed_over, \
         with_associated_contacts = EXCLUDED.with_associated_contacts, \
         with_samples = EXCLUDED.with_samples, \
         with_event_participants = EXCLUDED.with_event_participants, \
         pseudonymized_personal_data = EXCLUDED.pseudonymized_personal_data, \
         pseudonymized_sensitive_data = EXCLUDED.pseudonymized_sensitive_data, \
         comment = EXCLUDED.comment"
    );
    sqlx::query(&sql)
        .bind(share_info.uuid)
        .bind(share_info.creation_date)
        .bind(share_info.change_date)
        .bind(&share_info.organization_id)
        .bind(share_info.sender_id)
        .bind(&share_info.sender_name)
        .bind(share_info.association.kind())
        .bind(share_info.association.uuid())
        .bind(share_info.ownership_handed_over)
        .bind(share_info.with_associated_contacts)
        .bind(share_info.with_samples)
        .bind(share_info.with_event_participants)
        .bind(share_info.pseudonymized_personal_data)
        .bind(share_info.pseudonymized_sensitive_data)
        .bind(&share_info.comment)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert share info", e))?;
    Ok(())
}
