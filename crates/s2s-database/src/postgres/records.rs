//! Domain record lookups.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use s2s_core::error::{AppError, ErrorKind};
use s2s_core::result::AppResult;
use s2s_entity::Record;
use s2s_entity::contact::Contact;
use s2s_entity::event::EventParticipant;
use s2s_entity::sample::Sample;

use super::PgStore;
use crate::store::{RecordStore, RelatedRecords};

impl PgStore {
    async fn payloads_where<R: Record>(&self, column: &str, value: Uuid) -> AppResult<Vec<R>> {
        let sql = format!(
            "SELECT payload FROM {} WHERE payload->>'{column}' = $1 ORDER BY change_date",
            R::TABLE
        );
        let rows = sqlx::query_scalar::<_, Json<R>>(&sql)
            .bind(value.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to list {} by {column}", R::TABLE),
                    e,
                )
            })?;
        Ok(rows.into_iter().map(|Json(record)| record).collect())
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for PgStore {
    async fn get_by_uuids(&self, uuids: &[Uuid]) -> AppResult<Vec<R>> {
        if uuids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("SELECT uuid, payload FROM {} WHERE uuid = ANY($1)", R::TABLE);
        let rows = sqlx::query_as::<_, (Uuid, Json<R>)>(&sql)
            .bind(uuids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to load {}", R::TABLE),
                    e,
                )
            })?;

        let mut by_uuid: HashMap<Uuid, R> = rows
            .into_iter()
            .map(|(uuid, Json(record))| (uuid, record))
            .collect();
        let ordered = uuids.iter().filter_map(|uuid| by_uuid.remove(uuid)).collect();
        Ok(ordered)
    }

    async fn get_by_uuid(&self, uuid: Uuid) -> AppResult<Option<R>> {
        let sql = format!("SELECT payload FROM {} WHERE uuid = $1", R::TABLE);
        let row = sqlx::query_scalar::<_, Json<R>>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to find {} record", R::TABLE),
                    e,
                )
            })?;
        Ok(row.map(|Json(record)| record))
    }

    async fn exists(&self, uuid: Uuid) -> AppResult<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE uuid = $1)", R::TABLE);
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(uuid)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to check {} record", R::TABLE),
                    e,
                )
            })
    }
}

#[async_trait]
impl RelatedRecords for PgStore {
    async fn contacts_of_case(&self, case_uuid: Uuid) -> AppResult<Vec<Contact>> {
        self.payloads_where("case_uuid", case_uuid).await
    }

    async fn samples_of_case(&self, case_uuid: Uuid) -> AppResult<Vec<Sample>> {
        self.payloads_where("case_uuid", case_uuid).await
    }

    async fn samples_of_contact(&self, contact_uuid: Uuid) -> AppResult<Vec<Sample>> {
        self.payloads_where("contact_uuid", contact_uuid).await
    }

    async fn participants_of_event(&self, event_uuid: Uuid) -> AppResult<Vec<EventParticipant>> {
        self.payloads_where("event_uuid", event_uuid).await
    }
}
