//! Generic share / return / sync orchestration.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use s2s_core::error::{AppError, ShareError};
use s2s_core::result::ShareResult;
use s2s_core::types::validation::validation_group_name;
use s2s_core::types::{EncryptedData, ValidationErrors, ValidationReport};
use s2s_database::{ChangeSet, ChangeSetWriter, RecordStore};
use s2s_entity::Record;
use s2s_entity::share::{AssociatedEntityWrapper, ShareEnvelope, ShareInfo, ShareOptions};
use s2s_transport::{ExchangeClient, SendMethod};

use super::kind::{
    ProcessedDataPersister, ReceivedDataProcessor, ShareDataBuilder, ShareKind,
};
use crate::context::RequestContext;
use crate::ledger::{ShareInfoLedger, plan_return, plan_share, plan_sync};
use crate::messages;

/// Which inbound operation a received batch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// New entities shared by a peer.
    Shared,
    /// Entities returned by the peer that held their ownership.
    Returned,
    /// Updates of previously shared entities.
    Synced,
}

impl SaveMode {
    /// Whether the received entities must already exist locally.
    pub fn expects_existing(self) -> bool {
        !matches!(self, Self::Shared)
    }
}

/// The share-protocol engine for one entity kind.
///
/// Kind-specific behavior is injected through the builder, processor, and
/// persister; the engine itself only knows about records, envelopes, and
/// the ledger.
#[derive(Debug)]
pub struct ShareProtocol<K: ShareKind> {
    records: Arc<dyn RecordStore<K::Entity>>,
    builder: Arc<dyn ShareDataBuilder<K>>,
    processor: Arc<dyn ReceivedDataProcessor<K>>,
    persister: Arc<dyn ProcessedDataPersister<K>>,
    ledger: Arc<ShareInfoLedger>,
    writer: Arc<dyn ChangeSetWriter>,
    exchange: Arc<ExchangeClient>,
}

impl<K: ShareKind> ShareProtocol<K> {
    /// Creates a new engine.
    pub fn new(
        records: Arc<dyn RecordStore<K::Entity>>,
        builder: Arc<dyn ShareDataBuilder<K>>,
        processor: Arc<dyn ReceivedDataProcessor<K>>,
        persister: Arc<dyn ProcessedDataPersister<K>>,
        ledger: Arc<ShareInfoLedger>,
        writer: Arc<dyn ChangeSetWriter>,
        exchange: Arc<ExchangeClient>,
    ) -> Self {
        Self {
            records,
            builder,
            processor,
            persister,
            ledger,
            writer,
            exchange,
        }
    }

    /// Send entities to another organization.
    ///
    /// Nothing is recorded in the ledger unless the peer accepted the batch.
    pub async fn share_entities(
        &self,
        sender: &RequestContext,
        entity_uuids: &[Uuid],
        options: &ShareOptions,
    ) -> ShareResult<()> {
        let entities = self.load_entities(entity_uuids).await?;
        self.validate_entities_before_send(&entities, false).await?;
        let (envelopes, associated) = self.build_batch(&entities, sender, options).await?;

        let associations: Vec<_> = entities
            .iter()
            .map(Record::association)
            .chain(associated.iter().map(|w| w.association))
            .collect();
        let targets = self
            .ledger
            .targets(associations, &options.organization_id)
            .await?;

        self.exchange
            .send(
                SendMethod::Post,
                &options.organization_id,
                K::ENDPOINT,
                &envelopes,
            )
            .await?;

        let mut changes = ChangeSet::new();
        self.ledger
            .ensure_persisted(plan_share(sender, options, targets), &mut changes);
        self.writer.apply(changes).await?;

        info!(
            entity = K::Entity::CAPTION,
            organization_id = %options.organization_id,
            count = entities.len(),
            associated = associated.len(),
            hand_over_ownership = options.hand_over_ownership,
            "Shared entities"
        );
        Ok(())
    }

    /// Store entities shared by a peer.
    pub async fn save_shared_entities(&self, payload: &EncryptedData) -> ShareResult<()> {
        self.decrypt_and_save(payload, SaveMode::Shared).await
    }

    /// Hand a received entity back to its owner.
    ///
    /// Ownership is always handed over, whatever the caller asked for.
    pub async fn return_entity(
        &self,
        sender: &RequestContext,
        entity_uuid: Uuid,
        options: ShareOptions,
    ) -> ShareResult<()> {
        let options = options.with_hand_over_ownership(true);
        let entity = self.load_entity(entity_uuid).await?;
        self.validate_entities_before_send(std::slice::from_ref(&entity), true)
            .await?;

        let origin_id = entity
            .origin_info_id()
            .ok_or_else(|| ShareError::share(messages::NOT_RECEIVED))?;
        let mut origin_info = self
            .ledger
            .find_origin_info(origin_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Origin info {origin_id} not found")))?;

        let data = self.builder.build_share_data(&entity, sender, &options).await?;
        let associated = self
            .associated_share_infos(&data.associated, &options.organization_id)
            .await?;

        self.exchange
            .send(
                SendMethod::Put,
                &options.organization_id,
                K::ENDPOINT,
                std::slice::from_ref(&data.envelope),
            )
            .await?;

        let mut changes = ChangeSet::new();
        origin_info.relinquish_ownership();
        changes.upsert_origin_info(origin_info);
        self.ledger
            .ensure_persisted(plan_return(sender, &options, associated), &mut changes);
        self.writer.apply(changes).await?;

        info!(
            entity = K::Entity::CAPTION,
            uuid = %entity_uuid,
            organization_id = %options.organization_id,
            "Returned entity"
        );
        Ok(())
    }

    /// Store an entity returned by the peer that held its ownership.
    pub async fn save_returned_entity(&self, payload: &EncryptedData) -> ShareResult<()> {
        self.decrypt_and_save(payload, SaveMode::Returned).await
    }

    /// Push the current state of a previously shared entity.
    ///
    /// Requires an earlier share to the same organization.
    pub async fn sync_entity(
        &self,
        sender: &RequestContext,
        entity_uuid: Uuid,
        options: &ShareOptions,
    ) -> ShareResult<()> {
        let entity = self.load_entity(entity_uuid).await?;
        self.validate_entities_before_send(std::slice::from_ref(&entity), false)
            .await?;

        let primary = self
            .ledger
            .find_by_entity_and_organization(&entity.association(), &options.organization_id)
            .await?
            .ok_or_else(|| {
                ShareError::share(format!(
                    "{}: {}",
                    messages::NOT_SHARED,
                    options.organization_id
                ))
            })?;

        let data = self.builder.build_share_data(&entity, sender, options).await?;
        let associated = self
            .ledger
            .targets(
                data.associated.iter().map(|w| w.association).collect::<Vec<_>>(),
                &options.organization_id,
            )
            .await?;

        self.exchange
            .send(
                SendMethod::Post,
                &options.organization_id,
                &format!("{}/sync", K::ENDPOINT),
                std::slice::from_ref(&data.envelope),
            )
            .await?;

        let mut changes = ChangeSet::new();
        self.ledger
            .ensure_persisted(plan_sync(sender, options, primary, associated), &mut changes);
        self.writer.apply(changes).await?;

        info!(
            entity = K::Entity::CAPTION,
            uuid = %entity_uuid,
            organization_id = %options.organization_id,
            "Synced entity"
        );
        Ok(())
    }

    /// Store updates of previously shared entities.
    pub async fn save_synced_entity(&self, payload: &EncryptedData) -> ShareResult<()> {
        self.decrypt_and_save(payload, SaveMode::Synced).await
    }

    /// Ledger view of one entity.
    pub async fn share_infos(&self, entity_uuid: Uuid) -> ShareResult<Vec<ShareInfo>> {
        let entity = self.load_entity(entity_uuid).await?;
        Ok(self.ledger.share_infos_of(&entity.association()).await?)
    }

    /// Decrypt a received batch, validate every envelope, and persist all
    /// of them or none.
    pub async fn decrypt_and_save(&self, payload: &EncryptedData, mode: SaveMode) -> ShareResult<()> {
        let envelopes: Vec<K::Envelope> = self.exchange.decrypt(payload)?;

        let uuids: Vec<Uuid> = envelopes.iter().map(|e| e.entity().uuid()).collect();
        let mut local: HashMap<Uuid, K::Entity> = self
            .records
            .get_by_uuids(&uuids)
            .await?
            .into_iter()
            .map(|e| (e.uuid(), e))
            .collect();

        let mut report = ValidationReport::new();
        let mut processed = Vec::with_capacity(envelopes.len());
        let mut seen = HashSet::with_capacity(envelopes.len());
        for envelope in envelopes {
            let uuid = envelope.entity().uuid();
            let existing = local.remove(&uuid);

            if let Err(errors) = check_received::<K>(mode, seen.insert(uuid), existing.is_some()) {
                debug!(entity = K::Entity::CAPTION, uuid = %uuid, ?mode, "Received entity rejected");
                report.insert(validation_group_name(K::Entity::CAPTION, &uuid), errors);
                continue;
            }

            let existing = if mode.expects_existing() { existing } else { None };
            match self.processor.process_received_data(envelope, existing).await {
                Ok(data) => processed.push(data),
                Err(ShareError::Validation(errors)) => report.merge(errors),
                Err(e) => return Err(e),
            }
        }

        if !report.is_empty() {
            warn!(
                entity = K::Entity::CAPTION,
                sender_id = %payload.sender_id,
                ?mode,
                groups = report.len(),
                "Rejected received batch"
            );
            return Err(ShareError::Validation(report));
        }

        let count = processed.len();
        let mut changes = ChangeSet::new();
        for mut data in processed {
            let staged = match mode {
                SaveMode::Shared => {
                    data.entity.set_origin_info_id(Some(data.origin_info.uuid));
                    self.persister.persist_shared_data(data).await?
                }
                SaveMode::Returned => {
                    let origin_info = data.origin_info.clone();
                    self.persister.persist_returned_data(data, origin_info).await?
                }
                SaveMode::Synced => self.persister.persist_sync_data(data).await?,
            };
            changes.extend(staged);
        }
        self.writer.apply(changes).await?;

        info!(
            entity = K::Entity::CAPTION,
            sender_id = %payload.sender_id,
            ?mode,
            count,
            "Saved received entities"
        );
        Ok(())
    }

    async fn load_entity(&self, uuid: Uuid) -> ShareResult<K::Entity> {
        self.records.get_by_uuid(uuid).await?.ok_or_else(|| {
            AppError::not_found(format!("{} {uuid} not found", K::Entity::CAPTION)).into()
        })
    }

    async fn load_entities(&self, uuids: &[Uuid]) -> ShareResult<Vec<K::Entity>> {
        if uuids.is_empty() {
            return Err(AppError::validation("No entities selected").into());
        }

        let mut unique = Vec::with_capacity(uuids.len());
        for uuid in uuids {
            if !unique.contains(uuid) {
                unique.push(*uuid);
            }
        }

        let entities = self.records.get_by_uuids(&unique).await?;
        if let Some(missing) = unique
            .iter()
            .find(|uuid| !entities.iter().any(|e| e.uuid() == **uuid))
        {
            return Err(
                AppError::not_found(format!("{} {missing} not found", K::Entity::CAPTION)).into(),
            );
        }
        Ok(entities)
    }

    async fn validate_entities_before_send(
        &self,
        entities: &[K::Entity],
        require_origin: bool,
    ) -> ShareResult<()> {
        let mut report = ValidationReport::new();
        for entity in entities {
            let mut errors = self.builder.validate_before_send(entity).await?;
            if require_origin && entity.origin_info_id().is_none() {
                errors.add(K::Entity::CAPTION, messages::NOT_RECEIVED);
            }
            report.insert(validation_group_name(K::Entity::CAPTION, &entity.uuid()), errors);
        }

        if report.is_empty() {
            return Ok(());
        }
        warn!(
            entity = K::Entity::CAPTION,
            rejected = report.len(),
            "Entities failed validation before sending"
        );
        Err(ShareError::share_with_errors(messages::PRE_SEND_FAILED, report))
    }

    async fn build_batch(
        &self,
        entities: &[K::Entity],
        sender: &RequestContext,
        options: &ShareOptions,
    ) -> ShareResult<(Vec<K::Envelope>, Vec<AssociatedEntityWrapper>)> {
        let mut envelopes = Vec::with_capacity(entities.len());
        let mut associated = Vec::new();
        for entity in entities {
            let data = self.builder.build_share_data(entity, sender, options).await?;
            envelopes.push(data.envelope);
            associated.extend(data.associated);
        }
        Ok((envelopes, associated))
    }

    async fn associated_share_infos(
        &self,
        associated: &[AssociatedEntityWrapper],
        organization_id: &str,
    ) -> ShareResult<Vec<(AssociatedEntityWrapper, Option<ShareInfo>)>> {
        let mut pairs = Vec::with_capacity(associated.len());
        for wrapper in associated {
            let existing = self
                .ledger
                .find_existing_for_associated_entity(wrapper, organization_id)
                .await?;
            pairs.push((*wrapper, existing));
        }
        Ok(pairs)
    }
}

/// Existence check of one received entity.
fn check_received<K: ShareKind>(
    mode: SaveMode,
    first_occurrence: bool,
    exists_locally: bool,
) -> Result<(), ValidationErrors> {
    let caption = K::Entity::CAPTION;
    if !first_occurrence {
        return Err(ValidationErrors::create(caption, messages::DUPLICATE_IN_BATCH));
    }
    match (mode.expects_existing(), exists_locally) {
        (false, true) => Err(ValidationErrors::create(caption, messages::ALREADY_EXISTS)),
        (true, false) => Err(ValidationErrors::create(caption, messages::DOES_NOT_EXIST)),
        _ => Ok(()),
    }
}
