//! Trigger service - The authoritative store of per-region trigger config
//!
//! Owns the in-memory record cache and mediates every backing-store
//! access. The cache is the only thing gameplay callbacks touch; all
//! store traffic happens on the administrative path.
//!
//! Concurrency model: reads clone an `Arc` out from under a short
//! `RwLock` read guard and never wait on store I/O. Mutations are
//! serialized through a single admin mutex, compute a modified copy of
//! the record off to the side, write to the store with no cache lock
//! held, and only swap the copy in after the write reports at least one
//! affected row. A failed write therefore leaves the cache untouched;
//! rollback is structural, not compensating. Reload builds the
//! replacement record set completely before swapping it in under one
//! write guard, so readers see the old cache or the new one, never a
//! partial mix.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use regionward_domain::{normalize_text, validate_list, RegionId, TriggerEvent, TriggerRecord};

use crate::application::error::TriggerError;
use crate::application::ports::outbound::{
    GroupProviderPort, RegionProviderPort, TriggerRepositoryPort, TriggerRow,
};
use crate::application::services::overlap;

/// Result of an event-list mutation
///
/// `rejected` carries unknown tokens verbatim so command adapters can
/// report them; the mutation still applies the known ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventListUpdate {
    /// Events actually added or removed (duplicates and absent members
    /// are dropped silently)
    pub applied: Vec<TriggerEvent>,
    /// Unknown tokens from the input, trimmed and lowercased
    pub rejected: Vec<String>,
}

pub struct TriggerService {
    repository: Arc<dyn TriggerRepositoryPort>,
    regions: Arc<dyn RegionProviderPort>,
    groups: Arc<dyn GroupProviderPort>,
    cache: RwLock<Vec<Arc<TriggerRecord>>>,
    /// Serializes every cache-mutating operation (single-writer
    /// discipline); readers only contend on the brief swap.
    admin_lock: Mutex<()>,
}

impl TriggerService {
    pub fn new(
        repository: Arc<dyn TriggerRepositoryPort>,
        regions: Arc<dyn RegionProviderPort>,
        groups: Arc<dyn GroupProviderPort>,
    ) -> Self {
        Self {
            repository,
            regions,
            groups,
            cache: RwLock::new(Vec::new()),
            admin_lock: Mutex::new(()),
        }
    }

    // ==========================================================================
    // Queries (gameplay path: cache only, no store traffic)
    // ==========================================================================

    pub async fn find_by_region_id(&self, region_id: RegionId) -> Option<Arc<TriggerRecord>> {
        self.cache
            .read()
            .await
            .iter()
            .find(|record| record.region_id == region_id)
            .cloned()
    }

    pub async fn find_by_region_name(&self, region_name: &str) -> Option<Arc<TriggerRecord>> {
        let region = self.regions.region_by_name(region_name)?;
        self.find_by_region_id(region.id).await
    }

    /// All cached records, in load order.
    pub async fn records(&self) -> Vec<Arc<TriggerRecord>> {
        self.cache.read().await.clone()
    }

    /// Resolve the single authoritative record at a point: of all
    /// configured regions containing it, the one with the highest
    /// z-order (first-encountered wins ties).
    pub async fn resolve_topmost_at(&self, x: i32, y: i32) -> Option<Arc<TriggerRecord>> {
        let candidates: Vec<_> = self
            .cache
            .read()
            .await
            .iter()
            .filter_map(|record| {
                self.regions
                    .region_by_id(record.region_id)
                    .filter(|region| region.contains_point(x, y))
                    .map(|region| (Arc::clone(record), region.z))
            })
            .collect();
        overlap::topmost(candidates)
    }

    // ==========================================================================
    // Reload
    // ==========================================================================

    /// Discard the cache and rebuild it from the backing store, keeping
    /// only rows whose region exists in the host's active world.
    ///
    /// A store failure is logged and returned; the previous cache stays
    /// in place so the engine remains operational on stale data.
    pub async fn reload(&self) -> Result<usize, TriggerError> {
        let _guard = self.admin_lock.lock().await;
        let world = self.regions.active_world();

        let rows = match self.repository.load_all().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(world = %world, error = %e, "trigger reload failed, keeping previous cache");
                return Err(e.into());
            }
        };

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let region_id = RegionId::new(row.region_id);
            // Rows for other worlds' regions are invisible to the active
            // region registry and are skipped, not deleted.
            let Some(region) = self.regions.region_by_id(region_id) else {
                debug!(region_id = %region_id, "skipping trigger row outside the active world");
                continue;
            };
            records.push(Arc::new(self.hydrate(row, &region.name)));
        }

        let count = records.len();
        *self.cache.write().await = records;
        info!(world = %world, count, "trigger cache reloaded");
        Ok(count)
    }

    /// Build a record from its raw row, revalidating references.
    fn hydrate(&self, row: TriggerRow, region_name: &str) -> TriggerRecord {
        let raw_events = row.events.unwrap_or_default();
        let validation = validate_list(&raw_events);
        if !validation.invalid.is_empty() {
            warn!(
                region = %region_name,
                tokens = ?validation.invalid,
                "ignoring unknown event tokens on stored trigger"
            );
        }

        let temp_group = normalize_text(row.temp_group.as_deref()).and_then(|name| {
            if self.groups.group_exists(&name) {
                Some(name)
            } else {
                warn!(region = %region_name, group = %name, "temp group of trigger is invalid");
                None
            }
        });

        let mut record = TriggerRecord::new(RegionId::new(row.region_id));
        record.id = row.id.into();
        record.events = validation.valid.into_iter().collect();
        record.enter_msg = normalize_text(row.enter_msg.as_deref());
        record.leave_msg = normalize_text(row.leave_msg.as_deref());
        record.message = normalize_text(row.message.as_deref());
        record.msg_interval = u32::try_from(row.message_interval.unwrap_or(0)).unwrap_or(0);
        record.temp_group = temp_group;
        record.item_bans = row
            .item_bans
            .as_deref()
            .map(regionward_domain::DelimitedList::decode)
            .unwrap_or_default();
        record.proj_bans = row
            .proj_bans
            .as_deref()
            .map(regionward_domain::DelimitedList::decode)
            .unwrap_or_default();
        record.tile_bans = row
            .tile_bans
            .as_deref()
            .map(regionward_domain::DelimitedList::decode)
            .unwrap_or_default();
        record.permissions = row
            .permissions
            .as_deref()
            .map(regionward_domain::DelimitedList::decode)
            .unwrap_or_default();
        record
    }

    // ==========================================================================
    // Record lifecycle
    // ==========================================================================

    /// Create a record for a region, defaulting to no events.
    pub async fn create(
        &self,
        region_name: &str,
        initial_events: Option<&str>,
    ) -> Result<Arc<TriggerRecord>, TriggerError> {
        let _guard = self.admin_lock.lock().await;
        let region = self
            .regions
            .region_by_name(region_name)
            .ok_or_else(|| TriggerError::region_not_found(region_name))?;

        if self.find_by_region_id(region.id).await.is_some() {
            return Err(TriggerError::already_configured(region_name));
        }

        let mut record = TriggerRecord::new(region.id);
        if let Some(csv) = initial_events {
            record.events.merge(validate_list(csv).valid);
        }

        record.id = self
            .repository
            .insert(region.id, record.events.encode())
            .await?;

        let record = Arc::new(record);
        self.cache.write().await.push(Arc::clone(&record));
        Ok(record)
    }

    /// Fetch the record for a region, creating an empty one if absent.
    ///
    /// This is the entry point for `set-*` command adapters; creation is
    /// an explicit part of the contract rather than a hidden side effect.
    pub async fn get_or_create(
        &self,
        region_name: &str,
    ) -> Result<Arc<TriggerRecord>, TriggerError> {
        if let Some(record) = self.find_by_region_name(region_name).await {
            return Ok(record);
        }
        match self.create(region_name, None).await {
            Ok(record) => Ok(record),
            // Lost a race with a concurrent create; the record exists now.
            Err(TriggerError::AlreadyConfigured { .. }) => self
                .find_by_region_name(region_name)
                .await
                .ok_or_else(|| TriggerError::region_not_found(region_name)),
            Err(e) => Err(e),
        }
    }

    /// Delete a region's record. Success when no record exists.
    pub async fn delete(&self, region_name: &str) -> Result<(), TriggerError> {
        let Some(region) = self.regions.region_by_name(region_name) else {
            return Ok(());
        };
        self.delete_by_region_id(region.id).await
    }

    /// Cascading delete for the host's region-deleted hook.
    pub async fn delete_by_region_id(&self, region_id: RegionId) -> Result<(), TriggerError> {
        let _guard = self.admin_lock.lock().await;
        if self.find_by_region_id(region_id).await.is_none() {
            return Ok(());
        }
        self.repository.delete(region_id).await?;
        self.cache
            .write()
            .await
            .retain(|record| record.region_id != region_id);
        Ok(())
    }

    // ==========================================================================
    // Event list mutations
    // ==========================================================================

    pub async fn add_events(
        &self,
        region_name: &str,
        csv: &str,
    ) -> Result<EventListUpdate, TriggerError> {
        let validation = Self::require_events(csv)?;
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;

        let mut updated = (*record).clone();
        let applied = updated.events.merge(validation.valid);
        if !applied.is_empty() {
            self.repository
                .update_events(record.id, updated.events.encode())
                .await?;
            self.commit(updated).await;
        }
        Ok(EventListUpdate {
            applied,
            rejected: validation.invalid,
        })
    }

    pub async fn remove_events(
        &self,
        region_name: &str,
        csv: &str,
    ) -> Result<EventListUpdate, TriggerError> {
        let validation = Self::require_events(csv)?;
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;

        let mut updated = (*record).clone();
        let mut applied = Vec::new();
        for event in validation.valid {
            if updated.events.remove(event) && !applied.contains(&event) {
                applied.push(event);
            }
        }
        if !applied.is_empty() {
            self.repository
                .update_events(record.id, updated.events.encode())
                .await?;
            self.commit(updated).await;
        }
        Ok(EventListUpdate {
            applied,
            rejected: validation.invalid,
        })
    }

    /// Reject input that yields no known event at all.
    fn require_events(csv: &str) -> Result<regionward_domain::EventListValidation, TriggerError> {
        let validation = validate_list(csv);
        if validation.valid.is_empty() {
            let reason = if validation.invalid.is_empty() {
                "no events given".to_string()
            } else {
                format!("unknown events: {}", validation.invalid.join(", "))
            };
            return Err(TriggerError::InvalidEventList(reason));
        }
        Ok(validation)
    }

    // ==========================================================================
    // Scalar field setters (idempotence short-circuit, write-then-swap)
    // ==========================================================================

    pub async fn set_enter_message(
        &self,
        region_name: &str,
        value: Option<&str>,
    ) -> Result<(), TriggerError> {
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;
        let value = normalize_text(value);
        if record.enter_msg == value {
            return Ok(());
        }
        self.repository
            .update_enter_msg(record.id, value.clone())
            .await?;
        let mut updated = (*record).clone();
        updated.enter_msg = value;
        self.commit(updated).await;
        Ok(())
    }

    pub async fn set_leave_message(
        &self,
        region_name: &str,
        value: Option<&str>,
    ) -> Result<(), TriggerError> {
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;
        let value = normalize_text(value);
        if record.leave_msg == value {
            return Ok(());
        }
        self.repository
            .update_leave_msg(record.id, value.clone())
            .await?;
        let mut updated = (*record).clone();
        updated.leave_msg = value;
        self.commit(updated).await;
        Ok(())
    }

    pub async fn set_message(
        &self,
        region_name: &str,
        value: Option<&str>,
    ) -> Result<(), TriggerError> {
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;
        let value = normalize_text(value);
        if record.message == value {
            return Ok(());
        }
        self.repository
            .update_message(record.id, value.clone())
            .await?;
        let mut updated = (*record).clone();
        updated.message = value;
        self.commit(updated).await;
        Ok(())
    }

    /// Set the periodic-message interval in seconds; 0 disables
    /// repetition. Negative input is a validation error.
    pub async fn set_msg_interval(
        &self,
        region_name: &str,
        interval: i64,
    ) -> Result<(), TriggerError> {
        let interval = u32::try_from(interval).map_err(|_| {
            TriggerError::validation(format!(
                "message interval must be between 0 and {}",
                u32::MAX
            ))
        })?;
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;
        if record.msg_interval == interval {
            return Ok(());
        }
        self.repository
            .update_msg_interval(record.id, interval)
            .await?;
        let mut updated = (*record).clone();
        updated.msg_interval = interval;
        self.commit(updated).await;
        Ok(())
    }

    /// Set or clear the temporary group. A non-empty name must resolve
    /// in the host's group registry.
    pub async fn set_temp_group(
        &self,
        region_name: &str,
        group: Option<&str>,
    ) -> Result<(), TriggerError> {
        let group = normalize_text(group);
        if let Some(name) = &group {
            if !self.groups.group_exists(name) {
                return Err(TriggerError::group_not_found(name));
            }
        }
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;
        if record.temp_group == group {
            return Ok(());
        }
        self.repository
            .update_temp_group(record.id, group.clone())
            .await?;
        let mut updated = (*record).clone();
        updated.temp_group = group;
        self.commit(updated).await;
        Ok(())
    }

    // ==========================================================================
    // Ban lists (membership-guarded)
    // ==========================================================================

    pub async fn add_item_ban(&self, region_name: &str, item: &str) -> Result<(), TriggerError> {
        let item = item.trim();
        if item.is_empty() {
            return Err(TriggerError::validation("item name must not be blank"));
        }
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;
        if record.item_is_banned(item) {
            return Err(TriggerError::already_banned(item));
        }
        let mut updated = (*record).clone();
        updated.ban_item(item);
        self.repository
            .update_item_bans(record.id, updated.item_bans.encode())
            .await?;
        self.commit(updated).await;
        Ok(())
    }

    pub async fn remove_item_ban(&self, region_name: &str, item: &str) -> Result<(), TriggerError> {
        let item = item.trim();
        if item.is_empty() {
            return Err(TriggerError::validation("item name must not be blank"));
        }
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;
        if !record.item_is_banned(item) {
            return Err(TriggerError::not_banned(item));
        }
        let mut updated = (*record).clone();
        updated.unban_item(item);
        self.repository
            .update_item_bans(record.id, updated.item_bans.encode())
            .await?;
        self.commit(updated).await;
        Ok(())
    }

    pub async fn add_proj_ban(&self, region_name: &str, proj_id: i32) -> Result<(), TriggerError> {
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;
        if record.projectile_is_banned(proj_id) {
            return Err(TriggerError::already_banned(format!("projectile {proj_id}")));
        }
        let mut updated = (*record).clone();
        updated.ban_projectile(proj_id);
        self.repository
            .update_proj_bans(record.id, updated.proj_bans.encode())
            .await?;
        self.commit(updated).await;
        Ok(())
    }

    pub async fn remove_proj_ban(
        &self,
        region_name: &str,
        proj_id: i32,
    ) -> Result<(), TriggerError> {
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;
        if !record.projectile_is_banned(proj_id) {
            return Err(TriggerError::not_banned(format!("projectile {proj_id}")));
        }
        let mut updated = (*record).clone();
        updated.unban_projectile(proj_id);
        self.repository
            .update_proj_bans(record.id, updated.proj_bans.encode())
            .await?;
        self.commit(updated).await;
        Ok(())
    }

    pub async fn add_tile_ban(&self, region_name: &str, tile_id: i32) -> Result<(), TriggerError> {
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;
        if record.tile_is_banned(tile_id) {
            return Err(TriggerError::already_banned(format!("tile {tile_id}")));
        }
        let mut updated = (*record).clone();
        updated.ban_tile(tile_id);
        self.repository
            .update_tile_bans(record.id, updated.tile_bans.encode())
            .await?;
        self.commit(updated).await;
        Ok(())
    }

    pub async fn remove_tile_ban(
        &self,
        region_name: &str,
        tile_id: i32,
    ) -> Result<(), TriggerError> {
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;
        if !record.tile_is_banned(tile_id) {
            return Err(TriggerError::not_banned(format!("tile {tile_id}")));
        }
        let mut updated = (*record).clone();
        updated.unban_tile(tile_id);
        self.repository
            .update_tile_bans(record.id, updated.tile_bans.encode())
            .await?;
        self.commit(updated).await;
        Ok(())
    }

    // ==========================================================================
    // Temporary permissions (bulk, whole-field snapshot semantics)
    // ==========================================================================

    pub async fn add_permissions(
        &self,
        region_name: &str,
        tokens: &[String],
    ) -> Result<(), TriggerError> {
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;
        let mut updated = (*record).clone();
        let mut changed = false;
        for token in tokens {
            changed |= updated.add_permission(token);
        }
        if !changed {
            return Ok(());
        }
        self.repository
            .update_permissions(record.id, updated.permissions.encode())
            .await?;
        self.commit(updated).await;
        Ok(())
    }

    pub async fn remove_permissions(
        &self,
        region_name: &str,
        tokens: &[String],
    ) -> Result<(), TriggerError> {
        let _guard = self.admin_lock.lock().await;
        let record = self.cached_record(region_name).await?;
        let mut updated = (*record).clone();
        let mut changed = false;
        for token in tokens {
            changed |= updated.remove_permission(token);
        }
        if !changed {
            return Ok(());
        }
        self.repository
            .update_permissions(record.id, updated.permissions.encode())
            .await?;
        self.commit(updated).await;
        Ok(())
    }

    // ==========================================================================
    // Internals
    // ==========================================================================

    /// Resolve a region name to its cached record, for mutation paths.
    async fn cached_record(&self, region_name: &str) -> Result<Arc<TriggerRecord>, TriggerError> {
        let region = self
            .regions
            .region_by_name(region_name)
            .ok_or_else(|| TriggerError::region_not_found(region_name))?;
        self.find_by_region_id(region.id)
            .await
            .ok_or_else(|| TriggerError::region_not_found(region_name))
    }

    /// Swap an updated record into the cache. Only called after a
    /// successful store write, under the admin lock.
    async fn commit(&self, updated: TriggerRecord) {
        let mut cache = self.cache.write().await;
        if let Some(slot) = cache
            .iter_mut()
            .find(|record| record.region_id == updated.region_id)
        {
            *slot = Arc::new(updated);
        }
    }
}
