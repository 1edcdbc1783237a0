//! Trigger repository port - Backing-store access for trigger records
//!
//! Every mutating call is a single-row write keyed by the store-assigned
//! id. A write that matches no row is a consistency fault, not a
//! transient one, and surfaces as [`RepositoryError::NoRowsAffected`] so
//! the service can refuse to touch its cache.

use async_trait::async_trait;
use thiserror::Error;

use regionward_domain::{RegionId, TriggerId};

/// Backing-store failure for trigger operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The query or connection itself failed
    #[error("database error: {0}")]
    Database(String),

    /// The write succeeded at the transport level but matched no row
    #[error("database error: no affected rows")]
    NoRowsAffected,
}

/// Raw column record, one per trigger row
///
/// Set-valued columns stay in their comma-joined persisted form here; the
/// service owns decoding them through the domain codecs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerRow {
    pub id: i64,
    pub region_id: i64,
    pub events: Option<String>,
    pub enter_msg: Option<String>,
    pub leave_msg: Option<String>,
    pub message: Option<String>,
    pub message_interval: Option<i64>,
    pub temp_group: Option<String>,
    pub item_bans: Option<String>,
    pub proj_bans: Option<String>,
    pub tile_bans: Option<String>,
    pub permissions: Option<String>,
}

/// Port for the trigger backing store
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TriggerRepositoryPort: Send + Sync {
    /// Load every stored row; the caller scopes rows to the active world.
    async fn load_all(&self) -> Result<Vec<TriggerRow>, RepositoryError>;

    /// Insert a new row and return its store-assigned id.
    async fn insert(&self, region_id: RegionId, events: String)
        -> Result<TriggerId, RepositoryError>;

    /// Delete the row for a region; fails with `NoRowsAffected` when no
    /// row matched.
    async fn delete(&self, region_id: RegionId) -> Result<(), RepositoryError>;

    async fn update_events(&self, id: TriggerId, events: String) -> Result<(), RepositoryError>;

    async fn update_enter_msg(
        &self,
        id: TriggerId,
        value: Option<String>,
    ) -> Result<(), RepositoryError>;

    async fn update_leave_msg(
        &self,
        id: TriggerId,
        value: Option<String>,
    ) -> Result<(), RepositoryError>;

    async fn update_message(
        &self,
        id: TriggerId,
        value: Option<String>,
    ) -> Result<(), RepositoryError>;

    async fn update_msg_interval(&self, id: TriggerId, interval: u32)
        -> Result<(), RepositoryError>;

    async fn update_temp_group(
        &self,
        id: TriggerId,
        group: Option<String>,
    ) -> Result<(), RepositoryError>;

    async fn update_item_bans(&self, id: TriggerId, encoded: String)
        -> Result<(), RepositoryError>;

    async fn update_proj_bans(&self, id: TriggerId, encoded: String)
        -> Result<(), RepositoryError>;

    async fn update_tile_bans(&self, id: TriggerId, encoded: String)
        -> Result<(), RepositoryError>;

    async fn update_permissions(
        &self,
        id: TriggerId,
        encoded: String,
    ) -> Result<(), RepositoryError>;
}
