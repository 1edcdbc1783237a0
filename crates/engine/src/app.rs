//! Engine composition root
//!
//! Wires the SQLite store to the trigger service behind the host's
//! region and group providers. Hosts embed `TriggerEngine` and route
//! their command and gameplay hooks through `service()`.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::application::ports::outbound::{GroupProviderPort, RegionProviderPort};
use crate::application::services::TriggerService;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::SqliteTriggerRepository;

pub struct TriggerEngine {
    service: Arc<TriggerService>,
}

impl TriggerEngine {
    /// Open (creating if needed) the configured database and build the
    /// service, loading the trigger cache when the config asks for it.
    pub async fn connect(
        config: &AppConfig,
        regions: Arc<dyn RegionProviderPort>,
        groups: Arc<dyn GroupProviderPort>,
    ) -> Result<Self> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", config.db_path))
            .await
            .with_context(|| format!("failed to open database at {}", config.db_path))?;
        Self::with_pool(pool, config.reload_on_start, regions, groups).await
    }

    /// Build against an existing pool (tests use `sqlite::memory:`).
    pub async fn with_pool(
        pool: SqlitePool,
        reload_on_start: bool,
        regions: Arc<dyn RegionProviderPort>,
        groups: Arc<dyn GroupProviderPort>,
    ) -> Result<Self> {
        let repository = SqliteTriggerRepository::new(pool)
            .await
            .context("failed to prepare trigger table")?;
        let service = Arc::new(TriggerService::new(Arc::new(repository), regions, groups));

        if reload_on_start {
            let count = service
                .reload()
                .await
                .context("failed to load triggers from the store")?;
            info!(count, "trigger engine ready");
        }

        Ok(Self { service })
    }

    pub fn service(&self) -> Arc<TriggerService> {
        Arc::clone(&self.service)
    }
}
