//! SQLite trigger repository for production persistence
//!
//! Table and column names match the historical `RtRegions` layout so an
//! existing database file keeps working unchanged. Set-valued fields are
//! stored as comma-joined text; decoding them is the domain's job, this
//! layer only moves raw strings.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use regionward_domain::{RegionId, TriggerId};

use crate::application::ports::outbound::{
    RepositoryError, TriggerRepositoryPort, TriggerRow,
};

pub struct SqliteTriggerRepository {
    pool: SqlitePool,
}

impl SqliteTriggerRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepositoryError> {
        // Ensure table exists
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS RtRegions (
                Id INTEGER PRIMARY KEY AUTOINCREMENT,
                RegionId INTEGER NOT NULL UNIQUE,
                Events TEXT,
                EnterMsg TEXT,
                LeaveMsg TEXT,
                Message TEXT,
                MessageInterval INTEGER NOT NULL DEFAULT 0,
                TempGroup TEXT,
                Itembans TEXT,
                Projbans TEXT,
                Tilebans TEXT,
                Permissions TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(Self { pool })
    }

    fn map_row(row: &sqlx::sqlite::SqliteRow) -> TriggerRow {
        TriggerRow {
            id: row.get("Id"),
            region_id: row.get("RegionId"),
            events: row.get("Events"),
            enter_msg: row.get("EnterMsg"),
            leave_msg: row.get("LeaveMsg"),
            message: row.get("Message"),
            message_interval: row.get("MessageInterval"),
            temp_group: row.get("TempGroup"),
            item_bans: row.get("Itembans"),
            proj_bans: row.get("Projbans"),
            tile_bans: row.get("Tilebans"),
            permissions: row.get("Permissions"),
        }
    }

    async fn update_column(
        &self,
        column: &'static str,
        id: TriggerId,
        value: Option<String>,
    ) -> Result<(), RepositoryError> {
        // `column` is a compile-time constant, never caller input.
        let result = sqlx::query(&format!("UPDATE RtRegions SET {column} = ? WHERE Id = ?"))
            .bind(value)
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NoRowsAffected);
        }
        Ok(())
    }
}

#[async_trait]
impl TriggerRepositoryPort for SqliteTriggerRepository {
    async fn load_all(&self) -> Result<Vec<TriggerRow>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM RtRegions ORDER BY Id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(rows.iter().map(Self::map_row).collect())
    }

    async fn insert(&self, region_id: RegionId, events: String) -> Result<TriggerId, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO RtRegions (RegionId, Events, MessageInterval)
            VALUES (?, ?, 0)
            "#,
        )
        .bind(region_id.value())
        .bind(events)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(TriggerId::new(result.last_insert_rowid()))
    }

    async fn delete(&self, region_id: RegionId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM RtRegions WHERE RegionId = ?")
            .bind(region_id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NoRowsAffected);
        }
        Ok(())
    }

    async fn update_events(&self, id: TriggerId, events: String) -> Result<(), RepositoryError> {
        self.update_column("Events", id, Some(events)).await
    }

    async fn update_enter_msg(
        &self,
        id: TriggerId,
        value: Option<String>,
    ) -> Result<(), RepositoryError> {
        self.update_column("EnterMsg", id, value).await
    }

    async fn update_leave_msg(
        &self,
        id: TriggerId,
        value: Option<String>,
    ) -> Result<(), RepositoryError> {
        self.update_column("LeaveMsg", id, value).await
    }

    async fn update_message(
        &self,
        id: TriggerId,
        value: Option<String>,
    ) -> Result<(), RepositoryError> {
        self.update_column("Message", id, value).await
    }

    async fn update_msg_interval(&self, id: TriggerId, interval: u32) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE RtRegions SET MessageInterval = ? WHERE Id = ?")
            .bind(i64::from(interval))
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NoRowsAffected);
        }
        Ok(())
    }

    async fn update_temp_group(
        &self,
        id: TriggerId,
        value: Option<String>,
    ) -> Result<(), RepositoryError> {
        self.update_column("TempGroup", id, value).await
    }

    async fn update_item_bans(&self, id: TriggerId, encoded: String) -> Result<(), RepositoryError> {
        self.update_column("Itembans", id, Some(encoded)).await
    }

    async fn update_proj_bans(&self, id: TriggerId, encoded: String) -> Result<(), RepositoryError> {
        self.update_column("Projbans", id, Some(encoded)).await
    }

    async fn update_tile_bans(&self, id: TriggerId, encoded: String) -> Result<(), RepositoryError> {
        self.update_column("Tilebans", id, Some(encoded)).await
    }

    async fn update_permissions(
        &self,
        id: TriggerId,
        encoded: String,
    ) -> Result<(), RepositoryError> {
        self.update_column("Permissions", id, Some(encoded)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repository() -> (SqliteTriggerRepository, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let db_path = temp_dir.path().join("triggers.db");
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path.display()))
            .await
            .expect("pool");
        let repo = SqliteTriggerRepository::new(pool).await.expect("schema");
        (repo, temp_dir)
    }

    #[tokio::test]
    async fn insert_assigns_rowids_and_load_all_round_trips() {
        let (repo, _dir) = repository().await;

        let first = repo
            .insert(RegionId::new(5), "entermsg".to_string())
            .await
            .expect("insert");
        let second = repo
            .insert(RegionId::new(9), "none".to_string())
            .await
            .expect("insert");
        assert_ne!(first, second);

        let rows = repo.load_all().await.expect("load");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].region_id, 5);
        assert_eq!(rows[0].events.as_deref(), Some("entermsg"));
        assert_eq!(rows[0].message_interval, Some(0));
        assert_eq!(rows[1].region_id, 9);
    }

    #[tokio::test]
    async fn region_id_is_unique() {
        let (repo, _dir) = repository().await;
        repo.insert(RegionId::new(5), "none".to_string())
            .await
            .expect("insert");
        assert!(matches!(
            repo.insert(RegionId::new(5), "none".to_string()).await,
            Err(RepositoryError::Database(_))
        ));
    }

    #[tokio::test]
    async fn updates_against_missing_rows_report_no_rows_affected() {
        let (repo, _dir) = repository().await;
        assert_eq!(
            repo.update_events(TriggerId::new(42), "kill".to_string())
                .await,
            Err(RepositoryError::NoRowsAffected)
        );
        assert_eq!(
            repo.delete(RegionId::new(42)).await,
            Err(RepositoryError::NoRowsAffected)
        );
    }

    #[tokio::test]
    async fn field_updates_persist() {
        let (repo, _dir) = repository().await;
        let id = repo
            .insert(RegionId::new(5), "none".to_string())
            .await
            .expect("insert");

        repo.update_enter_msg(id, Some("welcome".to_string()))
            .await
            .expect("enter msg");
        repo.update_msg_interval(id, 30).await.expect("interval");
        repo.update_temp_group(id, Some("vip".to_string()))
            .await
            .expect("temp group");
        repo.update_tile_bans(id, "10,138".to_string())
            .await
            .expect("tile bans");
        repo.update_temp_group(id, None).await.expect("clear group");

        let rows = repo.load_all().await.expect("load");
        assert_eq!(rows[0].enter_msg.as_deref(), Some("welcome"));
        assert_eq!(rows[0].message_interval, Some(30));
        assert_eq!(rows[0].temp_group, None);
        assert_eq!(rows[0].tile_bans.as_deref(), Some("10,138"));
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let (repo, _dir) = repository().await;
        repo.insert(RegionId::new(5), "none".to_string())
            .await
            .expect("insert");
        repo.delete(RegionId::new(5)).await.expect("delete");
        assert!(repo.load_all().await.expect("load").is_empty());
    }
}
