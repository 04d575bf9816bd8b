//! SQLite implementation of the crop gateway.

use crate::error::store_error;
use async_trait::async_trait;
use crop_core::{CropRecord, GrowthStage, StoreError, StoredCrop};
use crop_loader::CropGateway;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Table definition, including the row checks every persisted record must pass.
pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS crops (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    crop_name TEXT NOT NULL CHECK (length(crop_name) > 0),
    planting_date TEXT NOT NULL,
    harvest_date TEXT NOT NULL,
    growth_stage TEXT NOT NULL,
    pest_control_measures TEXT NOT NULL CHECK (length(pest_control_measures) > 0),
    yield_prediction INTEGER NOT NULL CHECK (yield_prediction >= 0),
    CHECK (harvest_date > planting_date)
)";

const INSERT_SQL: &str = "INSERT INTO crops \
    (crop_name, planting_date, harvest_date, growth_stage, pest_control_measures, yield_prediction) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_RECENT_SQL: &str = "SELECT id, crop_name, planting_date, harvest_date, growth_stage, \
    pest_control_measures, yield_prediction FROM crops ORDER BY id DESC LIMIT ?1";

/// Gateway over a single SQLite connection.
///
/// Calls run on the blocking thread pool. The connection is locked for the
/// duration of one call only; an uncommitted transaction is rolled back when
/// it is dropped on an error path.
#[derive(Clone)]
pub struct SqliteGateway {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteGateway {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(store_error)?;
        info!("Opened SQLite database: {}", path.display());
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(store_error)?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_connection<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| StoreError::Connection("SQLite connection lock poisoned".to_string()))?;
            f(&mut guard).map_err(store_error)
        })
        .await
        .map_err(|e| StoreError::Connection(format!("SQLite worker failed: {e}")))?
    }
}

fn insert_record(stmt: &mut rusqlite::CachedStatement<'_>, record: &CropRecord) -> rusqlite::Result<()> {
    stmt.execute(params![
        record.crop_name,
        record.planting_date,
        record.harvest_date,
        record.growth_stage.as_str(),
        record.pest_control_measure,
        record.yield_prediction,
    ])?;
    Ok(())
}

fn stored_crop(row: &Row<'_>) -> rusqlite::Result<StoredCrop> {
    let stage: String = row.get(4)?;
    let growth_stage: GrowthStage = stage
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
    Ok(StoredCrop {
        id: row.get(0)?,
        record: CropRecord {
            crop_name: row.get(1)?,
            planting_date: row.get(2)?,
            harvest_date: row.get(3)?,
            growth_stage,
            pest_control_measure: row.get(5)?,
            yield_prediction: row.get(6)?,
        },
    })
}

#[async_trait]
impl CropGateway for SqliteGateway {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn ensure_table(&self) -> Result<(), StoreError> {
        debug!("DDL: {}", CREATE_TABLE_SQL);
        self.with_connection(|conn| conn.execute_batch(CREATE_TABLE_SQL))
            .await
    }

    async fn insert_one(&self, record: &CropRecord) -> Result<i64, StoreError> {
        let record = record.clone();
        self.with_connection(move |conn| {
            let tx = conn.transaction()?;
            let id = {
                let mut stmt = tx.prepare_cached(INSERT_SQL)?;
                insert_record(&mut stmt, &record)?;
                tx.last_insert_rowid()
            };
            tx.commit()?;
            Ok(id)
        })
        .await
    }

    async fn insert_many(&self, records: &[CropRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }
        let records = records.to_vec();
        self.with_connection(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare_cached(INSERT_SQL)?;
                for record in &records {
                    insert_record(&mut stmt, record)?;
                }
            }
            tx.commit()
        })
        .await
    }

    async fn query_recent(&self, limit: usize) -> Result<Vec<StoredCrop>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare_cached(SELECT_RECENT_SQL)?;
            let rows = stmt.query_map(params![limit], stored_crop)?;
            rows.collect()
        })
        .await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .with_connection(|conn| {
                conn.query_row("SELECT COUNT(*) FROM crops", [], |row| row.get(0))
            })
            .await?;
        Ok(count.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};

    fn record(crop: &str, season_days: i64) -> CropRecord {
        let planting = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        CropRecord {
            crop_name: crop.to_string(),
            planting_date: planting,
            harvest_date: planting + TimeDelta::days(season_days),
            growth_stage: GrowthStage::Vegetative,
            pest_control_measure: "Biological pest control".to_string(),
            yield_prediction: 1500,
        }
    }

    async fn gateway() -> SqliteGateway {
        let gateway = SqliteGateway::open_in_memory().unwrap();
        gateway.ensure_table().await.unwrap();
        gateway
    }

    #[tokio::test]
    async fn test_ensure_table_is_idempotent() {
        let gateway = gateway().await;
        gateway.ensure_table().await.unwrap();
        assert_eq!(gateway.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_one_returns_rowid() {
        let gateway = gateway().await;
        assert_eq!(gateway.insert_one(&record("Wheat", 120)).await.unwrap(), 1);
        assert_eq!(gateway.insert_one(&record("Rice", 120)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_round_trip_through_query_recent() {
        let gateway = gateway().await;
        let batch = vec![record("Wheat", 60), record("Cotton", 180)];
        gateway.insert_many(&batch).await.unwrap();

        let recent = gateway.query_recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, 2);
        assert_eq!(recent[0].record, batch[1]);
        assert_eq!(recent[1].record, batch[0]);
    }

    #[tokio::test]
    async fn test_failed_batch_commits_nothing() {
        let gateway = gateway().await;
        gateway.insert_many(&[record("Wheat", 90)]).await.unwrap();

        let batch = vec![record("Rice", 90), record("Corn", -3), record("Barley", 90)];
        let result = gateway.insert_many(&batch).await;

        assert!(matches!(result, Err(StoreError::Constraint(_))));
        assert_eq!(gateway.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_table_is_a_store_error() {
        let gateway = SqliteGateway::open_in_memory().unwrap();
        let result = gateway.insert_many(&[record("Wheat", 90)]).await;
        assert!(matches!(result, Err(StoreError::Transaction(_))));
    }

    #[tokio::test]
    async fn test_unknown_stage_fails_to_decode() {
        let gateway = gateway().await;
        gateway
            .with_connection(|conn| {
                conn.execute(
                    "INSERT INTO crops (crop_name, planting_date, harvest_date, growth_stage, \
                     pest_control_measures, yield_prediction) \
                     VALUES ('Wheat', '2024-01-01', '2024-04-01', 'Dormant', 'Crop rotation', 10)",
                    [],
                )
            })
            .await
            .unwrap();

        let result = gateway.query_recent(1).await;
        assert!(matches!(result, Err(StoreError::Decode(_))));
    }

    #[tokio::test]
    async fn test_file_backed_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crops.db");

        {
            let gateway = SqliteGateway::open(&path).unwrap();
            gateway.ensure_table().await.unwrap();
            gateway.insert_one(&record("Sugarcane", 150)).await.unwrap();
        }

        let reopened = SqliteGateway::open(&path).unwrap();
        let recent = reopened.query_recent(5).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].record.crop_name, "Sugarcane");
    }
}
