//! MySQL implementation of the crop gateway.

use crate::error::store_error;
use async_trait::async_trait;
use chrono::NaiveDate;
use crop_core::{CropRecord, GrowthStage, StoreError, StoredCrop, DATE_FORMAT};
use crop_loader::CropGateway;
use mysql_async::{prelude::*, Params, Pool, TxOpts, Value};
use tracing::{debug, info, warn};

/// Maximum rows per multi-row `INSERT` statement.
///
/// A chunk larger than this is sent as several statements inside the same
/// transaction, keeping each statement well below the placeholder limit.
pub const MAX_ROWS_PER_STATEMENT: usize = 1_000;

/// Table definition. `CHECK` constraints are enforced from MySQL 8.0.16.
pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS `crops` (
    `id` BIGINT NOT NULL AUTO_INCREMENT,
    `crop_name` VARCHAR(255) NOT NULL,
    `planting_date` DATE NOT NULL,
    `harvest_date` DATE NOT NULL,
    `growth_stage` VARCHAR(32) NOT NULL,
    `pest_control_measures` VARCHAR(255) NOT NULL,
    `yield_prediction` INT UNSIGNED NOT NULL,
    PRIMARY KEY (`id`),
    CONSTRAINT `crops_harvest_after_planting` CHECK (`harvest_date` > `planting_date`),
    CONSTRAINT `crops_named` CHECK (`crop_name` <> '' AND `pest_control_measures` <> '')
)";

const COLUMNS: [&str; 6] = [
    "crop_name",
    "planting_date",
    "harvest_date",
    "growth_stage",
    "pest_control_measures",
    "yield_prediction",
];

const SELECT_RECENT_SQL: &str = "SELECT `id`, `crop_name`, \
    DATE_FORMAT(`planting_date`, '%Y-%m-%d'), DATE_FORMAT(`harvest_date`, '%Y-%m-%d'), \
    `growth_stage`, `pest_control_measures`, `yield_prediction` \
    FROM `crops` ORDER BY `id` DESC LIMIT ?";

type RecentRow = (i64, String, String, String, String, String, u32);

/// Gateway over a MySQL connection pool.
///
/// Every call checks a connection out of the pool and returns it when the
/// connection handle is dropped, on success and failure alike.
#[derive(Clone)]
pub struct MySqlGateway {
    pool: Pool,
}

impl MySqlGateway {
    /// Connect using a connection string and verify the server is reachable.
    pub async fn connect(connection_string: &str) -> Result<Self, StoreError> {
        let pool = Pool::from_url(connection_string).map_err(store_error)?;
        let mut conn = pool.get_conn().await.map_err(store_error)?;
        conn.query_drop("SELECT 1").await.map_err(store_error)?;
        drop(conn);
        info!("Connected to MySQL");
        Ok(Self { pool })
    }

    /// Create a gateway over an existing pool.
    pub fn with_pool(pool: Pool) -> Self {
        Self { pool }
    }

    /// Close all pooled connections.
    pub async fn disconnect(self) -> Result<(), StoreError> {
        self.pool.disconnect().await.map_err(store_error)
    }
}

/// Build a multi-row `INSERT` for `rows` with positional parameters.
pub fn build_insert(rows: &[CropRecord]) -> (String, Params) {
    let col_placeholders: Vec<&str> = COLUMNS.iter().map(|_| "?").collect();
    let row_template = format!("({})", col_placeholders.join(", "));
    let rows_template: Vec<&str> = (0..rows.len()).map(|_| row_template.as_str()).collect();

    let sql = format!(
        "INSERT INTO `crops` ({}) VALUES {}",
        COLUMNS
            .iter()
            .map(|c| format!("`{c}`"))
            .collect::<Vec<_>>()
            .join(", "),
        rows_template.join(", ")
    );

    let mut params: Vec<Value> = Vec::with_capacity(rows.len() * COLUMNS.len());
    for row in rows {
        params.push(Value::from(row.crop_name.as_str()));
        params.push(Value::from(row.planting_date.format(DATE_FORMAT).to_string()));
        params.push(Value::from(row.harvest_date.format(DATE_FORMAT).to_string()));
        params.push(Value::from(row.growth_stage.as_str()));
        params.push(Value::from(row.pest_control_measure.as_str()));
        params.push(Value::from(row.yield_prediction));
    }

    (sql, Params::Positional(params))
}

fn parse_date(column: &str, value: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| StoreError::Decode(format!("{column} '{value}': {e}")))
}

fn stored_crop(row: RecentRow) -> Result<StoredCrop, StoreError> {
    let (id, crop_name, planting, harvest, stage, pest_control_measure, yield_prediction) = row;
    let growth_stage: GrowthStage = stage
        .parse()
        .map_err(|e| StoreError::Decode(format!("row {id}: {e}")))?;
    Ok(StoredCrop {
        id,
        record: CropRecord {
            crop_name,
            planting_date: parse_date("planting_date", &planting)?,
            harvest_date: parse_date("harvest_date", &harvest)?,
            growth_stage,
            pest_control_measure,
            yield_prediction,
        },
    })
}

#[async_trait]
impl CropGateway for MySqlGateway {
    fn backend(&self) -> &'static str {
        "mysql"
    }

    async fn ensure_table(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.get_conn().await.map_err(store_error)?;
        debug!("DDL: {}", CREATE_TABLE_SQL);
        conn.query_drop(CREATE_TABLE_SQL).await.map_err(store_error)
    }

    async fn insert_one(&self, record: &CropRecord) -> Result<i64, StoreError> {
        let mut conn = self.pool.get_conn().await.map_err(store_error)?;
        let (sql, params) = build_insert(std::slice::from_ref(record));
        conn.exec_drop(sql, params).await.map_err(store_error)?;

        let id = conn
            .last_insert_id()
            .ok_or_else(|| StoreError::Transaction("server returned no insert id".to_string()))?;
        i64::try_from(id).map_err(|_| StoreError::Decode(format!("insert id {id} out of range")))
    }

    async fn insert_many(&self, records: &[CropRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut conn = self.pool.get_conn().await.map_err(store_error)?;
        let mut tx = conn
            .start_transaction(TxOpts::default())
            .await
            .map_err(store_error)?;

        for rows in records.chunks(MAX_ROWS_PER_STATEMENT) {
            let (sql, params) = build_insert(rows);
            if let Err(e) = tx.exec_drop(sql, params).await {
                if let Err(rollback) = tx.rollback().await {
                    warn!("Rollback after failed insert also failed: {}", rollback);
                }
                return Err(store_error(e));
            }
        }

        tx.commit().await.map_err(store_error)
    }

    async fn query_recent(&self, limit: usize) -> Result<Vec<StoredCrop>, StoreError> {
        let mut conn = self.pool.get_conn().await.map_err(store_error)?;
        let rows: Vec<RecentRow> = conn
            .exec(SELECT_RECENT_SQL, (limit as u64,))
            .await
            .map_err(store_error)?;
        rows.into_iter().map(stored_crop).collect()
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let mut conn = self.pool.get_conn().await.map_err(store_error)?;
        let count: Option<u64> = conn
            .query_first("SELECT COUNT(*) FROM `crops`")
            .await
            .map_err(store_error)?;
        Ok(count.unwrap_or(0))
    }
}
