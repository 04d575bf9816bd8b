//! Record store gateway: the boundary to the persistent `crops` table.

use async_trait::async_trait;
use crop_core::{CropRecord, StoreError, StoredCrop};

/// Name of the target table in every store.
pub const TABLE_NAME: &str = "crops";

/// Number of rows read back after a load, as shown in the records view.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Operations the loader and the manual insert path need from a store.
///
/// Each call acquires its own connection or session and releases it on every
/// exit path. Implementations must not hold a connection across calls on
/// behalf of the caller.
#[async_trait]
pub trait CropGateway: Send + Sync {
    /// Short name of the store technology, used in logs.
    fn backend(&self) -> &'static str;

    /// Create the `crops` table if it does not exist.
    async fn ensure_table(&self) -> Result<(), StoreError>;

    /// Insert a single record and return its store-assigned id.
    async fn insert_one(&self, record: &CropRecord) -> Result<i64, StoreError>;

    /// Insert all records in one transaction.
    ///
    /// Either every record is committed or none is.
    async fn insert_many(&self, records: &[CropRecord]) -> Result<(), StoreError>;

    /// Most recently inserted records, highest id first.
    async fn query_recent(&self, limit: usize) -> Result<Vec<StoredCrop>, StoreError>;

    /// Number of rows in the table.
    async fn count(&self) -> Result<u64, StoreError>;
}
