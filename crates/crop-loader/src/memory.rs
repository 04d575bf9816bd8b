//! Vector-backed gateway for tests and embedded use.

use crate::gateway::CropGateway;
use async_trait::async_trait;
use crop_core::{CropRecord, StoreError, StoredCrop};
use std::sync::{Mutex, MutexGuard};

/// An in-process `crops` table.
///
/// Applies the same row checks as the SQL adapters' `CHECK` constraints and
/// keeps `insert_many` all-or-nothing.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    rows: Mutex<Vec<StoredCrop>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all rows in insertion order.
    pub fn rows(&self) -> Vec<StoredCrop> {
        self.lock().map(|rows| rows.clone()).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<StoredCrop>>, StoreError> {
        self.rows
            .lock()
            .map_err(|_| StoreError::Connection("in-memory store lock poisoned".to_string()))
    }
}

fn next_id(rows: &[StoredCrop]) -> i64 {
    rows.last().map_or(1, |row| row.id + 1)
}

#[async_trait]
impl CropGateway for InMemoryGateway {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ensure_table(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_one(&self, record: &CropRecord) -> Result<i64, StoreError> {
        record.check_row().map_err(StoreError::Constraint)?;
        let mut rows = self.lock()?;
        let id = next_id(&rows);
        rows.push(StoredCrop {
            id,
            record: record.clone(),
        });
        Ok(id)
    }

    async fn insert_many(&self, records: &[CropRecord]) -> Result<(), StoreError> {
        for (offset, record) in records.iter().enumerate() {
            record
                .check_row()
                .map_err(|e| StoreError::Constraint(format!("row {offset}: {e}")))?;
        }
        let mut rows = self.lock()?;
        let first_id = next_id(&rows);
        rows.extend(records.iter().enumerate().map(|(offset, record)| StoredCrop {
            id: first_id + offset as i64,
            record: record.clone(),
        }));
        Ok(())
    }

    async fn query_recent(&self, limit: usize) -> Result<Vec<StoredCrop>, StoreError> {
        let rows = self.lock()?;
        Ok(rows.iter().rev().take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.len() as u64)
    }
}
