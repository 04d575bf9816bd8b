//! Manual single-record insert.

use crate::gateway::CropGateway;
use crop_core::{FieldDomain, ManualEntry, StoreError, ValidationError};
use thiserror::Error;
use tracing::info;

/// Errors from the manual insert path.
#[derive(Debug, Error)]
pub enum InsertError {
    /// The entry was rejected before reaching the store.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The store rejected the insert.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Validate a manually entered record and insert it.
///
/// Nothing is sent to the gateway unless validation passes. Store failures
/// are returned as-is without retry.
pub async fn insert_one(
    gateway: &dyn CropGateway,
    domain: &FieldDomain,
    entry: &ManualEntry,
) -> Result<i64, InsertError> {
    let record = entry.validate(domain)?;
    let id = gateway.insert_one(&record).await?;
    info!(
        "Inserted {} record {} into {}",
        record.crop_name,
        id,
        gateway.backend()
    );
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryGateway;

    fn entry() -> ManualEntry {
        ManualEntry {
            crop_name: Some("Potato".to_string()),
            planting_date: Some("2025-02-01".to_string()),
            harvest_date: Some("2025-05-15".to_string()),
            growth_stage: Some("Flowering".to_string()),
            pest_control_measure: Some("Regular field monitoring".to_string()),
            yield_prediction: Some("3100".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_valid_entry() {
        let gateway = InMemoryGateway::new();
        let id = insert_one(&gateway, &FieldDomain::standard(), &entry())
            .await
            .unwrap();

        assert_eq!(id, 1);
        let rows = gateway.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record.crop_name, "Potato");
    }

    #[tokio::test]
    async fn test_invalid_entry_is_not_inserted() {
        let gateway = InMemoryGateway::new();
        let mut entry = entry();
        entry.growth_stage = None;

        let result = insert_one(&gateway, &FieldDomain::standard(), &entry).await;

        assert!(matches!(
            result,
            Err(InsertError::Validation(ValidationError::MissingField(
                "growth_stage"
            )))
        ));
        assert!(gateway.rows().is_empty());
    }
}
