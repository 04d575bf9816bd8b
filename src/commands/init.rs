//! Init command handler.

use anyhow::Context;
use crop_loader::TABLE_NAME;

use crate::StoreTarget;

/// Create the crops table if it does not exist.
pub async fn run_init(target: StoreTarget) -> anyhow::Result<()> {
    let connection = target.connection();
    let gateway = connection
        .open()
        .await
        .with_context(|| format!("Failed to open {}", connection.describe()))?;

    gateway
        .ensure_table()
        .await
        .with_context(|| format!("Failed to create table '{TABLE_NAME}'"))?;
    let rows = gateway.count().await.context("Failed to count rows")?;

    tracing::info!(
        "Table '{}' ready in {} ({} rows)",
        TABLE_NAME,
        connection.describe(),
        rows
    );
    Ok(())
}
