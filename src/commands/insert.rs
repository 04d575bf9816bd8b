//! Insert command handler.

use anyhow::Context;

use crate::{InsertTarget, StoreConnection};

/// Validate the entered fields and insert a single record.
pub async fn run_insert(target: InsertTarget) -> anyhow::Result<()> {
    let (connection, args) = match target {
        InsertTarget::Sqlite { opts, args } => (StoreConnection::Sqlite(opts), args),
        InsertTarget::MySql { opts, args } => (StoreConnection::MySql(opts), args),
    };

    let domain = args
        .domain
        .field_domain()
        .context("Failed to load field domain")?;
    let entry = args.entry.entry();

    let gateway = connection
        .open()
        .await
        .with_context(|| format!("Failed to open {}", connection.describe()))?;
    gateway
        .ensure_table()
        .await
        .context("Failed to create table")?;

    let id = crop_loader::insert_one(gateway.as_ref(), &domain, &entry)
        .await
        .context("Failed to insert record")?;

    println!("Inserted record {id}");
    Ok(())
}
