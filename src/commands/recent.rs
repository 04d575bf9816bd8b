//! Recent-records command handler.

use anyhow::Context;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use crop_core::{StoredCrop, DATE_FORMAT};
use crop_loader::CropGateway;

use crate::{RecentTarget, StoreConnection};

/// Render stored rows as a table, in the order given.
pub fn render_table(rows: &[StoredCrop]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "ID",
        "Crop",
        "Planted",
        "Harvest",
        "Stage",
        "Pest control",
        "Yield (kg)",
    ]);

    for row in rows {
        let record = &row.record;
        table.add_row(vec![
            Cell::new(row.id).set_alignment(CellAlignment::Right),
            Cell::new(&record.crop_name),
            Cell::new(record.planting_date.format(DATE_FORMAT)),
            Cell::new(record.harvest_date.format(DATE_FORMAT)),
            Cell::new(record.growth_stage),
            Cell::new(&record.pest_control_measure),
            Cell::new(record.yield_prediction).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Read the `limit` most recent rows and render them.
pub async fn recent_table(gateway: &dyn CropGateway, limit: usize) -> anyhow::Result<Table> {
    let rows = gateway
        .query_recent(limit)
        .await
        .context("Failed to read recent records")?;
    Ok(render_table(&rows))
}

/// Print the most recently inserted records, newest first.
pub async fn run_recent(target: RecentTarget) -> anyhow::Result<()> {
    let (connection, args) = match target {
        RecentTarget::Sqlite { opts, args } => (StoreConnection::Sqlite(opts), args),
        RecentTarget::MySql { opts, args } => (StoreConnection::MySql(opts), args),
    };

    let gateway = connection
        .open()
        .await
        .with_context(|| format!("Failed to open {}", connection.describe()))?;

    println!("{}", recent_table(gateway.as_ref(), args.limit).await?);
    Ok(())
}
