//! Bulk load command handler.

use anyhow::Context;
use crop_core::ConfigurationError;
use crop_generator::{assemble, CropGenerator};
use crop_loader::{
    BulkLoader, CommonLoadArgs, CropGateway, LoadRequest, LoadResult, LogProgress,
    DEFAULT_RECENT_LIMIT,
};
use tokio_util::sync::CancellationToken;

use super::recent::recent_table;
use crate::{BulkTarget, StoreConnection};

/// Generate and load records, then show the most recent rows.
///
/// Configuration is checked before the store is opened. Fails when any chunk
/// failed or the load was interrupted, after the summary has been printed.
pub async fn run_bulk(target: BulkTarget) -> anyhow::Result<()> {
    let (connection, common) = match target {
        BulkTarget::Sqlite { args } => (StoreConnection::Sqlite(args.opts), args.common),
        BulkTarget::MySql { args } => (StoreConnection::MySql(args.opts), args.common),
    };

    let (generator, request) = prepare(&common)?;

    if common.dry_run {
        return dry_run(&connection, &common, generator, request);
    }

    tracing::info!(
        "Bulk loading {} records into {} (seed={})",
        request.total_count,
        connection.describe(),
        common.seed
    );

    let gateway = connection
        .open()
        .await
        .with_context(|| format!("Failed to open {}", connection.describe()))?;
    gateway
        .ensure_table()
        .await
        .context("Failed to create table")?;

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current chunk");
            signal_token.cancel();
        }
    });

    let outcome = bulk_load(gateway.as_ref(), generator, request, cancel).await;
    signal_task.abort();
    let result = outcome?;

    finish_load(gateway.as_ref(), &result, request).await
}

/// Resolve the field domain, the generator and the request.
///
/// Every configuration error surfaces here, before any store is touched.
pub fn prepare(common: &CommonLoadArgs) -> anyhow::Result<(CropGenerator, LoadRequest)> {
    let domain = common
        .domain
        .field_domain()
        .context("Failed to load field domain")?;
    let request = common.request();
    if request.chunk_size == 0 {
        return Err(anyhow::Error::new(ConfigurationError::ZeroChunkSize)
            .context("Invalid load request"));
    }
    let generator =
        CropGenerator::new(domain, common.seed).context("Invalid generator configuration")?;
    Ok((generator, request))
}

/// Run one load against `gateway` with progress logged through `tracing`.
pub async fn bulk_load(
    gateway: &dyn CropGateway,
    generator: CropGenerator,
    request: LoadRequest,
    cancel: CancellationToken,
) -> anyhow::Result<LoadResult> {
    let mut loader = BulkLoader::new(generator).with_cancellation(cancel);
    let result = loader
        .load(request, gateway, &LogProgress::default())
        .await
        .context("Invalid load request")?;
    Ok(result)
}

/// Show the most recent rows and the summary, then report the outcome.
///
/// A failed read-back is logged; the outcome of the load itself decides the
/// result.
pub async fn finish_load(
    gateway: &dyn CropGateway,
    result: &LoadResult,
    request: LoadRequest,
) -> anyhow::Result<()> {
    match recent_table(gateway, DEFAULT_RECENT_LIMIT).await {
        Ok(table) => println!("{table}"),
        Err(e) => tracing::warn!("{e:#}"),
    }
    println!(
        "Inserted {} of {} records in {:?} ({:.2} rows/sec)",
        result.inserted,
        request.total_count,
        result.metrics.total_duration,
        result.metrics.rows_per_second(result.inserted)
    );

    check_result(result)
}

/// Turn an incomplete load into an error.
pub fn check_result(result: &LoadResult) -> anyhow::Result<()> {
    for chunk in &result.failed_chunks {
        tracing::error!(
            "Chunk {} ({} records) failed: {}",
            chunk.chunk_index,
            chunk.records,
            chunk.error
        );
    }

    if result.cancelled {
        anyhow::bail!(
            "Load interrupted after {} of {} chunks ({} records inserted)",
            result.chunks_attempted,
            result.total_chunks,
            result.inserted
        );
    }
    if !result.failed_chunks.is_empty() {
        anyhow::bail!(
            "{} of {} chunks failed ({} records not inserted)",
            result.failed_chunks.len(),
            result.total_chunks,
            result.failed_records()
        );
    }
    Ok(())
}

fn dry_run(
    connection: &StoreConnection,
    common: &CommonLoadArgs,
    mut generator: CropGenerator,
    request: LoadRequest,
) -> anyhow::Result<()> {
    let chunks = assemble(&mut generator, request.total_count, request.chunk_size)?;

    tracing::info!(
        "[DRY-RUN] Would load {} records (seed={})",
        request.total_count,
        common.seed
    );
    tracing::info!("[DRY-RUN] Target: {}", connection.describe());
    tracing::info!(
        "[DRY-RUN] {} chunks of up to {} records",
        chunks.len(),
        request.chunk_size
    );
    tracing::info!("[DRY-RUN] Field domain validated successfully");
    Ok(())
}
