//! Transactional bulk loader.

use crate::gateway::CropGateway;
use crate::progress::ProgressSink;
use crop_core::{ConfigurationError, StoreError};
use crop_generator::{assemble, CropGenerator, DEFAULT_CHUNK_SIZE};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A bulk-load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    /// Number of records to generate and insert.
    pub total_count: u64,
    /// Records per transaction.
    pub chunk_size: usize,
}

impl LoadRequest {
    /// Request `total_count` records in chunks of [`DEFAULT_CHUNK_SIZE`].
    pub fn new(total_count: u64) -> Self {
        Self {
            total_count,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// A chunk whose transaction failed. None of its records were committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedChunk {
    /// Zero-based position of the chunk in generation order.
    pub chunk_index: usize,
    /// Number of records in the chunk.
    pub records: usize,
    pub error: StoreError,
}

/// Timing of a load.
#[derive(Debug, Clone, Default)]
pub struct LoadMetrics {
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating records.
    pub generation_duration: Duration,
    /// Time spent in gateway calls.
    pub insert_duration: Duration,
}

impl LoadMetrics {
    /// Calculate committed rows per second.
    pub fn rows_per_second(&self, rows: u64) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            rows as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Default)]
pub struct LoadResult {
    /// Records committed.
    pub inserted: u64,
    /// Failed chunks in the order they were attempted.
    pub failed_chunks: Vec<FailedChunk>,
    /// Chunks submitted to the gateway.
    pub chunks_attempted: usize,
    /// Chunks the request was split into.
    pub total_chunks: usize,
    /// Set when cancellation stopped the run before every chunk was attempted.
    pub cancelled: bool,
    pub metrics: LoadMetrics,
}

impl LoadResult {
    /// Every chunk was attempted and committed.
    pub fn is_success(&self) -> bool {
        self.failed_chunks.is_empty() && !self.cancelled
    }

    /// Records lost to failed chunks.
    pub fn failed_records(&self) -> u64 {
        self.failed_chunks.iter().map(|c| c.records as u64).sum()
    }
}

/// Generates records and commits them through a gateway, one transaction per
/// chunk.
///
/// A failed chunk is recorded and skipped; it never aborts the remaining
/// chunks and is not retried. Retrying is up to the caller, who can issue a
/// narrower request for the failed count.
pub struct BulkLoader<R = StdRng> {
    generator: CropGenerator<R>,
    cancel: Option<CancellationToken>,
}

impl<R: Rng + Send> BulkLoader<R> {
    pub fn new(generator: CropGenerator<R>) -> Self {
        Self {
            generator,
            cancel: None,
        }
    }

    /// Stop between chunks once `token` is cancelled.
    ///
    /// A chunk already submitted always runs to commit or failure.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn generator(&self) -> &CropGenerator<R> {
        &self.generator
    }

    /// Run a load.
    ///
    /// Chunks are submitted strictly in generation order and `progress` is
    /// called after every commit with the cumulative count, so reports are
    /// monotonically non-decreasing. Only configuration problems are returned
    /// as errors, before any gateway call; store failures are collected in
    /// [`LoadResult::failed_chunks`].
    pub async fn load(
        &mut self,
        request: LoadRequest,
        gateway: &dyn CropGateway,
        progress: &dyn ProgressSink,
    ) -> Result<LoadResult, ConfigurationError> {
        let start_time = Instant::now();
        let cancel = self.cancel.clone();
        let mut chunks = assemble(&mut self.generator, request.total_count, request.chunk_size)?;

        let mut result = LoadResult {
            total_chunks: chunks.len(),
            ..LoadResult::default()
        };

        info!(
            "Loading {} records into {} in {} chunks (chunk size: {})",
            request.total_count,
            gateway.backend(),
            result.total_chunks,
            request.chunk_size
        );

        let mut generation_time = Duration::ZERO;
        let mut insert_time = Duration::ZERO;

        for chunk_index in 0..result.total_chunks {
            if cancel.as_ref().is_some_and(|token| token.is_cancelled()) {
                warn!(
                    "Load cancelled after {} of {} chunks",
                    chunk_index, result.total_chunks
                );
                result.cancelled = true;
                break;
            }

            let gen_start = Instant::now();
            let Some(chunk) = chunks.next() else {
                break;
            };
            generation_time += gen_start.elapsed();

            let insert_start = Instant::now();
            let outcome = gateway.insert_many(&chunk).await;
            insert_time += insert_start.elapsed();
            result.chunks_attempted += 1;

            match outcome {
                Ok(()) => {
                    result.inserted += chunk.len() as u64;
                    progress.report(result.inserted, request.total_count);
                    debug!(
                        "Chunk {} committed: {} records, {} inserted so far",
                        chunk_index,
                        chunk.len(),
                        result.inserted
                    );
                }
                Err(error) => {
                    warn!(
                        "Chunk {} failed, {} records not inserted: {}",
                        chunk_index,
                        chunk.len(),
                        error
                    );
                    result.failed_chunks.push(FailedChunk {
                        chunk_index,
                        records: chunk.len(),
                        error,
                    });
                }
            }
        }

        result.metrics = LoadMetrics {
            total_duration: start_time.elapsed(),
            generation_duration: generation_time,
            insert_duration: insert_time,
        };

        info!(
            "Load complete: {} records in {:?} ({:.2} rows/sec), {} failed chunks",
            result.inserted,
            result.metrics.total_duration,
            result.metrics.rows_per_second(result.inserted),
            result.failed_chunks.len()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryGateway;
    use crate::progress::NoProgress;
    use chrono::NaiveDate;
    use crop_core::FieldDomain;

    fn loader() -> BulkLoader {
        let generator = CropGenerator::new(FieldDomain::standard(), 42)
            .unwrap()
            .with_today(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
            .unwrap();
        BulkLoader::new(generator)
    }

    #[test]
    fn test_metrics() {
        let metrics = LoadMetrics {
            total_duration: Duration::from_secs(10),
            generation_duration: Duration::from_secs(2),
            insert_duration: Duration::from_secs(8),
        };

        assert_eq!(metrics.rows_per_second(1000), 100.0);
        assert_eq!(LoadMetrics::default().rows_per_second(1000), 0.0);
    }

    #[test]
    fn test_request_defaults() {
        let request = LoadRequest::new(190_000);
        assert_eq!(request.chunk_size, 10_000);
        assert_eq!(request.with_chunk_size(500).chunk_size, 500);
    }

    #[tokio::test]
    async fn test_zero_chunk_size_fails_before_io() {
        let gateway = InMemoryGateway::new();
        let result = loader()
            .load(LoadRequest::new(10).with_chunk_size(0), &gateway, &NoProgress)
            .await;

        assert!(matches!(result, Err(ConfigurationError::ZeroChunkSize)));
    }

    #[tokio::test]
    async fn test_load_into_memory() {
        let gateway = InMemoryGateway::new();
        let mut loader = loader();

        let result = loader
            .load(LoadRequest::new(250).with_chunk_size(100), &gateway, &NoProgress)
            .await
            .unwrap();

        assert!(result.is_success());
        assert_eq!(result.inserted, 250);
        assert_eq!(result.total_chunks, 3);
        assert_eq!(result.chunks_attempted, 3);
        assert_eq!(gateway.count().await.unwrap(), 250);
        assert_eq!(loader.generator().generated(), 250);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let gateway = InMemoryGateway::new();
        let token = CancellationToken::new();
        token.cancel();
        let mut loader = loader().with_cancellation(token);

        let result = loader
            .load(LoadRequest::new(50).with_chunk_size(10), &gateway, &NoProgress)
            .await
            .unwrap();

        assert!(result.cancelled);
        assert!(!result.is_success());
        assert_eq!(result.chunks_attempted, 0);
        assert_eq!(gateway.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_between_chunks() {
        let gateway = InMemoryGateway::new();
        let token = CancellationToken::new();
        let trigger = token.clone();
        let mut loader = loader().with_cancellation(token);

        let progress = move |completed: u64, _total: u64| {
            if completed >= 20 {
                trigger.cancel();
            }
        };
        let result = loader
            .load(LoadRequest::new(50).with_chunk_size(10), &gateway, &progress)
            .await
            .unwrap();

        assert!(result.cancelled);
        assert_eq!(result.chunks_attempted, 2);
        assert_eq!(result.inserted, 20);
        assert_eq!(gateway.count().await.unwrap(), 20);
    }
}
