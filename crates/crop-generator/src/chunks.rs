//! Batch assembler: slices a requested record count into fixed-size chunks.

use crate::generator::CropGenerator;
use crop_core::{ConfigurationError, CropRecord};
use rand::Rng;

/// Default number of records per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Number of chunks needed for `total_count` records.
pub fn chunk_count(total_count: u64, chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        return 0;
    }
    total_count.div_ceil(chunk_size as u64)
}

/// Lazily assemble `total_count` generated records into chunks of at most
/// `chunk_size` records. Only the last chunk may be shorter.
///
/// The chunks are produced on demand from the generator, so they are not
/// reproducible across calls unless the generator is rebuilt with the same
/// seed.
pub fn assemble<R: Rng>(
    generator: &mut CropGenerator<R>,
    total_count: u64,
    chunk_size: usize,
) -> Result<Chunks<'_, R>, ConfigurationError> {
    if chunk_size == 0 {
        return Err(ConfigurationError::ZeroChunkSize);
    }
    Ok(Chunks {
        generator,
        remaining: total_count,
        chunk_size,
    })
}

/// Iterator over generated chunks.
pub struct Chunks<'a, R> {
    generator: &'a mut CropGenerator<R>,
    remaining: u64,
    chunk_size: usize,
}

impl<R: Rng> Iterator for Chunks<'_, R> {
    type Item = Vec<CropRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let len = std::cmp::min(self.remaining, self.chunk_size as u64);
        self.remaining -= len;
        Some(self.generator.records(len).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let chunks = chunk_count(self.remaining, self.chunk_size) as usize;
        (chunks, Some(chunks))
    }
}

impl<R: Rng> ExactSizeIterator for Chunks<'_, R> {}
