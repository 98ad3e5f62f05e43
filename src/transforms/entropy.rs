//! Shannon entropy estimation
//!
//! The estimator is a gating signal for the selector, not a coder. An
//! accelerated backend may be requested; whatever goes wrong inside it, the
//! caller gets the scalar result instead.

use crate::error::QpacError;
use rayon::prelude::*;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Once, OnceLock};

pub type Histogram = [u64; 256];

/// Bytes per parallel work item.
const PARALLEL_CHUNK_SIZE: usize = 16 * 1024;

/// Source of byte histograms for the entropy estimate.
pub trait EntropyBackend {
    fn name(&self) -> &'static str;

    fn histogram(&self, data: &[u8]) -> Result<Histogram, QpacError>;
}

/// Single-threaded histogram.
pub struct ScalarBackend;

impl EntropyBackend for ScalarBackend {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn histogram(&self, data: &[u8]) -> Result<Histogram, QpacError> {
        Ok(scalar_histogram(data))
    }
}

/// Histogram built on a dedicated rayon pool from per-chunk partial counts.
///
/// The pool is built on first use and kept for the lifetime of the backend.
/// A construction error is kept too, so every later call fails the same way
/// and the caller falls back without retrying.
pub struct ParallelBackend {
    threads: usize,
    chunk_size: usize,
    pool: OnceLock<Result<rayon::ThreadPool, String>>,
}

impl ParallelBackend {
    pub fn new(threads: usize) -> Self {
        Self {
            threads,
            chunk_size: PARALLEL_CHUNK_SIZE,
            pool: OnceLock::new(),
        }
    }

    /// Backend shared by every accelerated [`estimate`] in the process.
    pub fn shared() -> &'static ParallelBackend {
        static SHARED: OnceLock<ParallelBackend> = OnceLock::new();
        SHARED.get_or_init(ParallelBackend::default)
    }

    fn pool(&self) -> Result<&rayon::ThreadPool, QpacError> {
        self.pool
            .get_or_init(|| {
                log::debug!("entropy: building {}-thread pool", self.threads);
                rayon::ThreadPoolBuilder::new()
                    .num_threads(self.threads)
                    .thread_name(|i| format!("qpac-entropy-{}", i))
                    .build()
                    .map_err(|e| e.to_string())
            })
            .as_ref()
            .map_err(|e| QpacError::EntropyBackend(e.clone()))
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

impl Default for ParallelBackend {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

impl EntropyBackend for ParallelBackend {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn histogram(&self, data: &[u8]) -> Result<Histogram, QpacError> {
        if self.chunk_size == 0 {
            return Err(QpacError::EntropyBackend("chunk size must be non-zero".to_string()));
        }

        Ok(self.pool()?.install(|| {
            data.par_chunks(self.chunk_size)
                .map(scalar_histogram)
                .reduce(|| [0u64; 256], merge_histograms)
        }))
    }
}

fn scalar_histogram(data: &[u8]) -> Histogram {
    let mut counts = [0u64; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }
    counts
}

fn merge_histograms(mut left: Histogram, right: Histogram) -> Histogram {
    for (total, count) in left.iter_mut().zip(right.iter()) {
        *total += count;
    }
    left
}

fn entropy_from_histogram(counts: &Histogram, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }

    let data_len = len as f64;
    let mut entropy = 0.0;
    for &count in counts.iter() {
        if count > 0 {
            let probability = count as f64 / data_len;
            entropy -= probability * probability.log2();
        }
    }
    entropy
}

/// Shannon entropy in bits per symbol, in `[0, 8]`. Empty input yields 0.0.
pub fn shannon_entropy(data: &[u8]) -> f64 {
    entropy_from_histogram(&scalar_histogram(data), data.len())
}

/// Entropy of `data`, optionally through the parallel backend.
pub fn estimate(data: &[u8], accelerate: bool) -> f64 {
    if accelerate {
        estimate_with(data, ParallelBackend::shared())
    } else {
        shannon_entropy(data)
    }
}

/// Entropy of `data` through `backend`, falling back to the scalar path if the
/// backend errors, panics, or returns a histogram that does not add up.
pub fn estimate_with(data: &[u8], backend: &dyn EntropyBackend) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let outcome = catch_quietly(|| backend.histogram(data));
    let failure = match outcome {
        Ok(Ok(counts)) => {
            let total: u64 = counts.iter().sum();
            if total == data.len() as u64 {
                return entropy_from_histogram(&counts, data.len());
            }
            format!("histogram covers {} of {} bytes", total, data.len())
        }
        Ok(Err(e)) => e.to_string(),
        Err(_) => "backend panicked".to_string(),
    };

    log::debug!("entropy: {} backend failed ({}), using scalar path", backend.name(), failure);
    shannon_entropy(data)
}

thread_local! {
    static QUIET_PANICS: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Run `f`, catching a panic without the panic hook reporting it. The hook is
/// wrapped once; panics outside `catch_quietly`, and panics on other threads,
/// still reach the previous hook.
fn catch_quietly<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !QUIET_PANICS.with(Cell::get) {
                previous(info);
            }
        }));
    });

    let was_quiet = QUIET_PANICS.with(|quiet| quiet.replace(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    QUIET_PANICS.with(|quiet| quiet.set(was_quiet));
    outcome
}
