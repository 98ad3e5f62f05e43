//! # QPAC (Pattern-Aware Compression)
//!
//! A single-block byte compressor. Every block is run through a handful of
//! simple codecs and the smallest output is kept, tagged with the strategy
//! that produced it.
//!
//! ## Strategies
//!
//! - **RAW**: the block itself, always a candidate
//! - **RLE**: (value, length) pairs
//! - **DELTA**: consecutive differences, only tried on low-entropy blocks
//! - **DICT**: adaptive single-byte dictionary substitution
//! - **HYBRID**: RLE and DICT composed in whichever order is shorter
//!
//! ## Quick Start
//!
//! ```rust
//! use qpac::{compress, decompress, Strategy};
//!
//! let data = [vec![1u8; 20], vec![2u8; 20], vec![3u8; 24]].concat();
//! let block = compress(&data, true, false).unwrap();
//! assert_eq!(block.strategy(), Strategy::Rle);
//! assert_eq!(block.compressed_size(), 6);
//!
//! let restored = decompress(&block).unwrap();
//! assert_eq!(restored, data);
//! ```
//!
//! ### Custom configuration
//!
//! ```rust
//! use qpac::{HybridLayout, QpacConfig, StrategySelector};
//!
//! let config = QpacConfig::default()
//!     .with_accelerated_entropy(true)
//!     .with_hybrid_layout(HybridLayout::Untagged);
//! let selector = StrategySelector::new(config).unwrap();
//!
//! let block = selector.compress(b"aaaaaaaabbbbbbbb").unwrap();
//! assert_eq!(selector.decompress(&block).unwrap(), b"aaaaaaaabbbbbbbb");
//! ```

pub mod block;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod selector;
pub mod transforms;
pub mod utils;

// Re-export commonly used types for convenience
pub use block::{CompressedBlock, Strategy};
pub use config::{HybridLayout, QpacConfig};
pub use error::{QpacError, Result};
pub use pipeline::{profile, ProfileOptions, ProfileStats};
pub use selector::{Candidate, StrategySelector};

/// Compress one block with the default configuration.
///
/// # Arguments
///
/// * `block` - The bytes to compress
/// * `try_hybrid` - Also evaluate the hybrid RLE/DICT composition
/// * `accelerate_entropy` - Compute the entropy gate on the parallel backend
///
/// # Example
///
/// ```rust
/// use qpac::{compress, Strategy};
///
/// let block = compress(&[], true, false).unwrap();
/// assert_eq!(block.strategy(), Strategy::Raw);
/// assert_eq!(block.original_size(), 0);
/// ```
pub fn compress(block: &[u8], try_hybrid: bool, accelerate_entropy: bool) -> Result<CompressedBlock> {
    let config = QpacConfig::default()
        .with_hybrid(try_hybrid)
        .with_accelerated_entropy(accelerate_entropy);
    StrategySelector::new(config)?.compress(block)
}

/// Decompress a block produced by [`compress`] or by any [`StrategySelector`].
pub fn decompress(block: &CompressedBlock) -> Result<Vec<u8>> {
    StrategySelector::default().decompress(block)
}

/// QPAC library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
