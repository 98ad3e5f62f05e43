use crate::block::Strategy;
use crate::config::QpacConfig;
use crate::error::QpacError;
use crate::selector::StrategySelector;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::time::{Duration, Instant};

pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024; // 64 KiB

#[derive(Debug, Clone)]
pub struct ProfileOptions {
	pub block_size: usize,
	pub config: QpacConfig,
	pub progress: bool,
}

impl Default for ProfileOptions {
	fn default() -> Self {
		Self { block_size: DEFAULT_BLOCK_SIZE, config: QpacConfig::default(), progress: false }
	}
}

#[derive(Debug)]
pub struct ProfileStats {
	pub original_size: u64,
	pub compressed_size: u64,
	pub ratio: f64,
	pub blocks: usize,
	/// Number of blocks won by each strategy, indexed by tag.
	pub strategy_counts: [usize; 5],
	pub processing_time: Duration,
}

impl ProfileStats {
	pub fn count(&self, strategy: Strategy) -> usize {
		self.strategy_counts[strategy.tag() as usize]
	}
}

/// Split `reader` into fixed-size blocks, compress each one independently and
/// verify that it decompresses back to the same bytes.
///
/// Nothing is written out; the result only describes how the selector fared.
pub fn profile<R: Read>(reader: &mut R, options: &ProfileOptions) -> Result<ProfileStats, QpacError> {
	if options.block_size == 0 {
		return Err(QpacError::Config("Block size must be non-zero".to_string()));
	}
	let selector = StrategySelector::new(options.config.clone())?;

	let start = Instant::now();
	let mut buffer = Vec::new();
	reader.read_to_end(&mut buffer)?;
	let original_size = buffer.len() as u64;

	let pb = if options.progress { ProgressBar::new(original_size) } else { ProgressBar::hidden() };
	pb.set_style(ProgressStyle::default_bar()
		.template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
		.map_err(|e| QpacError::Config(e.to_string()))?
		.progress_chars("#>-")
	);

	let mut compressed_size = 0u64;
	let mut strategy_counts = [0usize; 5];
	let mut blocks = 0;

	for (id, raw) in buffer.chunks(options.block_size).enumerate() {
		let block = selector.compress(raw)?;
		let restored = selector.decompress(&block)?;
		if restored != raw {
			return Err(QpacError::RoundTripMismatch { block: id });
		}

		log::debug!("block {}: {} -> {} bytes via {}", id, raw.len(), block.compressed_size(), block.strategy());
		compressed_size += block.compressed_size() as u64;
		strategy_counts[block.strategy().tag() as usize] += 1;
		blocks += 1;
		pb.inc(raw.len() as u64);
	}

	pb.finish_with_message("Profiling finished");

	// same convention as CompressedBlock::ratio: nothing in, nothing out is 1.0
	let ratio = if compressed_size > 0 { original_size as f64 / compressed_size as f64 } else { 1.0 };
	Ok(ProfileStats {
		original_size,
		compressed_size,
		ratio,
		blocks,
		strategy_counts,
		processing_time: start.elapsed(),
	})
}
