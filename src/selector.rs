use crate::block::{CompressedBlock, Strategy};
use crate::config::{HybridLayout, QpacConfig};
use crate::error::QpacError;
use crate::transforms::{delta, dictionary, entropy, hybrid, rle};

/// Payload size one strategy produced for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub strategy: Strategy,
    pub size: usize,
}

/// Runs every applicable codec over a block and keeps the smallest output.
#[derive(Debug, Clone, Default)]
pub struct StrategySelector {
    config: QpacConfig,
}

impl StrategySelector {
    pub fn new(config: QpacConfig) -> Result<Self, QpacError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &QpacConfig {
        &self.config
    }

    /// Compress a single block.
    ///
    /// Candidates are evaluated in the order RAW, RLE, DELTA, DICT, HYBRID and
    /// a later one only replaces the running best when it is strictly smaller,
    /// so ties go to the earlier strategy. RAW always competes, so the payload
    /// never exceeds the block.
    pub fn compress(&self, block: &[u8]) -> Result<CompressedBlock, QpacError> {
        let mut best_strategy = Strategy::Raw;
        let mut best_data = block.to_vec();

        for (strategy, data) in self.candidates(block) {
            if data.len() < best_data.len() {
                best_strategy = strategy;
                best_data = data;
            }
        }

        log::debug!(
            "selector: {} bytes -> {} ({} bytes)",
            block.len(),
            best_strategy,
            best_data.len()
        );
        Ok(CompressedBlock::new(best_strategy, block.len(), best_data))
    }

    /// Sizes of every candidate the selector would consider, RAW included.
    pub fn evaluate(&self, block: &[u8]) -> Vec<Candidate> {
        std::iter::once(Candidate { strategy: Strategy::Raw, size: block.len() })
            .chain(
                self.candidates(block)
                    .into_iter()
                    .map(|(strategy, data)| Candidate { strategy, size: data.len() }),
            )
            .collect()
    }

    /// Reverse [`compress`](Self::compress).
    ///
    /// Only the record is consulted: a HYBRID payload carries its own layout,
    /// so blocks written under any configuration decode here.
    pub fn decompress(&self, block: &CompressedBlock) -> Result<Vec<u8>, QpacError> {
        let data = block.data();
        let decoded = match block.strategy() {
            Strategy::Raw => data.to_vec(),
            Strategy::Rle => rle::decode(data),
            Strategy::Delta => delta::decode(data),
            Strategy::Dict => dictionary::decode(data)?,
            Strategy::Hybrid => hybrid::decode(data, Some(block.original_size()))?,
        };

        if decoded.len() != block.original_size() {
            return Err(QpacError::LengthMismatch {
                expected: block.original_size(),
                actual: decoded.len(),
            });
        }
        Ok(decoded)
    }

    /// Encoded payloads for every non-RAW candidate, in evaluation order.
    fn candidates(&self, block: &[u8]) -> Vec<(Strategy, Vec<u8>)> {
        let entropy = entropy::estimate(block, self.config.accelerate_entropy);
        log::trace!("selector: block entropy {:.3} bits/symbol", entropy);

        let mut candidates = Vec::with_capacity(4);
        candidates.push((Strategy::Rle, rle::encode(block)));

        if entropy < self.config.delta_entropy_gate {
            candidates.push((Strategy::Delta, delta::encode(block)));
        }

        candidates.push((Strategy::Dict, dictionary::encode(block)));

        if self.config.try_hybrid {
            let payload = match self.config.hybrid_layout {
                HybridLayout::Tagged => hybrid::encode_tagged(block),
                HybridLayout::Untagged => hybrid::encode(block).0,
            };
            candidates.push((Strategy::Hybrid, payload));
        }

        for (strategy, data) in &candidates {
            log::trace!("selector: candidate {} -> {} bytes", strategy, data.len());
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(config: QpacConfig) -> StrategySelector {
        StrategySelector::new(config).unwrap()
    }

    #[test]
    fn test_empty_block_is_raw() {
        let block = StrategySelector::default().compress(&[]).unwrap();
        assert_eq!(block.strategy(), Strategy::Raw);
        assert_eq!(block.original_size(), 0);
        assert_eq!(block.compressed_size(), 0);
        assert!(StrategySelector::default().decompress(&block).unwrap().is_empty());
    }

    #[test]
    fn test_long_run_picks_rle() {
        let data = vec![0x41u8; 300];
        let s = selector(QpacConfig::default());
        let block = s.compress(&data).unwrap();
        assert_eq!(block.strategy(), Strategy::Rle);
        assert_eq!(block.data(), &[0x41, 255, 0x41, 45]);
        assert_eq!(s.decompress(&block).unwrap(), data);
    }

    #[test]
    fn test_hybrid_ties_rle_and_loses_the_tie() {
        // Values and run lengths below 0x80 map one-to-one through the
        // dictionary, so the rle-first hybrid is exactly as long as RLE.
        let data: Vec<u8> = (0..5).flat_map(|i| vec![if i % 2 == 0 { 1u8 } else { 2 }; 100]).collect();
        let s = selector(QpacConfig::default().with_hybrid_layout(HybridLayout::Untagged));

        let candidates = s.evaluate(&data);
        let size_of = |strategy| candidates.iter().find(|c| c.strategy == strategy).map(|c| c.size);
        assert_eq!(size_of(Strategy::Rle), Some(10));
        assert_eq!(size_of(Strategy::Hybrid), Some(10));

        let block = s.compress(&data).unwrap();
        assert_eq!(block.strategy(), Strategy::Rle);
        assert_eq!(s.decompress(&block).unwrap(), data);
    }

    #[test]
    fn test_delta_is_gated_by_entropy() {
        let low: Vec<u8> = vec![3; 64];
        let strategies: Vec<Strategy> = StrategySelector::default().evaluate(&low).iter().map(|c| c.strategy).collect();
        assert_eq!(
            strategies,
            vec![Strategy::Raw, Strategy::Rle, Strategy::Delta, Strategy::Dict, Strategy::Hybrid]
        );

        let high: Vec<u8> = (0..=255u8).collect();
        let strategies: Vec<Strategy> = selector(QpacConfig::default().with_hybrid(false))
            .evaluate(&high)
            .iter()
            .map(|c| c.strategy)
            .collect();
        assert_eq!(strategies, vec![Strategy::Raw, Strategy::Rle, Strategy::Dict]);
    }

    #[test]
    fn test_ties_keep_earlier_strategy() {
        // Every candidate is at least as large as the block
        let data = b"abcdefgh";
        let block = StrategySelector::default().compress(data).unwrap();
        assert_eq!(block.strategy(), Strategy::Raw);
        assert_eq!(block.data(), data);
    }

    #[test]
    fn test_hybrid_records_decode_under_any_config() {
        let data = b"aaaabbbbccccaaaa".to_vec();
        let tagged_selector = StrategySelector::default();
        let untagged_selector = selector(QpacConfig::default().with_hybrid_layout(HybridLayout::Untagged));

        let mut payloads = vec![hybrid::encode_tagged(&data)];
        for order in [hybrid::HybridOrder::RleThenDict, hybrid::HybridOrder::DictThenRle] {
            payloads.push(order.apply(&data));
        }

        for payload in payloads {
            let block = CompressedBlock::from_parts(Strategy::Hybrid.tag(), data.len(), payload.len(), payload).unwrap();
            assert_eq!(tagged_selector.decompress(&block).unwrap(), data);
            assert_eq!(untagged_selector.decompress(&block).unwrap(), data);
        }
    }

    #[test]
    fn test_decompress_checks_length() {
        let block = CompressedBlock::from_parts(Strategy::Rle.tag(), 5, 2, vec![7, 4]).unwrap();
        let err = StrategySelector::default().decompress(&block).unwrap_err();
        assert!(matches!(err, QpacError::LengthMismatch { expected: 5, actual: 4 }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = StrategySelector::new(QpacConfig::default().with_delta_entropy_gate(-1.0)).unwrap_err();
        assert!(matches!(err, QpacError::Config(_)));
    }
}
