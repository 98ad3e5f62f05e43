use qpac::utils::hexdump;
use qpac::{HybridLayout, QpacConfig, StrategySelector};

fn main() {
	let data = b"hello hello hello hello".to_vec();
	let config = QpacConfig::default().with_hybrid_layout(HybridLayout::Tagged);
	let selector = StrategySelector::new(config).unwrap();

	for candidate in selector.evaluate(&data) {
		println!("{:<8} {} bytes", candidate.strategy, candidate.size);
	}

	let block = selector.compress(&data).unwrap();
	println!("compressed {} -> {} via {}", block.original_size(), block.compressed_size(), block.strategy());
	println!("payload: {}", hexdump(block.data(), " "));

	let restored = selector.decompress(&block).unwrap();
	println!("restored {} bytes", restored.len());
}
