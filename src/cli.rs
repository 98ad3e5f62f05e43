use crate::config::{HybridLayout, QpacConfig};
use crate::error::QpacError;
use crate::pipeline::{self, ProfileOptions, DEFAULT_BLOCK_SIZE};
use crate::selector::StrategySelector;
use crate::block::Strategy;
use crate::utils::{hexdump, parse_byte_list};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// 64-byte block mixing short runs with a descending tail.
pub const DEMO_BLOCK: [u8; 64] = [
    1, 1, 1, 1, 2, 2, 3, 3, 3, 3, 3, 3, 4, 5, 6, 7,
    1, 1, 1, 1, 2, 2, 3, 3, 3, 3, 3, 3, 4, 5, 6, 7,
    1, 1, 1, 1, 2, 2, 3, 3, 3, 3, 3, 3, 4, 5, 6, 7,
    9, 9, 9, 9, 9, 9, 8, 8, 8, 7, 6, 5, 4, 3, 2, 1,
];

#[derive(Parser)]
#[command(author, version, about, long_about = "Pattern-aware single-block compressor (QPAC)")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct SelectorArgs {
    /// Skip the hybrid RLE/DICT candidate
    #[arg(long)]
    no_hybrid: bool,

    /// Compute the entropy gate on the parallel backend
    #[arg(long)]
    accelerate: bool,

    /// Hybrid payload layout [tagged, untagged]
    #[arg(long, default_value = "tagged")]
    layout: HybridLayout,
}

impl SelectorArgs {
    fn config(&self) -> QpacConfig {
        QpacConfig::default()
            .with_hybrid(!self.no_hybrid)
            .with_accelerated_entropy(self.accelerate)
            .with_hybrid_layout(self.layout)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compresses the built-in 64-byte sample block
    Demo {
        #[command(flatten)]
        selector: SelectorArgs,
    },
    /// Compresses an inline list of byte values and shows every candidate
    Compress {
        /// Byte values, comma or space separated (decimal or 0x-hex)
        #[arg(short, long)]
        bytes: String,

        #[command(flatten)]
        selector: SelectorArgs,
    },
    /// Compresses a file block by block and verifies every block
    Profile {
        /// Input file to profile
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Block size in bytes
        #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
        block_size: usize,

        /// Show a progress bar
        #[arg(short, long)]
        progress: bool,

        #[command(flatten)]
        selector: SelectorArgs,
    },
}

pub fn run() -> Result<(), QpacError> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<(), QpacError> {
    match &cli.command {
        Commands::Demo { selector } => {
            println!("Original size: {}", DEMO_BLOCK.len());
            report_block(&DEMO_BLOCK, &StrategySelector::new(selector.config())?)?;
        }
        Commands::Compress { bytes, selector } => {
            let block = parse_byte_list(bytes)?;
            let selector = StrategySelector::new(selector.config())?;

            println!("Original size: {}", block.len());
            for candidate in selector.evaluate(&block) {
                println!("  {:<8} {} bytes", candidate.strategy.name(), candidate.size);
            }
            report_block(&block, &selector)?;
        }
        Commands::Profile { input, block_size, progress, selector } => {
            println!("Profiling {} in {}-byte blocks...", input.display(), block_size);
            let options = ProfileOptions {
                block_size: *block_size,
                config: selector.config(),
                progress: *progress,
            };

            let mut in_file = BufReader::new(File::open(input)?);
            let stats = pipeline::profile(&mut in_file, &options)?;

            println!("Profile successful!");
            println!("  Original Size:    {} bytes", stats.original_size);
            println!("  Compressed Size:  {} bytes", stats.compressed_size);
            println!("  Ratio:            {:.2}x", stats.ratio);
            println!("  Blocks:           {}", stats.blocks);
            for strategy in Strategy::ALL {
                println!("    {:<8} {}", strategy.name(), stats.count(strategy));
            }
            println!("  Elapsed Time:     {:.2?}", stats.processing_time);
        }
    }

    Ok(())
}

fn report_block(data: &[u8], selector: &StrategySelector) -> Result<(), QpacError> {
    let block = selector.compress(data)?;
    println!(
        "Used strategy: {} ({}), compressed size: {}",
        block.strategy(),
        block.strategy().tag(),
        block.compressed_size()
    );

    let restored = selector.decompress(&block)?;
    println!("Roundtrip ok: {}", restored == data);
    println!("Data hex: {}", hexdump(block.data(), " "));
    Ok(())
}
