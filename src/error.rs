use thiserror::Error;

#[derive(Error, Debug)]
pub enum QpacError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid input: {0}")]
	InvalidInput(String),

	#[error("Invalid dictionary index {index} (dictionary holds {len} entries)")]
	InvalidDictionaryIndex { index: u8, len: usize },

	#[error("Malformed dictionary escape at byte {position}")]
	MalformedEscape { position: usize },

	#[error("Dictionary literal {value:#04x} at byte {position} is already in the dictionary")]
	DuplicateDictionaryLiteral { value: u8, position: usize },

	#[error("Hybrid decode failed in both orders: rle-first: {rle_first}; dict-first: {dict_first}")]
	HybridDecodeFailure {
		rle_first: Box<QpacError>,
		dict_first: Box<QpacError>,
	},

	#[error("Invalid hybrid payload: {0}")]
	InvalidHybridPayload(String),

	#[error("Unknown strategy tag {0}")]
	UnknownStrategy(u8),

	#[error("Decoded length {actual} does not match original size {expected}")]
	LengthMismatch { expected: usize, actual: usize },

	#[error("Block {block} did not survive the round trip")]
	RoundTripMismatch { block: usize },

	#[error("Entropy backend failed: {0}")]
	EntropyBackend(String),

	#[error("Configuration error: {0}")]
	Config(String),
}

pub type Result<T> = std::result::Result<T, QpacError>;
