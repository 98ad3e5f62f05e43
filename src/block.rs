use crate::error::QpacError;
use std::fmt;

/// Encoding applied to a block. The discriminants are the stable tag values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Strategy {
	Raw = 0,
	Rle = 1,
	Dict = 2,
	Delta = 3,
	Hybrid = 4,
}

impl Strategy {
	pub const ALL: [Strategy; 5] = [Strategy::Raw, Strategy::Rle, Strategy::Dict, Strategy::Delta, Strategy::Hybrid];

	pub fn tag(self) -> u8 {
		self as u8
	}

	pub fn name(self) -> &'static str {
		match self {
			Strategy::Raw => "RAW",
			Strategy::Rle => "RLE",
			Strategy::Dict => "DICT",
			Strategy::Delta => "DELTA",
			Strategy::Hybrid => "HYBRID",
		}
	}
}

impl TryFrom<u8> for Strategy {
	type Error = QpacError;
	fn try_from(tag: u8) -> Result<Self, Self::Error> {
		match tag {
			0 => Ok(Strategy::Raw),
			1 => Ok(Strategy::Rle),
			2 => Ok(Strategy::Dict),
			3 => Ok(Strategy::Delta),
			4 => Ok(Strategy::Hybrid),
			other => Err(QpacError::UnknownStrategy(other)),
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(self.name())
	}
}

/// Output of one block compression. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedBlock {
	strategy: Strategy,
	original_size: usize,
	compressed_size: usize,
	data: Vec<u8>,
}

impl CompressedBlock {
	pub(crate) fn new(strategy: Strategy, original_size: usize, data: Vec<u8>) -> Self {
		Self { strategy, original_size, compressed_size: data.len(), data }
	}

	/// Rebuild a record from stored fields, checking the tag and the size invariant.
	pub fn from_parts(tag: u8, original_size: usize, compressed_size: usize, data: Vec<u8>) -> Result<Self, QpacError> {
		let strategy = Strategy::try_from(tag)?;
		if compressed_size != data.len() {
			return Err(QpacError::InvalidInput(format!(
				"compressed size {} does not match payload length {}",
				compressed_size,
				data.len()
			)));
		}
		Ok(Self::new(strategy, original_size, data))
	}

	pub fn strategy(&self) -> Strategy { self.strategy }

	pub fn original_size(&self) -> usize { self.original_size }

	pub fn compressed_size(&self) -> usize { self.compressed_size }

	pub fn data(&self) -> &[u8] { &self.data }

	pub fn into_data(self) -> Vec<u8> { self.data }

	/// Original size over compressed size; 1.0 for an empty block.
	pub fn ratio(&self) -> f64 {
		if self.compressed_size == 0 { 1.0 } else { self.original_size as f64 / self.compressed_size as f64 }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tags_are_stable() {
		let tags: Vec<u8> = Strategy::ALL.iter().map(|s| s.tag()).collect();
		assert_eq!(tags, vec![0, 1, 2, 3, 4]);
		for strategy in Strategy::ALL {
			assert_eq!(Strategy::try_from(strategy.tag()).unwrap(), strategy);
		}
	}

	#[test]
	fn test_unknown_tag() {
		assert!(matches!(Strategy::try_from(5), Err(QpacError::UnknownStrategy(5))));
		assert!(matches!(CompressedBlock::from_parts(9, 0, 0, vec![]), Err(QpacError::UnknownStrategy(9))));
	}

	#[test]
	fn test_from_parts_checks_size() {
		let err = CompressedBlock::from_parts(0, 3, 2, vec![1, 2, 3]).unwrap_err();
		assert!(matches!(err, QpacError::InvalidInput(_)));

		let block = CompressedBlock::from_parts(1, 4, 2, vec![9, 4]).unwrap();
		assert_eq!(block.strategy(), Strategy::Rle);
		assert_eq!(block.compressed_size(), block.data().len());
		assert_eq!(block.ratio(), 2.0);

		let empty = CompressedBlock::from_parts(0, 0, 0, vec![]).unwrap();
		assert_eq!(empty.ratio(), 1.0);
	}
}
