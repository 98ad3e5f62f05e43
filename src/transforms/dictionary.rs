/// Adaptive single-byte dictionary substitution
///
/// Every byte is replaced by its index in a small dictionary of previously
/// seen values. Novel bytes are written as literals and appended. The decoder
/// rebuilds the same dictionary by replaying the insertion rule, so nothing
/// but the code stream is stored.
///
/// Code stream layout:
/// - `0x00..=0x7E`  back-reference to a dictionary index
/// - `0x7F, b`      escaped literal for a novel byte `b >= 0x80`
/// - `0x80 | b`     literal for a novel byte `b < 0x80`

use crate::error::QpacError;

/// Number of distinct values held before the dictionary is reset.
pub const DICTIONARY_CAPACITY: usize = 127;

pub const LITERAL_FLAG: u8 = 0x80;
pub const ESCAPE: u8 = 0x7F;

// Indices must stay clear of both the escape code and the literal flag.
const _: () = assert!(DICTIONARY_CAPACITY <= ESCAPE as usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryState {
    Empty,
    Partial,
    /// The next novel byte clears the dictionary and takes index 0.
    FullPendingReset,
}

/// Insertion-ordered set of distinct byte values with bounded capacity.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: [u8; DICTIONARY_CAPACITY],
    len: usize,
    positions: [Option<u8>; 256],
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            entries: [0; DICTIONARY_CAPACITY],
            len: 0,
            positions: [None; 256],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn state(&self) -> DictionaryState {
        match self.len {
            0 => DictionaryState::Empty,
            DICTIONARY_CAPACITY => DictionaryState::FullPendingReset,
            _ => DictionaryState::Partial,
        }
    }

    pub fn index_of(&self, value: u8) -> Option<u8> {
        self.positions[value as usize]
    }

    pub fn get(&self, index: u8) -> Option<u8> {
        self.entries[..self.len].get(index as usize).copied()
    }

    /// Append a value that is not yet present and return its index.
    pub fn insert(&mut self, value: u8) -> u8 {
        debug_assert!(self.index_of(value).is_none(), "value {value:#04x} already present");

        if self.state() == DictionaryState::FullPendingReset {
            log::trace!("dictionary: capacity {} reached, resetting", DICTIONARY_CAPACITY);
            self.reset();
        }

        let index = self.len as u8;
        self.entries[self.len] = value;
        self.positions[value as usize] = Some(index);
        self.len += 1;
        index
    }

    fn reset(&mut self) {
        for &value in &self.entries[..self.len] {
            self.positions[value as usize] = None;
        }
        self.len = 0;
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut dictionary = Dictionary::new();
    let mut encoded = Vec::with_capacity(data.len());

    for &byte in data {
        match dictionary.index_of(byte) {
            Some(index) => {
                debug_assert!(index < ESCAPE);
                encoded.push(index);
            }
            None => {
                if byte & LITERAL_FLAG == 0 {
                    encoded.push(LITERAL_FLAG | byte);
                } else {
                    encoded.push(ESCAPE);
                    encoded.push(byte);
                }
                dictionary.insert(byte);
            }
        }
    }

    encoded
}

pub fn decode(data: &[u8]) -> Result<Vec<u8>, QpacError> {
    let mut dictionary = Dictionary::new();
    let mut decoded = Vec::with_capacity(data.len());
    let mut i = 0;

    while i < data.len() {
        let code = data[i];

        let value = if code & LITERAL_FLAG != 0 {
            replay_literal(&mut dictionary, code & !LITERAL_FLAG, i)?
        } else if code == ESCAPE {
            let operand = data
                .get(i + 1)
                .copied()
                .filter(|b| b & LITERAL_FLAG != 0)
                .ok_or(QpacError::MalformedEscape { position: i })?;
            let value = replay_literal(&mut dictionary, operand, i)?;
            i += 1;
            value
        } else {
            dictionary.get(code).ok_or(QpacError::InvalidDictionaryIndex {
                index: code,
                len: dictionary.len(),
            })?
        };

        decoded.push(value);
        i += 1;
    }

    Ok(decoded)
}

fn replay_literal(dictionary: &mut Dictionary, value: u8, position: usize) -> Result<u8, QpacError> {
    // The encoder never writes a literal for a value it could reference.
    if dictionary.index_of(value).is_some() {
        return Err(QpacError::DuplicateDictionaryLiteral { value, position });
    }
    dictionary.insert(value);
    Ok(value)
}
