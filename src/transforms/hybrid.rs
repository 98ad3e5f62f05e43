//! Hybrid RLE + dictionary coding
//!
//! Both compositions are tried at encode time and the shorter output wins.
//! The tagged layout prefixes the payload with the winning [`HybridOrder`].
//! The untagged layout stores the bare pipeline output and the decoder has to
//! find the order by trial decoding.
//!
//! The two layouts never share a first byte: an order tag is `0` or `1`,
//! while every pipeline output opens with a dictionary literal or escape
//! (`0x7F` and up). [`decode`] reads the layout off the payload itself.

use crate::config::HybridLayout;
use crate::error::QpacError;
use crate::transforms::{dictionary, rle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HybridOrder {
    /// RLE first, dictionary over the run pairs.
    RleThenDict = 0,
    /// Dictionary first, RLE over the code stream.
    DictThenRle = 1,
}

impl HybridOrder {
    pub fn apply(self, data: &[u8]) -> Vec<u8> {
        match self {
            HybridOrder::RleThenDict => dictionary::encode(&rle::encode(data)),
            HybridOrder::DictThenRle => rle::encode(&dictionary::encode(data)),
        }
    }

    pub fn reverse(self, data: &[u8]) -> Result<Vec<u8>, QpacError> {
        match self {
            HybridOrder::RleThenDict => Ok(rle::decode(&dictionary::decode(data)?)),
            HybridOrder::DictThenRle => dictionary::decode(&rle::decode(data)),
        }
    }
}

impl TryFrom<u8> for HybridOrder {
    type Error = QpacError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HybridOrder::RleThenDict),
            1 => Ok(HybridOrder::DictThenRle),
            other => Err(QpacError::InvalidHybridPayload(format!("unknown pipeline order {}", other))),
        }
    }
}

/// Run both compositions and keep the one that is not longer.
/// Ties go to [`HybridOrder::RleThenDict`].
pub fn encode(data: &[u8]) -> (Vec<u8>, HybridOrder) {
    let rle_first = HybridOrder::RleThenDict.apply(data);
    let dict_first = HybridOrder::DictThenRle.apply(data);
    log::trace!(
        "hybrid: rle-first {} bytes, dict-first {} bytes",
        rle_first.len(),
        dict_first.len()
    );

    if rle_first.len() <= dict_first.len() {
        (rle_first, HybridOrder::RleThenDict)
    } else {
        (dict_first, HybridOrder::DictThenRle)
    }
}

pub fn encode_tagged(data: &[u8]) -> Vec<u8> {
    let (body, order) = encode(data);
    let mut payload = Vec::with_capacity(body.len() + 1);
    payload.push(order as u8);
    payload.extend_from_slice(&body);
    payload
}

pub fn decode_tagged(payload: &[u8]) -> Result<Vec<u8>, QpacError> {
    let (&tag, body) = payload
        .split_first()
        .ok_or_else(|| QpacError::InvalidHybridPayload("missing pipeline order byte".to_string()))?;
    HybridOrder::try_from(tag)?.reverse(body)
}

/// Layout a hybrid payload was written with. An empty payload is the
/// untagged encoding of an empty block.
pub fn layout_of(payload: &[u8]) -> HybridLayout {
    match payload.first() {
        Some(&tag) if tag <= HybridOrder::DictThenRle as u8 => HybridLayout::Tagged,
        _ => HybridLayout::Untagged,
    }
}

/// Decode a hybrid payload of either layout.
pub fn decode(payload: &[u8], expected_len: Option<usize>) -> Result<Vec<u8>, QpacError> {
    match layout_of(payload) {
        HybridLayout::Tagged => decode_tagged(payload),
        HybridLayout::Untagged => decode_untagged(payload, expected_len),
    }
}

/// Recover an untagged payload by trying the rle-first reversal, then the
/// dict-first one.
///
/// Without `expected_len` a reversal is accepted as soon as it decodes without
/// error. With it, a reversal of the wrong length is rejected as well.
pub fn decode_untagged(data: &[u8], expected_len: Option<usize>) -> Result<Vec<u8>, QpacError> {
    let attempt = |order: HybridOrder| {
        let decoded = order.reverse(data)?;
        match expected_len {
            Some(expected) if decoded.len() != expected => Err(QpacError::LengthMismatch {
                expected,
                actual: decoded.len(),
            }),
            _ => Ok(decoded),
        }
    };

    let rle_first = match attempt(HybridOrder::RleThenDict) {
        Ok(decoded) => return Ok(decoded),
        Err(e) => e,
    };
    log::debug!("hybrid: rle-first reversal failed ({}), trying dict-first", rle_first);

    match attempt(HybridOrder::DictThenRle) {
        Ok(decoded) => Ok(decoded),
        Err(dict_first) => Err(QpacError::HybridDecodeFailure {
            rle_first: Box::new(rle_first),
            dict_first: Box::new(dict_first),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs() -> Vec<u8> {
        [vec![1u8; 20], vec![2u8; 20], vec![3u8; 24]].concat()
    }

    #[test]
    fn test_encode_prefers_rle_first_for_runs() {
        let (body, order) = encode(&runs());
        assert_eq!(order, HybridOrder::RleThenDict);
        assert_eq!(body, vec![0x81, 0x94, 0x82, 0x01, 0x83, 0x98]);
    }

    #[test]
    fn test_tagged_roundtrip() {
        let data = runs();
        let payload = encode_tagged(&data);
        assert_eq!(payload[0], HybridOrder::RleThenDict as u8);
        assert_eq!(decode_tagged(&payload).unwrap(), data);
    }

    #[test]
    fn test_tagged_honours_recorded_order() {
        let data = b"aaaabbbbccccaaaa".to_vec();
        let mut payload = vec![HybridOrder::DictThenRle as u8];
        payload.extend(HybridOrder::DictThenRle.apply(&data));
        assert_eq!(decode_tagged(&payload).unwrap(), data);
    }

    #[test]
    fn test_tagged_rejects_bad_header() {
        assert!(matches!(decode_tagged(&[]), Err(QpacError::InvalidHybridPayload(_))));
        assert!(matches!(decode_tagged(&[7, 0x81, 1]), Err(QpacError::InvalidHybridPayload(_))));
    }

    #[test]
    fn test_untagged_recovers_either_order() {
        let samples: Vec<Vec<u8>> = vec![
            runs(),
            b"aaaabbbbccccaaaa".to_vec(),
            (0..=255u8).collect(),
            vec![0xEE; 600],
        ];

        for data in samples {
            for order in [HybridOrder::RleThenDict, HybridOrder::DictThenRle] {
                let body = order.apply(&data);
                assert_eq!(decode_untagged(&body, None).unwrap(), data, "order {:?}", order);
                assert_eq!(decode_untagged(&body, Some(data.len())).unwrap(), data);
            }
        }
    }

    #[test]
    fn test_dict_first_stream_fails_rle_first_reversal() {
        // A literal is never repeated back to back, so the first run pair has
        // count 1, which the rle-first reversal reads as an unknown index.
        let body = HybridOrder::DictThenRle.apply(b"xyzzy");
        assert!(matches!(
            HybridOrder::RleThenDict.reverse(&body),
            Err(QpacError::InvalidDictionaryIndex { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_untagged_both_orders_fail() {
        let err = decode_untagged(&[0x01, 0x02], None).unwrap_err();
        match err {
            QpacError::HybridDecodeFailure { rle_first, dict_first } => {
                assert!(matches!(*rle_first, QpacError::InvalidDictionaryIndex { .. }));
                assert!(matches!(*dict_first, QpacError::InvalidDictionaryIndex { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_untagged_length_check_rejects_silent_decode() {
        // dict-first reversal of a lone escape decodes to nothing
        assert!(decode_untagged(&[dictionary::ESCAPE], None).unwrap().is_empty());
        let err = decode_untagged(&[dictionary::ESCAPE], Some(4)).unwrap_err();
        match err {
            QpacError::HybridDecodeFailure { rle_first, dict_first } => {
                assert!(matches!(*rle_first, QpacError::MalformedEscape { position: 0 }));
                assert!(matches!(*dict_first, QpacError::LengthMismatch { expected: 4, actual: 0 }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_layout_read_from_payload() {
        let samples: Vec<Vec<u8>> = vec![
            runs(),
            b"aaaabbbbccccaaaa".to_vec(),
            (0..=255u8).rev().collect(),
            vec![0x00; 300],
            vec![0xFF; 3],
        ];

        for data in samples {
            let tagged = encode_tagged(&data);
            assert_eq!(layout_of(&tagged), HybridLayout::Tagged);
            assert_eq!(decode(&tagged, Some(data.len())).unwrap(), data);

            for order in [HybridOrder::RleThenDict, HybridOrder::DictThenRle] {
                let body = order.apply(&data);
                assert!(body[0] >= dictionary::ESCAPE);
                assert_eq!(layout_of(&body), HybridLayout::Untagged);
                assert_eq!(decode(&body, Some(data.len())).unwrap(), data);
            }
        }

        assert_eq!(layout_of(&[]), HybridLayout::Untagged);
        assert!(decode(&[], Some(0)).unwrap().is_empty());
    }

    #[test]
    fn test_empty_input() {
        let (body, order) = encode(&[]);
        assert!(body.is_empty());
        assert_eq!(order, HybridOrder::RleThenDict);
        assert_eq!(decode_tagged(&encode_tagged(&[])).unwrap(), Vec::<u8>::new());
        assert!(decode_untagged(&[], Some(0)).unwrap().is_empty());
    }
}
