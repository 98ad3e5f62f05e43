/// Run-Length Encoding over (value, length) pairs
/// Format: [BYTE][COUNT] for every maximal run, COUNT in 1..=255
/// Longer runs are split into several pairs

pub const MAX_RUN_LENGTH: usize = u8::MAX as usize;

pub fn encode(data: &[u8]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }

    let mut encoded = Vec::with_capacity(data.len());
    let mut i = 0;

    while i < data.len() {
        let value = data[i];
        let mut count = 1;
        while i + count < data.len() && data[i + count] == value && count < MAX_RUN_LENGTH {
            count += 1;
        }

        encoded.push(value);
        encoded.push(count as u8);
        i += count;
    }

    encoded
}

pub fn decode(data: &[u8]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }

    let mut decoded = Vec::with_capacity(data.len() * 2);
    let mut pairs = data.chunks_exact(2);

    for pair in pairs.by_ref() {
        let (value, count) = (pair[0], pair[1] as usize);
        decoded.extend(std::iter::repeat(value).take(count));
    }

    if !pairs.remainder().is_empty() {
        log::trace!("rle: ignoring dangling byte at end of {}-byte stream", data.len());
    }

    decoded
}
