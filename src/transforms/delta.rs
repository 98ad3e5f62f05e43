/// Delta coding implementation
/// Transforms data[i] = data[i] - data[i-1] (mod 256) for i > 0
/// The first byte is kept as the reference point

pub fn encode(data: &[u8]) -> Vec<u8> {
    let Some(&first) = data.first() else {
        return Vec::new();
    };

    let mut encoded = Vec::with_capacity(data.len());
    encoded.push(first);
    encoded.extend(data.windows(2).map(|pair| pair[1].wrapping_sub(pair[0])));
    encoded
}

pub fn decode(data: &[u8]) -> Vec<u8> {
    let Some((&first, deltas)) = data.split_first() else {
        return Vec::new();
    };

    let mut decoded = Vec::with_capacity(data.len());
    let mut previous = first;
    decoded.push(previous);

    for &delta in deltas {
        previous = previous.wrapping_add(delta);
        decoded.push(previous);
    }

    decoded
}
