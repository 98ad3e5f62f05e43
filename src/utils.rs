/// Upper-case hex rendering of `bytes`, joined by `sep`.
pub fn hexdump(bytes: &[u8], sep: &str) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Parse a comma- or whitespace-separated list of byte values.
///
/// Decimal and `0x`-prefixed hex are accepted: `"1, 2 0x10"`.
pub fn parse_byte_list(text: &str) -> Result<Vec<u8>, crate::QpacError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            let parsed = match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
                Some(hex) => u8::from_str_radix(hex, 16),
                None => token.parse::<u8>(),
            };
            parsed.map_err(|e| crate::QpacError::InvalidInput(format!("'{}' is not a byte value: {}", token, e)))
        })
        .collect()
}
