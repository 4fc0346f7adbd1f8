//! Big-endian fixed-width encoding helpers

/// Left-pad a big-endian magnitude with zero bytes to exactly `width` bytes
///
/// Leading zero bytes beyond `width` are stripped first. Returns `None` when
/// the significant part does not fit.
pub fn be_fixed_width(bytes: &[u8], width: usize) -> Option<Vec<u8>> {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let significant = &bytes[first..];

    if significant.len() > width {
        return None;
    }

    let mut out = vec![0u8; width];
    out[width - significant.len()..].copy_from_slice(significant);
    Some(out)
}

/// Number of bytes needed to hold `bits` bits
pub fn bytes_for_bits(bits: usize) -> usize {
    (bits + 7) / 8
}
