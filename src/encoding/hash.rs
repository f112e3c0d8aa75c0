/// One-byte DJB hash, `h = h * 33 + b` truncated to 8 bits.
///
/// Only used to pick a back-reference slot; collisions simply overwrite the slot.
///
/// # Example
///
/// ```
/// use jksn::encoding::djb_hash;
///
/// assert_eq!(djb_hash(b""), 0);
/// assert_eq!(djb_hash(b"a"), b'a');
/// assert_eq!(djb_hash(b"ab"), 0x61u8.wrapping_mul(33).wrapping_add(0x62));
/// ```
pub fn djb_hash(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .fold(0u8, |h, &b| h.wrapping_add(h << 5).wrapping_add(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_wide_computation() {
        let data: Vec<u8> = (0..=255).collect();
        let wide = data
            .iter()
            .fold(0u32, |h, &b| (h + (h << 5) + b as u32) & 0xff);
        assert_eq!(djb_hash(&data) as u32, wide);
    }
}
