//! Fixed-width and variable-length integer codecs.
//!
//! Fixed-width integers are big-endian two's complement. Varints are base-128 with the
//! most significant group first; every byte but the last has its high bit set.

use byteorder::{BigEndian, ByteOrder};
use num_bigint::BigUint;
use smallvec::SmallVec;

/// Header bytes of an encoded value.
pub(crate) type Header = SmallVec<[u8; 8]>;

const CONTINUE: u8 = 0b1000_0000;
const GROUP: u8 = 0b0111_1111;

/// Encodes the low `width` bytes of `value` in big-endian order. Callers only pass the
/// widths of the fixed integer forms: 1, 2 or 4.
pub(crate) fn encode_fixed(value: i64, width: usize) -> Header {
    debug_assert!(width == 1 || width == 2 || width == 4);
    let mut out = Header::new();
    match width {
        1 => out.push(value as u8),
        2 => {
            let mut buf = [0; 2];
            BigEndian::write_u16(&mut buf, value as u16);
            out.extend_from_slice(&buf);
        }
        4 => {
            let mut buf = [0; 4];
            BigEndian::write_u32(&mut buf, value as u32);
            out.extend_from_slice(&buf);
        }
        _ => unreachable!(),
    }
    out
}

/// Decodes a sign-extended big-endian integer of `width` bytes from the front of
/// `bytes`. Returns `None` if there are not enough bytes.
pub(crate) fn decode_fixed(bytes: &[u8], width: usize) -> Option<i64> {
    if bytes.len() < width {
        return None;
    }
    match width {
        1 => Some(bytes[0] as i8 as i64),
        2 => Some(BigEndian::read_i16(bytes) as i64),
        4 => Some(BigEndian::read_i32(bytes) as i64),
        _ => None,
    }
}

/// Decodes an unsigned big-endian integer of `width` bytes from the front of `bytes`.
pub(crate) fn decode_unsigned(bytes: &[u8], width: usize) -> Option<u64> {
    if bytes.len() < width || width == 0 || width > 8 {
        return None;
    }
    Some(BigEndian::read_uint(bytes, width))
}

/// Encodes `n` as a varint.
pub(crate) fn encode_varint_u64(mut n: u64) -> Header {
    let mut out = Header::new();
    out.push(n as u8 & GROUP);
    n >>= 7;
    while n != 0 {
        out.push(n as u8 & GROUP | CONTINUE);
        n >>= 7;
    }
    out.reverse();
    out
}

/// Encodes an arbitrarily large `n` as a varint.
pub(crate) fn encode_varint(n: &BigUint) -> Header {
    let mut groups = n.to_radix_be(128);
    if groups.is_empty() {
        groups.push(0);
    }
    let last = groups.len() - 1;
    groups.iter_mut().take(last).for_each(|g| *g |= CONTINUE);
    Header::from_vec(groups)
}

/// Decodes a varint from the front of `bytes`, returning the value and the number of
/// bytes consumed, or `None` if no terminating byte was found.
pub(crate) fn decode_varint(bytes: &[u8]) -> Option<(BigUint, usize)> {
    let end = bytes.iter().position(|b| b & CONTINUE == 0)?;
    let groups = &bytes[..=end];
    if groups.len() <= 9 {
        let n = groups
            .iter()
            .fold(0u64, |acc, b| (acc << 7) | (b & GROUP) as u64);
        Some((BigUint::from(n), groups.len()))
    } else {
        let digits: Vec<u8> = groups.iter().map(|b| b & GROUP).collect();
        BigUint::from_radix_be(&digits, 128).map(|n| (n, groups.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn varint_zero_is_one_byte() {
        assert_eq!(encode_varint_u64(0).as_slice(), &[0]);
        assert_eq!(encode_varint(&BigUint::from(0u8)).as_slice(), &[0]);
    }

    #[test]
    fn varint_most_significant_first() {
        assert_eq!(encode_varint_u64(0x7f).as_slice(), &[0x7f]);
        assert_eq!(encode_varint_u64(0x80).as_slice(), &[0x81, 0x00]);
        assert_eq!(encode_varint_u64(300).as_slice(), &[0x82, 0x2c]);
        assert_eq!(encode_varint_u64(0x200000).as_slice(), &[0x81, 0x80, 0x80, 0x00]);
    }

    #[test]
    fn varint_truncated() {
        assert_eq!(decode_varint(&[]), None);
        assert_eq!(decode_varint(&[0x81, 0x80]), None);
        assert_eq!(decode_varint(&[0x81, 0x00, 0xff]), Some((BigUint::from(0x80u8), 2)));
    }

    #[test]
    fn fixed_sign_extends() {
        assert_eq!(encode_fixed(-1, 1).as_slice(), &[0xff]);
        assert_eq!(encode_fixed(-2, 2).as_slice(), &[0xff, 0xfe]);
        assert_eq!(encode_fixed(0x1234_5678, 4).as_slice(), &[0x12, 0x34, 0x56, 0x78]);

        assert_eq!(decode_fixed(&[0xff], 1), Some(-1));
        assert_eq!(decode_fixed(&[0x80, 0x00], 2), Some(-32768));
        assert_eq!(decode_fixed(&[0x80, 0, 0, 0], 4), Some(i32::min_value() as i64));
        assert_eq!(decode_fixed(&[0x80, 0], 4), None);
    }

    #[test]
    fn unsigned_lengths() {
        assert_eq!(decode_unsigned(&[0xff, 0xff], 2), Some(0xffff));
        assert_eq!(decode_unsigned(&[0xff], 2), None);
    }

    proptest! {
        #[test]
        fn varint_u64_roundtrip(n in any::<u64>()) {
            let enc = encode_varint_u64(n);
            prop_assert_eq!(decode_varint(&enc), Some((BigUint::from(n), enc.len())));
            prop_assert_eq!(enc, encode_varint(&BigUint::from(n)));
        }

        #[test]
        fn varint_big_roundtrip(digits in prop::collection::vec(any::<u32>(), 1..6)) {
            let n = BigUint::new(digits);
            let enc = encode_varint(&n);
            prop_assert_eq!(decode_varint(&enc), Some((n, enc.len())));
        }

        #[test]
        fn fixed_roundtrip(n in any::<i16>()) {
            prop_assert_eq!(decode_fixed(&encode_fixed(n as i64, 2), 2), Some(n as i64));
        }
    }
}
