/// Optional stream prefix
pub(crate) const MAGIC: &[u8; 3] = b"jk!";

/// 0xf0
pub(crate) const MASK_FAMILY: u8 = 0b1111_0000;
/// 0x0f
pub(crate) const MASK_LOW: u8 = 0b0000_1111;

/// Special values, 0x00
pub(crate) const FAMILY_SPECIAL: u8 = 0x00;
/// Integer family, 0x10
pub(crate) const FAMILY_INT: u8 = 0x10;
/// Float family, 0x20
pub(crate) const FAMILY_FLOAT: u8 = 0x20;
/// UTF-16LE text family, 0x30
pub(crate) const FAMILY_UTF16: u8 = 0x30;
/// UTF-8 text family, 0x40
pub(crate) const FAMILY_UTF8: u8 = 0x40;
/// Blob family, 0x50
pub(crate) const FAMILY_BLOB: u8 = 0x50;
/// Hashtable refreshers, 0x70
pub(crate) const FAMILY_REFRESH: u8 = 0x70;
/// Array family, 0x80
pub(crate) const FAMILY_ARR: u8 = 0x80;
/// Map family, 0x90
pub(crate) const FAMILY_MAP: u8 = 0x90;
/// Row-column swapped arrays, 0xa0
pub(crate) const FAMILY_SWAPPED: u8 = 0xa0;
/// Delta-encoded integers, 0xb0
pub(crate) const FAMILY_DELTA: u8 = 0xb0;
/// Lengthless arrays, 0xc0
pub(crate) const FAMILY_LENGTHLESS: u8 = 0xc0;
/// Checksums and pragmas, 0xf0
pub(crate) const FAMILY_PRAGMA: u8 = 0xf0;

/// `undefined`
pub(crate) const CON_ABSENT: u8 = 0x00;
/// `null`
pub(crate) const CON_NULL: u8 = 0x01;
/// `false`
pub(crate) const CON_FALSE: u8 = 0x02;
/// `true`
pub(crate) const CON_TRUE: u8 = 0x03;
/// JSON text follows
pub(crate) const CON_JSON: u8 = 0x0f;

/// Largest integer stored in the control byte.
pub(crate) const INT_INLINE_MAX: u8 = 0x0a;

// Low nibbles shared by the integer and delta families.
/// 4-byte signed big-endian
pub(crate) const SUFFIX_I32: u8 = 0x0b;
/// 2-byte signed big-endian
pub(crate) const SUFFIX_I16: u8 = 0x0c;
/// 1-byte signed
pub(crate) const SUFFIX_I8: u8 = 0x0d;
/// negated varint magnitude
pub(crate) const SUFFIX_VAR_NEG: u8 = 0x0e;
/// varint
pub(crate) const SUFFIX_VAR_POS: u8 = 0x0f;

// Low nibbles of length-prefixed families.
/// back-reference, one hash byte follows
pub(crate) const LEN_BACKREF: u8 = 0x0c;
/// 2-byte length
pub(crate) const LEN_U16: u8 = 0x0d;
/// 1-byte length
pub(crate) const LEN_U8: u8 = 0x0e;
/// varint length
pub(crate) const LEN_VARINT: u8 = 0x0f;

/// Longest UTF-16 text (in code units) with an inline length.
pub(crate) const UTF16_INLINE_MAX: usize = 0x0b;
/// Longest UTF-8 text (in bytes) with an inline length.
pub(crate) const UTF8_INLINE_MAX: usize = 0x0c;
/// Longest blob with an inline length.
pub(crate) const BLOB_INLINE_MAX: usize = 0x0b;
/// Largest inline array, map, column or skip count.
pub(crate) const COUNT_INLINE_MAX: usize = 0x0c;

pub(crate) const FLOAT_NAN: u8 = 0x20;
pub(crate) const FLOAT_LONG_DOUBLE: u8 = 0x2b;
pub(crate) const FLOAT_DOUBLE: u8 = 0x2c;
pub(crate) const FLOAT_SINGLE: u8 = 0x2d;
pub(crate) const FLOAT_NEG_INF: u8 = 0x2e;
pub(crate) const FLOAT_POS_INF: u8 = 0x2f;

/// Text back-reference. Both text families share it, `0x4c` is a 12 byte UTF-8 string.
pub(crate) const TEXT_BACKREF: u8 = FAMILY_UTF16 | LEN_BACKREF;
/// Blob back-reference
pub(crate) const BLOB_BACKREF: u8 = FAMILY_BLOB | LEN_BACKREF;

/// Clears both hash tables
pub(crate) const REFRESH_TABLES: u8 = FAMILY_REFRESH;

/// Also marks "no value in this row" inside swapped arrays.
pub(crate) const UNSPECIFIED: u8 = FAMILY_SWAPPED;

/// Largest delta stored in the control byte.
pub(crate) const DELTA_INLINE_MAX: i64 = 5;
/// Smallest delta stored in the control byte.
pub(crate) const DELTA_INLINE_MIN: i64 = -5;
/// Negative inline deltas are stored as `delta + DELTA_NEG_BIAS`.
pub(crate) const DELTA_NEG_BIAS: i64 = 11;

/// Array terminated by an unspecified value
pub(crate) const LENGTHLESS_ARR: u8 = 0xc8;

/// Leading checksums, the checksum precedes the value
pub(crate) const CHECKSUM_LEADING: std::ops::RangeInclusive<u8> = 0xf0..=0xf4;
/// Trailing checksums, the checksum follows the value
pub(crate) const CHECKSUM_TRAILING: std::ops::RangeInclusive<u8> = 0xf8..=0xfc;
/// Digest widths, indexed by the low three bits of the checksum control byte
pub(crate) const CHECKSUM_WIDTHS: [usize; 5] = [4, 16, 20, 32, 64];
/// Skip the next value
pub(crate) const PRAGMA_IGNORE: u8 = 0xff;
