//! Decoding errors and warnings.
//!
//! Every [`DecodeError`] is fatal: decoding stops and no partial value is returned.
//! [`Warning`]s are collected by the [`Decoder`](crate::encoding::Decoder) and logged,
//! but never interrupt decoding.

use failure::Fail;

/// Which back-reference table a lookup went to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Table {
    Text,
    Blob,
}

#[derive(Debug, Clone, Fail)]
/// An error encountered when decoding fails.
pub enum DecodeError {
    /// The input ran out in the middle of a field.
    #[fail(display = "input truncated at offset {}: needed {} more bytes", offset, needed)]
    TruncatedInput { offset: usize, needed: usize },

    /// The control byte does not name any value.
    #[fail(display = "unknown control byte 0x{:02x} at offset {}", control, offset)]
    UnknownControlByte { control: u8, offset: usize },

    /// A back-reference points at an empty hash table slot.
    #[fail(
        display = "back-reference to empty {:?} slot 0x{:02x} at offset {}",
        table, hash, offset
    )]
    UnknownBackReference { table: Table, hash: u8, offset: usize },

    /// A delta-encoded integer appeared before any integer it could be relative to.
    #[fail(display = "delta-encoded integer without a base at offset {}", offset)]
    InvalidDeltaContext { offset: usize },

    /// The value is well-formed but not supported by this decoder.
    #[fail(display = "unsupported feature `{}` at offset {}", feature, offset)]
    UnsupportedFeature { feature: &'static str, offset: usize },

    /// A text payload is not valid UTF-8 or UTF-16.
    #[fail(display = "invalid text payload at offset {}", offset)]
    InvalidText { offset: usize },

    /// A column of a transposed array is not an array.
    #[fail(display = "transposed array column is not an array at offset {}", offset)]
    TransposedColumnNotArray { offset: usize },

    /// The `0x0f` escape was not followed by text.
    #[fail(display = "JSON escape is not followed by text at offset {}", offset)]
    JsonEscapeNotText { offset: usize },

    /// The text following the `0x0f` escape is not valid JSON.
    #[fail(display = "invalid JSON in escape: {}", message)]
    InvalidJson { message: String },

    /// A length or count does not fit in memory.
    #[fail(display = "length at offset {} does not fit in usize", offset)]
    LengthOverflow { offset: usize },

    /// Values are nested deeper than the configured limit.
    #[fail(display = "nesting deeper than {} at offset {}", limit, offset)]
    NestingTooDeep { limit: usize, offset: usize },
}

#[derive(Debug, Clone, Eq, PartialEq)]
/// A non-fatal condition encountered while decoding.
pub enum Warning {
    /// A checksum was skipped without being verified.
    ChecksumUnsupported { control: u8, offset: usize },
}
