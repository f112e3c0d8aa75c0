//! # JKSN binary encoder and decoder
//!
//! Every value starts with a control byte. Its high nibble selects the family and its
//! low nibble either holds a small value or says how the header that follows is sized.
//!
//! | control       | meaning                                                  |
//! |---------------|----------------------------------------------------------|
//! | `0x00`-`0x03` | absent, null, false, true                                |
//! | `0x0f`        | JSON text follows                                        |
//! | `0x10`-`0x1f` | integers, `0..=10` inline                                |
//! | `0x20`-`0x2f` | floats: NaN, double, single, infinities                  |
//! | `0x30`-`0x3f` | UTF-16LE text, `0x3c` is a text back-reference           |
//! | `0x40`-`0x4f` | UTF-8 text                                               |
//! | `0x50`-`0x5f` | blobs, `0x5c` is a blob back-reference                   |
//! | `0x70`-`0x7f` | clear the back-reference tables, or discard values       |
//! | `0x80`-`0x8f` | arrays                                                   |
//! | `0x90`-`0x9f` | maps                                                     |
//! | `0xa0`        | unspecified                                              |
//! | `0xa1`-`0xaf` | arrays of maps stored column by column                   |
//! | `0xb0`-`0xbf` | integers relative to the previous integer                |
//! | `0xc8`        | array terminated by `0xa0`                               |
//! | `0xf0`-`0xff` | checksums and pragmas                                    |
//!
//! A stream may start with the magic `jk!`.
//!
//! # Example
//!
//! ```
//! use jksn::prelude::*;
//!
//! let value = Value::from(vec![100, 101, 99]);
//!
//! let enc = encode_full(&value);
//! assert_eq!(enc, b"jk!\x83\x1d\x64\xb1\xb9");
//!
//! // one-shot decoding starts from a fresh state
//! assert_eq!(decode(&enc).unwrap(), value);
//!
//! // the streaming types keep state across calls
//! let mut encoder = Encoder::new();
//! let mut decoder = Decoder::new();
//! for n in 1000..1010 {
//!     let bytes = encoder.encode(&Value::from(n));
//!     assert_eq!(decoder.decode(bytes).unwrap(), Value::from(n));
//! }
//! ```

mod constants;
mod hash;
mod proxy;
mod varint;

pub mod de;
pub mod ser;

pub use de::Decoder;
pub use hash::djb_hash;
pub use ser::{Encoder, Serializer};

use crate::{
    config::{DecoderConfig, EncoderConfig},
    errors::DecodeError,
    Value,
};
use bytes::Bytes;

/// Encodes a value with a fresh encoder, without the `jk!` magic.
pub fn encode<S: Serializer>(v: &Value, out: &mut S) {
    Encoder::with_config(EncoderConfig::default().with_header(false)).encode_into(v, out)
}

/// Encodes a value with a fresh encoder, prefixed with the `jk!` magic.
pub fn encode_full(v: &Value) -> Vec<u8> { Encoder::new().encode(v) }

/// Decodes one value with a fresh decoder. A leading `jk!` magic is skipped.
pub fn decode(bytes: &[u8]) -> Result<Value, DecodeError> {
    Decoder::new().decode(Bytes::copy_from_slice(bytes))
}

/// Decodes one value with a fresh decoder, treating the whole buffer as values.
pub fn decode_headerless(bytes: &[u8]) -> Result<Value, DecodeError> {
    Decoder::with_config(DecoderConfig::default().with_header(false))
        .decode(Bytes::copy_from_slice(bytes))
}

/// Decodes every value in `bytes` with a fresh decoder.
pub fn decode_many(bytes: &[u8]) -> Result<Vec<Value>, DecodeError> {
    Decoder::new().decode_many(Bytes::copy_from_slice(bytes))
}
