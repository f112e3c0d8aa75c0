pub use crate::{
    config::{DecoderConfig, EncoderConfig},
    encoding::{decode, decode_headerless, decode_many, encode, encode_full, Decoder, Encoder, Serializer},
    errors::{DecodeError, Warning},
    inum::Inum,
    vecmap::VecMap,
    Value,
};
pub use bytes::Bytes;
pub use num_bigint::BigInt;
pub use num_traits::Num;
pub use std::{convert::TryFrom, str::FromStr};
