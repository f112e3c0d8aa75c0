//! # JKSN
//!
//! JKSN is a compact binary encoding of the JSON data model. On top of JSON's values it
//! adds byte strings, arbitrary precision integers, non-string map keys and two
//! markers, `undefined` and "unspecified", and it shrinks typical documents with a
//! handful of optional tricks:
//!
//! * integers close to the previous integer are stored as a small difference,
//! * repeated strings and byte strings are replaced with one byte back-references,
//! * arrays of maps that share keys are stored column by column.
//!
//! The tricks are chosen by the encoder. A decoder always understands all of them.
//!
//! # Usage
//!
//! Build a [`Value`], then encode it with [`encode_full`](encoding::encode_full) or an
//! [`Encoder`](encoding::Encoder).
//!
//! ```
//! use jksn::prelude::*;
//!
//! let mut row = VecMap::new();
//! row.insert(Value::from("name"), Value::from("jksn"));
//! row.insert(Value::from("stars"), Value::from(5));
//!
//! let value = Value::from(vec![Value::Map(row.clone()), Value::Map(row)]);
//!
//! // encode
//! let encoded = encode_full(&value);
//!
//! // and decode
//! let decoded = decode(&encoded).unwrap();
//!
//! assert_eq!(value, decoded);
//! ```
//!
//! # An overview of JKSN values
//!
//! ## Integers
//!
//! Integers have no fixed width. Values that fit an `i64` are held as [`Inum::I64`],
//! larger ones as [`Inum::Int`].
//!
//! ```
//! use jksn::prelude::*;
//!
//! let small = Value::from(23u8);
//! let large = Value::from(-99999999999999999999i128);
//!
//! assert!(small.to_inum().is_ok());
//! assert_eq!(decode(&encode_full(&large)).unwrap(), large);
//! ```
//!
//! ## Floats
//!
//! Floats are IEEE 754 doubles. NaN and the infinities take a single byte, and NaN
//! compares equal to itself so that decoded values can be compared with the input.
//!
//! ```
//! use jksn::prelude::*;
//!
//! let nan = Value::from(std::f64::NAN);
//! assert_eq!(decode(&encode_full(&nan)).unwrap(), nan);
//! ```
//!
//! ## Text and blobs
//!
//! Text is written as UTF-16LE when that is strictly shorter than UTF-8, which is the
//! case for most CJK text. Blobs are raw bytes.
//!
//! ```
//! use jksn::prelude::*;
//!
//! let text = Value::from("hello");
//! let blob = Value::Blob(Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]));
//!
//! assert_eq!(text.to_text().unwrap(), "hello");
//! assert_eq!(blob.to_blob().unwrap().len(), 4);
//! ```
//!
//! ## Arrays and maps
//!
//! Maps keep their insertion order, and any [`Value`] can be a key. Two maps are equal
//! when they hold the same entries, in any order.
//!
//! ```
//! use jksn::prelude::*;
//!
//! let mut m = VecMap::new();
//! m.insert(Value::from(1), Value::from("one"));
//! m.insert(Value::Null, Value::from(vec![1, 2, 3]));
//!
//! let value = Value::Map(m);
//! assert_eq!(decode(&encode_full(&value)).unwrap(), value);
//! ```
//!
//! ## Absent and unspecified
//!
//! [`Value::Absent`] is JavaScript's `undefined`. [`Value::Unspecified`] marks a missing
//! cell in a column-stored array; it also terminates lengthless arrays, so decoding it
//! anywhere else is rarely useful.
//!
//! # Streams
//!
//! [`Encoder`](encoding::Encoder)s and [`Decoder`](encoding::Decoder)s keep the previous
//! integer and the back-reference tables between values. Values encoded one after
//! another by the same encoder must be decoded in the same order by one decoder.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

#[macro_use]
mod util;

pub mod config;
pub mod encoding;
pub mod errors;
pub mod inum;
pub mod json;
pub mod prelude;
pub mod vecmap;

use bytes::Bytes;
use failure::*;
use inum::*;
use num_bigint::BigInt;
use std::{
    convert::TryInto,
    fmt,
    hash::{Hash, Hasher},
};
use vecmap::*;

#[derive(Clone, Debug)]
/// A JKSN value.
///
/// # Example
///
/// ```
/// use jksn::prelude::*;
///
/// let b = Value::Bool(true);
///
/// let val = match b {
///     Value::Bool(b) => b,
///     _ => panic!(),
/// };
///
/// assert!(val);
/// ```
pub enum Value {
    /// `undefined`.
    Absent,
    /// `null`. Corresponds to [`None`].
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    ///
    /// # Example
    ///
    /// ```
    /// use jksn::prelude::{Value::Int, *};
    ///
    /// let k_num = Int(Inum::I64(1));
    /// ```
    Int(Inum),
    /// Floating point number.
    Float(f64),
    /// Unicode text.
    Text(String),
    /// Byte string.
    ///
    /// # Example
    ///
    /// ```
    /// use jksn::prelude::{Value::Blob, *};
    ///
    /// let k_bytes = Blob(Bytes::from_static(b"hello world"));
    /// ```
    Blob(Bytes),
    /// Array.
    Array(Vec<Value>),
    /// Map with arbitrary keys.
    ///
    /// ```
    /// use jksn::prelude::{Value::Map, *};
    ///
    /// let vmap = VecMap::from(vec![(Value::from("hello world"), Value::from(1))]);
    ///
    /// let kmap = Map(vmap);
    /// ```
    Map(VecMap<Value, Value>),
    /// A missing cell in a column-stored array.
    Unspecified,
}

use Value::*;

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Absent, Absent) | (Null, Null) | (Unspecified, Unspecified) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => float_bits(*a) == float_bits(*b),
            (Text(a), Text(b)) => a == b,
            (Blob(a), Blob(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

/// Floats compare by bit pattern, with every NaN the same, so `0.0` and `-0.0` are
/// different keys.
fn float_bits(f: f64) -> u64 {
    if f.is_nan() {
        std::f64::NAN.to_bits()
    } else {
        f.to_bits()
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Absent | Null | Unspecified => {}
            Bool(b) => b.hash(state),
            Int(n) => n.hash(state),
            Float(f) => float_bits(*f).hash(state),
            Text(s) => s.hash(state),
            Blob(b) => b.hash(state),
            Array(a) => a.hash(state),
            Map(m) => m.hash(state),
        }
    }
}

impl Value {
    /// Converts a [`Value`] to a vector of [`Value`]s.
    /// This will return an [`Error`] if the value is not a [`Value::Array`].
    ///
    /// # Example
    ///
    /// ```
    /// use jksn::prelude::*;
    ///
    /// let v = Value::from(vec![1, 2, 3]);
    ///
    /// assert_eq!(v.to_vec().unwrap().len(), 3);
    /// ```
    pub fn to_vec(&self) -> Result<&Vec<Value>, Error> {
        match self {
            Array(a) => Ok(a),
            _ => bail!("This value is not an `Array`"),
        }
    }

    /// Consumes a [`Value`], converting it into a vector of [`Value`]s.
    /// This will return an [`Error`] if the value is not a [`Value::Array`].
    pub fn into_vec(self) -> Result<Vec<Value>, Error> {
        match self.try_into() {
            Ok(v) => Ok(v),
            Err(_e) => bail!("This value is not an `Array`"),
        }
    }

    /// Converts a [`Value`] to a [`VecMap`].
    /// This will return an [`Error`] if the value is not a [`Value::Map`].
    ///
    /// # Example
    ///
    /// ```
    /// use jksn::prelude::*;
    ///
    /// let v = Value::from(VecMap::from(vec![(Value::from("a"), 1)]));
    ///
    /// assert_eq!(v.to_map().unwrap().get(&Value::from("a")), Some(&Value::from(1)));
    /// ```
    pub fn to_map(&self) -> Result<&VecMap<Value, Value>, Error> {
        match self {
            Map(m) => Ok(m),
            _ => bail!("This value is not a `Map`"),
        }
    }

    /// Consumes a [`Value`], converting it into a [`VecMap`].
    /// This will return an [`Error`] if the value is not a [`Value::Map`].
    pub fn into_map(self) -> Result<VecMap<Value, Value>, Error> {
        match self.try_into() {
            Ok(m) => Ok(m),
            Err(_e) => bail!("This value is not a `Map`"),
        }
    }

    /// Tries to convert a value to an [`Inum`].
    /// This will return an [`Error`] if the value is not a [`Value::Int`].
    ///
    /// # Example
    ///
    /// ```
    /// use jksn::prelude::*;
    /// use std::convert::TryFrom;
    ///
    /// let v = Value::from(1);
    ///
    /// let n = u64::try_from(v.to_inum().unwrap().clone()).unwrap();
    ///
    /// assert_eq!(n, 1);
    /// ```
    pub fn to_inum(&self) -> Result<&Inum, Error> {
        match self {
            Int(i) => Ok(i),
            _ => bail!("Value is not `Int`, cannot convert to `Inum`"),
        }
    }

    /// Consumes the value, converting it to an [`Inum`].
    pub fn into_inum(self) -> Result<Inum, Error> {
        match self {
            Int(i) => Ok(i),
            _ => bail!("Value is not `Int`, cannot convert to `Inum`"),
        }
    }

    /// Tries to convert a value to a [`bool`].
    /// This will return an [`Error`] if the value is not a [`Value::Bool`].
    pub fn to_bool(&self) -> Result<bool, Error> {
        match self {
            Bool(b) => Ok(*b),
            _ => bail!("Value is not `Bool`"),
        }
    }

    /// Tries to convert a value to an [`f64`].
    pub fn to_float(&self) -> Result<f64, Error> {
        match self {
            Float(f) => Ok(*f),
            _ => bail!("Value is not `Float`"),
        }
    }

    pub fn to_text(&self) -> Result<&str, Error> {
        match self {
            Text(s) => Ok(s),
            _ => bail!("Value is not `Text`"),
        }
    }

    pub fn to_blob(&self) -> Result<&Bytes, Error> {
        match self {
            Blob(b) => Ok(b),
            _ => bail!("Value is not a `Blob`"),
        }
    }

    /// Indicates whether a value is [`Null`].
    ///
    /// # Example
    ///
    /// ```
    /// use jksn::Value::Null;
    ///
    /// let foo = Null;
    ///
    /// assert!(foo.is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Null => true,
            _ => false,
        }
    }

    pub fn is_absent(&self) -> bool {
        match self {
            Absent => true,
            _ => false,
        }
    }

    pub fn is_unspecified(&self) -> bool {
        match self {
            Unspecified => true,
            _ => false,
        }
    }
}

fn fmt_blob(bytes: &Bytes) -> String {
    let mut out = "b\"".to_owned();
    bytes.iter().for_each(|c| out.push_str(&format!("{:02x}", c)));
    out.push('"');
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Absent => write!(f, "undefined"),
            Null => write!(f, "null"),
            Unspecified => write!(f, "unspecified"),
            Bool(b) => write!(f, "{}", b),
            Int(i) => write!(f, "{}", i),
            Float(x) if x.is_nan() => write!(f, "NaN"),
            Float(x) if x.is_infinite() => {
                write!(f, "{}", if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Float(x) => write!(f, "{:?}", x),
            Text(s) => write!(f, "{:?}", s),
            Blob(b) => write!(f, "{}", fmt_blob(b)),
            Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value { Text(s.to_owned()) }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { Array(v.into_iter().map(T::into).collect()) }
}

impl<T: Into<Value>> From<VecMap<Value, T>> for Value {
    fn from(m: VecMap<Value, T>) -> Value {
        Map(m.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Value { o.map_or(Null, T::into) }
}

from_fn!(Value, bool, Bool);
try_from_ctor!(Value, bool, Bool);

from_fn!(Value, Inum, Int);
try_from_ctor!(Value, Inum, Int);

from_fn!(Value, String, Text);
try_from_ctor!(Value, String, Text);

from_fn!(Value, Bytes, Blob);
try_from_ctor!(Value, Bytes, Blob);

from_fn!(Value, f64, Float);
from_fn!(Value, f32, |f: f32| Float(f as f64));
try_from_ctor!(Value, f64, Float);

try_from_ctor!(Value, Vec<Value>, Array);
try_from_ctor!(Value, VecMap<Value, Value>, Map);

// Integers
compose_from!(Value, Inum, BigInt);
compose_from!(Value, Inum, isize);
compose_from!(Value, Inum, usize);
compose_from!(Value, Inum, i64);
compose_from!(Value, Inum, u64);
compose_from!(Value, Inum, i128);
compose_from!(Value, Inum, u128);
from_prims!(Value);
