use super::{
    constants::*,
    hash::djb_hash,
    proxy::Proxy,
    varint::{encode_fixed, encode_varint, encode_varint_u64, Header},
};
use crate::{config::EncoderConfig, inum::Inum, vecmap::VecMap, Value};
use bytes::{BufMut, Bytes, BytesMut};
use indexmap::IndexSet;
use smallvec::smallvec;
use tracing::trace;

/// A sink for encoded bytes.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
    /// Return the output value.
    fn finalize(self) -> Self::Out;
}

impl Serializer for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self }
}

impl Serializer for BytesMut {
    type Out = Bytes;

    fn put_u8(&mut self, u: u8) { BufMut::put_u8(self, u) }

    fn put_slice(&mut self, slice: &[u8]) { BufMut::put_slice(self, slice) }

    fn finalize(self) -> Self::Out { self.freeze() }
}

/// Picks the integer form for a value outside the inline range.
///
/// Returns the low nibble of the control byte and the header. The same forms are used
/// by the integer and delta families.
fn int_form(n: &Inum) -> (u8, Header) {
    if let Some(i) = n.to_i64() {
        if -0x80 <= i && i <= 0x7f {
            return (SUFFIX_I8, encode_fixed(i, 1));
        } else if -0x8000 <= i && i <= 0x7fff {
            return (SUFFIX_I16, encode_fixed(i, 2));
        } else if (-0x8000_0000 <= i && i <= -0x20_0000) || (0x20_0000 <= i && i <= 0x7fff_ffff) {
            // below 2^21 a varint is never longer
            return (SUFFIX_I32, encode_fixed(i, 4));
        }
    }
    if n.is_negative() {
        (SUFFIX_VAR_NEG, encode_varint(&n.magnitude()))
    } else {
        (SUFFIX_VAR_POS, encode_varint(&n.magnitude()))
    }
}

/// Picks the control byte and length header for a length-prefixed family.
fn tag_and_len(family: u8, inline_max: usize, len: usize) -> (u8, Header) {
    if len <= inline_max {
        (family | len as u8, Header::new())
    } else if len <= 0xff {
        (family | LEN_U8, smallvec![len as u8])
    } else if len <= 0xffff {
        (family | LEN_U16, encode_fixed(len as i64, 2))
    } else {
        (family | LEN_VARINT, encode_varint_u64(len as u64))
    }
}

fn build_int(n: &Inum) -> Proxy {
    let mut node = match n.to_i64() {
        Some(i) if 0 <= i && i <= INT_INLINE_MAX as i64 => Proxy::new(FAMILY_INT | i as u8),
        _ => {
            let (suffix, header) = int_form(n);
            Proxy::with_header(FAMILY_INT | suffix, header)
        }
    };
    node.origin = Some(n.clone());
    node
}

fn build_float(f: f64) -> Proxy {
    if f.is_nan() {
        Proxy::new(FLOAT_NAN)
    } else if f.is_infinite() {
        Proxy::new(if f > 0.0 { FLOAT_POS_INF } else { FLOAT_NEG_INF })
    } else {
        Proxy::with_header(FLOAT_DOUBLE, Header::from_slice(&f.to_bits().to_be_bytes()))
    }
}

fn build_text(s: &str) -> Proxy {
    let utf8 = s.as_bytes();
    let mut utf16 = Vec::with_capacity(utf8.len() * 2);
    for unit in s.encode_utf16() {
        utf16.extend_from_slice(&unit.to_le_bytes());
    }

    // UTF-16 only when strictly shorter
    let (control, header, payload) = if utf16.len() < utf8.len() {
        let (control, header) = tag_and_len(FAMILY_UTF16, UTF16_INLINE_MAX, utf16.len() / 2);
        (control, header, Bytes::from(utf16))
    } else {
        let (control, header) = tag_and_len(FAMILY_UTF8, UTF8_INLINE_MAX, utf8.len());
        (control, header, Bytes::copy_from_slice(utf8))
    };

    let mut node = Proxy::with_header(control, header);
    node.hash = Some(djb_hash(&payload));
    node.payload = payload;
    node
}

fn build_blob(b: &Bytes) -> Proxy {
    let (control, header) = tag_and_len(FAMILY_BLOB, BLOB_INLINE_MAX, b.len());
    let mut node = Proxy::with_header(control, header);
    node.hash = Some(djb_hash(b));
    node.payload = b.clone();
    node
}

fn build_straight_array(items: &[Value], config: &EncoderConfig) -> Proxy {
    let (control, header) = tag_and_len(FAMILY_ARR, COUNT_INLINE_MAX, items.len());
    let mut node = Proxy::with_header(control, header);
    node.children = items.iter().map(|v| build_proxy(v, config)).collect();
    debug_assert_eq!(node.children.len(), items.len());
    node
}

/// Rows must all be maps, and at least one of them must be non-empty.
fn can_swap(items: &[Value]) -> bool {
    let mut columns = false;
    for row in items {
        match row {
            Value::Map(m) => columns = columns || !m.is_empty(),
            _ => return false,
        }
    }
    columns
}

fn build_swapped_array(rows: &[&VecMap<Value, Value>], config: &EncoderConfig) -> Proxy {
    let columns: IndexSet<&Value> = rows.iter().flat_map(|row| row.keys()).collect();

    let (control, header) = tag_and_len(FAMILY_SWAPPED, COUNT_INLINE_MAX, columns.len());
    let mut node = Proxy::with_header(control, header);
    for column in &columns {
        let cells: Vec<Value> = rows
            .iter()
            .map(|row| row.get(column).cloned().unwrap_or(Value::Unspecified))
            .collect();
        node.children.push(build_proxy(column, config));
        node.children.push(build_array(&cells, config));
    }
    debug_assert_eq!(node.children.len(), columns.len() * 2);
    node
}

fn build_array(items: &[Value], config: &EncoderConfig) -> Proxy {
    let straight = build_straight_array(items, config);
    if !config.transpose || !can_swap(items) {
        return straight;
    }

    let rows: Vec<&VecMap<Value, Value>> = items
        .iter()
        .filter_map(|row| match row {
            Value::Map(m) => Some(m),
            _ => None,
        })
        .collect();
    let swapped = build_swapped_array(&rows, config);

    // only the first three levels are compared
    if swapped.size(3) < straight.size(3) {
        swapped
    } else {
        straight
    }
}

fn build_map(m: &VecMap<Value, Value>, config: &EncoderConfig) -> Proxy {
    let (control, header) = tag_and_len(FAMILY_MAP, COUNT_INLINE_MAX, m.len());
    let mut node = Proxy::with_header(control, header);
    for (k, v) in m {
        node.children.push(build_proxy(k, config));
        node.children.push(build_proxy(v, config));
    }
    debug_assert_eq!(node.children.len(), m.len() * 2);
    node
}

/// Builds the unoptimized proxy tree of a value.
pub(crate) fn build_proxy(v: &Value, config: &EncoderConfig) -> Proxy {
    match v {
        Value::Absent => Proxy::new(CON_ABSENT),
        Value::Null => Proxy::new(CON_NULL),
        Value::Bool(b) => Proxy::new(if *b { CON_TRUE } else { CON_FALSE }),
        Value::Int(n) => build_int(n),
        Value::Float(f) => build_float(*f),
        Value::Text(s) => build_text(s),
        Value::Blob(b) => build_blob(b),
        Value::Array(items) => build_array(items, config),
        Value::Map(m) => build_map(m, config),
        Value::Unspecified => Proxy::new(UNSPECIFIED),
    }
}

/// A JKSN encoder.
///
/// The last integer and the back-reference tables persist across calls to
/// [`encode`](Encoder::encode), so values encoded by the same encoder must be decoded
/// in the same order by a single [`Decoder`](super::Decoder).
///
/// # Example
///
/// ```
/// use jksn::prelude::*;
///
/// let mut enc = Encoder::new();
/// let mut dec = Decoder::new();
///
/// let first = enc.encode(&Value::from("repeated text"));
/// let second = enc.encode(&Value::from("repeated text"));
///
/// // the second copy is a two byte back-reference after the header
/// assert_eq!(second.len(), 3 + 2);
///
/// assert_eq!(dec.decode(first).unwrap(), Value::from("repeated text"));
/// assert_eq!(dec.decode(second).unwrap(), Value::from("repeated text"));
/// ```
#[derive(Clone, Debug)]
pub struct Encoder {
    config: EncoderConfig,
    last_int: Option<Inum>,
    /// Text payloads with the family they were written in.
    text_table: Vec<Option<(u8, Bytes)>>,
    blob_table: Vec<Option<Bytes>>,
}

impl Default for Encoder {
    fn default() -> Self { Encoder::with_config(EncoderConfig::default()) }
}

impl Encoder {
    /// Creates an encoder with the default configuration.
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: EncoderConfig) -> Self {
        Encoder {
            config,
            last_int: None,
            text_table: vec![None; 256],
            blob_table: vec![None; 256],
        }
    }

    pub fn config(&self) -> &EncoderConfig { &self.config }

    /// Forgets the last integer and every back-reference.
    pub fn reset(&mut self) {
        self.last_int = None;
        self.text_table.iter_mut().for_each(|slot| *slot = None);
        self.blob_table.iter_mut().for_each(|slot| *slot = None);
    }

    /// Encodes a value into a new buffer.
    pub fn encode(&mut self, v: &Value) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(v, &mut out);
        out
    }

    /// Encodes a value, appending to `out`.
    pub fn encode_into<S: Serializer>(&mut self, v: &Value, out: &mut S) {
        let mut root = build_proxy(v, &self.config);
        self.optimize(&mut root);
        if self.config.header {
            out.put_slice(MAGIC);
        }
        root.write(out);
    }

    /// Rewrites the tree in place using the state left by earlier nodes.
    ///
    /// Nodes are visited in the order they are written, which is also the order the
    /// decoder sees them.
    pub(crate) fn optimize(&mut self, node: &mut Proxy) {
        match node.control & MASK_FAMILY {
            FAMILY_INT => self.optimize_int(node),
            FAMILY_UTF16 | FAMILY_UTF8 => self.optimize_text(node),
            FAMILY_BLOB => self.optimize_blob(node),
            _ => {
                for child in node.children.iter_mut() {
                    self.optimize(child);
                }
            }
        }
    }

    fn optimize_int(&mut self, node: &mut Proxy) {
        let origin = match node.origin.take() {
            Some(origin) => origin,
            None => return,
        };

        if let (true, Some(last)) = (self.config.delta, &self.last_int) {
            let delta = &origin - last;
            if delta.abs_lt(&origin) {
                let (control, header) = delta_form(&delta);
                if header.len() < node.header.len() {
                    trace!(%delta, "delta encoding integer");
                    node.control = control;
                    node.header = header;
                }
            }
        }

        self.last_int = Some(origin.clone());
        node.origin = Some(origin);
    }

    fn optimize_text(&mut self, node: &mut Proxy) {
        let hash = match node.hash {
            Some(hash) => hash,
            None => return,
        };
        let family = node.control & MASK_FAMILY;
        let slot = &mut self.text_table[hash as usize];

        if self.config.dedupe && node.payload.len() > 1 {
            if let Some((f, p)) = slot {
                if *f == family && *p == node.payload {
                    trace!(hash, "text back-reference");
                    node.control = TEXT_BACKREF;
                    node.header = smallvec![hash];
                    node.payload = Bytes::new();
                    return;
                }
            }
        }
        *slot = Some((family, node.payload.clone()));
    }

    fn optimize_blob(&mut self, node: &mut Proxy) {
        let hash = match node.hash {
            Some(hash) => hash,
            None => return,
        };
        let slot = &mut self.blob_table[hash as usize];

        if self.config.dedupe && node.payload.len() > 1 && slot.as_ref() == Some(&node.payload) {
            trace!(hash, "blob back-reference");
            node.control = BLOB_BACKREF;
            node.header = smallvec![hash];
            node.payload = Bytes::new();
            return;
        }
        *slot = Some(node.payload.clone());
    }
}

/// Picks the delta-family control byte and header for `delta`.
fn delta_form(delta: &Inum) -> (u8, Header) {
    match delta.to_i64() {
        Some(d) if 0 <= d && d <= DELTA_INLINE_MAX => (FAMILY_DELTA | d as u8, Header::new()),
        Some(d) if DELTA_INLINE_MIN <= d && d < 0 => {
            (FAMILY_DELTA | (d + DELTA_NEG_BIAS) as u8, Header::new())
        }
        _ => {
            let (suffix, header) = int_form(delta);
            (FAMILY_DELTA | suffix, header)
        }
    }
}
