use super::{
    constants::*,
    hash::djb_hash,
    varint::{decode_fixed, decode_unsigned, decode_varint},
};
use crate::{
    config::DecoderConfig,
    errors::{DecodeError, Table, Warning},
    inum::Inum,
    vecmap::VecMap,
    Value,
};
use byteorder::{BigEndian, ByteOrder};
use bytes::{Buf, Bytes};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use tracing::{debug, warn};

use DecodeError::*;

/// Input being decoded, with the offset of every read tracked for error reporting.
struct JksnBytes {
    buf: Bytes,
    start: usize,
}

impl JksnBytes {
    fn new(buf: Bytes) -> Self {
        JksnBytes {
            start: buf.len(),
            buf,
        }
    }

    #[inline]
    fn offset(&self) -> usize { self.start - self.buf.len() }

    #[inline]
    fn remaining(&self) -> usize { self.buf.len() }

    #[inline]
    fn is_empty(&self) -> bool { self.buf.is_empty() }

    fn truncated(&self, needed: usize) -> DecodeError {
        TruncatedInput {
            offset: self.offset(),
            needed: needed - self.remaining(),
        }
    }

    #[inline]
    fn take_byte(&mut self) -> Result<u8, DecodeError> {
        if self.is_empty() {
            return Err(self.truncated(1));
        }
        Ok(self.buf.get_u8())
    }

    #[inline]
    fn read_many(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        if self.remaining() < len {
            return Err(self.truncated(len));
        }
        Ok(self.buf.split_to(len))
    }

    fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.read_many(len).map(|_| ())
    }

    fn read_fixed(&mut self, width: usize) -> Result<i64, DecodeError> {
        let n = decode_fixed(&self.buf, width).ok_or_else(|| self.truncated(width))?;
        self.buf.advance(width);
        Ok(n)
    }

    fn read_unsigned(&mut self, width: usize) -> Result<u64, DecodeError> {
        let n = decode_unsigned(&self.buf, width).ok_or_else(|| self.truncated(width))?;
        self.buf.advance(width);
        Ok(n)
    }

    fn read_varint(&mut self) -> Result<BigInt, DecodeError> {
        // a varint is unterminated only when the input ends inside it
        let (n, used) = decode_varint(&self.buf).ok_or_else(|| self.truncated(self.remaining() + 1))?;
        self.buf.advance(used);
        Ok(BigInt::from(n))
    }

    fn read_varint_usize(&mut self) -> Result<usize, DecodeError> {
        let offset = self.offset();
        self.read_varint()?
            .to_usize()
            .ok_or(LengthOverflow { offset })
    }
}

/// Outcome of reading one item of the stream.
enum Step {
    Value(Value),
    /// A directive was consumed and the caller should read on.
    Skip,
}

/// A JKSN decoder.
///
/// Like the [`Encoder`](super::Encoder), the decoder remembers the last integer and the
/// back-reference tables between calls, so consecutive outputs of one encoder can be
/// decoded one at a time.
#[derive(Clone, Debug)]
pub struct Decoder {
    config: DecoderConfig,
    last_int: Option<Inum>,
    text_table: Vec<Option<String>>,
    blob_table: Vec<Option<Bytes>>,
    warnings: Vec<Warning>,
}

impl Default for Decoder {
    fn default() -> Self { Decoder::with_config(DecoderConfig::default()) }
}

impl Decoder {
    /// Creates a decoder with the default configuration.
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: DecoderConfig) -> Self {
        Decoder {
            config,
            last_int: None,
            text_table: vec![None; 256],
            blob_table: vec![None; 256],
            warnings: Vec::new(),
        }
    }

    pub fn config(&self) -> &DecoderConfig { &self.config }

    /// Forgets the last integer and every back-reference.
    pub fn reset(&mut self) {
        self.last_int = None;
        self.clear_tables();
        self.warnings.clear();
    }

    /// Warnings raised by the most recent call to [`decode`](Decoder::decode) or
    /// [`decode_many`](Decoder::decode_many).
    pub fn warnings(&self) -> &[Warning] { &self.warnings }

    /// Decodes the first value of `input`. Bytes after it are ignored.
    pub fn decode<B: Into<Bytes>>(&mut self, input: B) -> Result<Value, DecodeError> {
        self.warnings.clear();
        let mut cur = self.open(input.into());
        self.load_value(&mut cur, 0)
    }

    /// Decodes values until `input` is exhausted.
    pub fn decode_many<B: Into<Bytes>>(&mut self, input: B) -> Result<Vec<Value>, DecodeError> {
        self.warnings.clear();
        let mut cur = self.open(input.into());
        let mut out = Vec::new();
        while !cur.is_empty() {
            out.push(self.load_value(&mut cur, 0)?);
        }
        Ok(out)
    }

    fn open(&self, input: Bytes) -> JksnBytes {
        let mut cur = JksnBytes::new(input);
        if self.config.header && cur.buf.starts_with(MAGIC) {
            cur.buf.advance(MAGIC.len());
        }
        cur
    }

    fn clear_tables(&mut self) {
        self.text_table.iter_mut().for_each(|slot| *slot = None);
        self.blob_table.iter_mut().for_each(|slot| *slot = None);
    }

    fn warn(&mut self, warning: Warning) {
        warn!(?warning, "checksum skipped without verification");
        self.warnings.push(warning);
    }

    fn load_value(&mut self, cur: &mut JksnBytes, depth: usize) -> Result<Value, DecodeError> {
        if depth > self.config.max_depth {
            return Err(NestingTooDeep {
                limit: self.config.max_depth,
                offset: cur.offset(),
            });
        }
        loop {
            if let Step::Value(v) = self.load_step(cur, depth)? {
                return Ok(v);
            }
        }
    }

    /// Reads one control byte and dispatches on its family. Every family is read by its
    /// own method, so this frame stays small on the recursive path.
    fn load_step(&mut self, cur: &mut JksnBytes, depth: usize) -> Result<Step, DecodeError> {
        let at = cur.offset();
        let control = cur.take_byte()?;
        let low = control & MASK_LOW;

        let value = match control & MASK_FAMILY {
            FAMILY_SPECIAL => self.load_special(cur, control, depth, at)?,
            FAMILY_INT => self.load_int(cur, low)?,
            FAMILY_FLOAT => load_float(cur, control, at)?,
            FAMILY_UTF16 if low == LEN_BACKREF => self.text_backref(cur)?,
            FAMILY_UTF16 => self.load_utf16(cur, low, at)?,
            FAMILY_UTF8 => self.load_utf8(cur, low, at)?,
            FAMILY_BLOB => self.load_blob(cur, low, at)?,
            FAMILY_REFRESH => {
                self.load_refresh(cur, control, depth, at)?;
                return Ok(Step::Skip);
            }
            FAMILY_ARR => self.load_array(cur, low, depth)?,
            FAMILY_MAP => self.load_map(cur, low, depth)?,
            FAMILY_SWAPPED if control == UNSPECIFIED => Value::Unspecified,
            FAMILY_SWAPPED => self.load_swapped(cur, low, depth)?,
            FAMILY_DELTA => self.load_delta(cur, low, at)?,
            FAMILY_LENGTHLESS if control == LENGTHLESS_ARR => self.load_lengthless(cur, depth)?,
            FAMILY_PRAGMA => return self.load_pragma(cur, control, depth, at),
            _ => return Err(UnknownControlByte { control, offset: at }),
        };
        Ok(Step::Value(value))
    }

    fn load_special(
        &mut self,
        cur: &mut JksnBytes,
        control: u8,
        depth: usize,
        at: usize,
    ) -> Result<Value, DecodeError> {
        match control {
            CON_ABSENT => Ok(Value::Absent),
            CON_NULL => Ok(Value::Null),
            CON_FALSE => Ok(Value::Bool(false)),
            CON_TRUE => Ok(Value::Bool(true)),
            CON_JSON => self.load_json(cur, depth, at),
            _ => Err(UnknownControlByte { control, offset: at }),
        }
    }

    fn load_int(&mut self, cur: &mut JksnBytes, low: u8) -> Result<Value, DecodeError> {
        let n = if low <= INT_INLINE_MAX {
            Inum::from(low)
        } else {
            read_int_suffix(cur, low)?
        };
        self.last_int = Some(n.clone());
        Ok(Value::Int(n))
    }

    fn load_delta(&mut self, cur: &mut JksnBytes, low: u8, at: usize) -> Result<Value, DecodeError> {
        let delta = match low as i64 {
            d if d <= DELTA_INLINE_MAX => Inum::from(d),
            d if d < SUFFIX_I32 as i64 => Inum::from(d - DELTA_NEG_BIAS),
            _ => read_int_suffix(cur, low)?,
        };
        let last = self
            .last_int
            .as_ref()
            .ok_or(InvalidDeltaContext { offset: at })?;
        let n = last + &delta;
        self.last_int = Some(n.clone());
        Ok(Value::Int(n))
    }

    fn load_utf16(&mut self, cur: &mut JksnBytes, low: u8, at: usize) -> Result<Value, DecodeError> {
        let units = read_len(cur, low, UTF16_INLINE_MAX)?;
        let len = units.checked_mul(2).ok_or(LengthOverflow { offset: at })?;
        let payload = cur.read_many(len)?;
        let units: Vec<u16> = payload
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        let s = String::from_utf16(&units).map_err(|_| InvalidText { offset: at })?;
        self.text_table[djb_hash(&payload) as usize] = Some(s.clone());
        Ok(Value::Text(s))
    }

    fn load_utf8(&mut self, cur: &mut JksnBytes, low: u8, at: usize) -> Result<Value, DecodeError> {
        let len = read_len(cur, low, UTF8_INLINE_MAX)?;
        let payload = cur.read_many(len)?;
        let s = std::str::from_utf8(&payload)
            .map_err(|_| InvalidText { offset: at })?
            .to_owned();
        self.text_table[djb_hash(&payload) as usize] = Some(s.clone());
        Ok(Value::Text(s))
    }

    fn load_blob(&mut self, cur: &mut JksnBytes, low: u8, at: usize) -> Result<Value, DecodeError> {
        if low == LEN_BACKREF {
            let hash = cur.take_byte()?;
            return match &self.blob_table[hash as usize] {
                Some(b) => Ok(Value::Blob(b.clone())),
                None => Err(UnknownBackReference {
                    table: Table::Blob,
                    hash,
                    offset: at,
                }),
            };
        }
        let len = read_len(cur, low, BLOB_INLINE_MAX)?;
        let payload = cur.read_many(len)?;
        self.blob_table[djb_hash(&payload) as usize] = Some(payload.clone());
        Ok(Value::Blob(payload))
    }

    /// Clears the tables, or reads and drops a number of values.
    fn load_refresh(
        &mut self,
        cur: &mut JksnBytes,
        control: u8,
        depth: usize,
        at: usize,
    ) -> Result<(), DecodeError> {
        if control == REFRESH_TABLES {
            debug!(offset = at, "clearing back-reference tables");
            self.clear_tables();
            return Ok(());
        }
        let count = read_len(cur, control & MASK_LOW, COUNT_INLINE_MAX)?;
        debug!(offset = at, count, "discarding values");
        for _ in 0..count {
            self.load_value(cur, depth + 1)?;
        }
        Ok(())
    }

    fn load_array(&mut self, cur: &mut JksnBytes, low: u8, depth: usize) -> Result<Value, DecodeError> {
        let count = read_len(cur, low, COUNT_INLINE_MAX)?;
        let mut items = Vec::with_capacity(count.min(cur.remaining()));
        for _ in 0..count {
            items.push(self.load_value(cur, depth + 1)?);
        }
        Ok(Value::Array(items))
    }

    fn load_map(&mut self, cur: &mut JksnBytes, low: u8, depth: usize) -> Result<Value, DecodeError> {
        let count = read_len(cur, low, COUNT_INLINE_MAX)?;
        let mut map = VecMap::with_capacity(count.min(cur.remaining()));
        for _ in 0..count {
            let k = self.load_value(cur, depth + 1)?;
            let v = self.load_value(cur, depth + 1)?;
            map.insert(k, v);
        }
        Ok(Value::Map(map))
    }

    fn load_lengthless(&mut self, cur: &mut JksnBytes, depth: usize) -> Result<Value, DecodeError> {
        let mut items = Vec::new();
        loop {
            match self.load_value(cur, depth + 1)? {
                Value::Unspecified => return Ok(Value::Array(items)),
                v => items.push(v),
            }
        }
    }

    fn load_pragma(
        &mut self,
        cur: &mut JksnBytes,
        control: u8,
        depth: usize,
        at: usize,
    ) -> Result<Step, DecodeError> {
        // both checksum ranges span five controls, one per width
        let width = || CHECKSUM_WIDTHS[(control & 0b0111) as usize];
        if CHECKSUM_LEADING.contains(&control) {
            cur.skip(width())?;
            self.warn(Warning::ChecksumUnsupported { control, offset: at });
            Ok(Step::Skip)
        } else if CHECKSUM_TRAILING.contains(&control) {
            let v = self.load_value(cur, depth + 1)?;
            cur.skip(width())?;
            self.warn(Warning::ChecksumUnsupported { control, offset: at });
            Ok(Step::Value(v))
        } else if control == PRAGMA_IGNORE {
            debug!(offset = at, "ignoring value");
            self.load_value(cur, depth + 1)?;
            Ok(Step::Skip)
        } else {
            Err(UnknownControlByte { control, offset: at })
        }
    }

    fn text_backref(&mut self, cur: &mut JksnBytes) -> Result<Value, DecodeError> {
        let offset = cur.offset() - 1;
        let hash = cur.take_byte()?;
        match &self.text_table[hash as usize] {
            Some(s) => Ok(Value::Text(s.clone())),
            None => Err(UnknownBackReference {
                table: Table::Text,
                hash,
                offset,
            }),
        }
    }

    fn load_json(&mut self, cur: &mut JksnBytes, depth: usize, at: usize) -> Result<Value, DecodeError> {
        match self.load_value(cur, depth + 1)? {
            Value::Text(s) => {
                let json: serde_json::Value =
                    serde_json::from_str(&s).map_err(|e| InvalidJson { message: e.to_string() })?;
                Ok(Value::from(json))
            }
            _ => Err(JsonEscapeNotText { offset: at }),
        }
    }

    /// Reads `(key, column)` pairs and rebuilds the rows they were split from.
    fn load_swapped(&mut self, cur: &mut JksnBytes, low: u8, depth: usize) -> Result<Value, DecodeError> {
        let count = read_len(cur, low, COUNT_INLINE_MAX)?;
        let mut columns = Vec::with_capacity(count.min(cur.remaining()));
        let mut rows = 0;
        for _ in 0..count {
            let key = self.load_value(cur, depth + 1)?;
            let offset = cur.offset();
            match self.load_value(cur, depth + 1)? {
                Value::Array(cells) => {
                    rows = rows.max(cells.len());
                    columns.push((key, cells.into_iter()));
                }
                _ => return Err(TransposedColumnNotArray { offset }),
            }
        }

        let mut out = Vec::with_capacity(rows);
        for _ in 0..rows {
            let mut row = VecMap::new();
            for (key, cells) in columns.iter_mut() {
                match cells.next() {
                    None | Some(Value::Unspecified) => {}
                    Some(v) => {
                        row.insert(key.clone(), v);
                    }
                }
            }
            out.push(Value::Map(row));
        }
        Ok(Value::Array(out))
    }
}

fn load_float(cur: &mut JksnBytes, control: u8, at: usize) -> Result<Value, DecodeError> {
    Ok(Value::Float(match control {
        FLOAT_NAN => std::f64::NAN,
        FLOAT_POS_INF => std::f64::INFINITY,
        FLOAT_NEG_INF => std::f64::NEG_INFINITY,
        FLOAT_DOUBLE => f64::from_bits(BigEndian::read_u64(&cur.read_many(8)?)),
        FLOAT_SINGLE => f32::from_bits(BigEndian::read_u32(&cur.read_many(4)?)) as f64,
        FLOAT_LONG_DOUBLE => {
            return Err(UnsupportedFeature {
                feature: "long double",
                offset: at,
            })
        }
        _ => return Err(UnknownControlByte { control, offset: at }),
    }))
}

/// Reads the length or count selected by the low nibble of a control byte.
fn read_len(cur: &mut JksnBytes, low: u8, inline_max: usize) -> Result<usize, DecodeError> {
    match low {
        l if l as usize <= inline_max => Ok(l as usize),
        LEN_U16 => Ok(cur.read_unsigned(2)? as usize),
        LEN_U8 => Ok(cur.read_unsigned(1)? as usize),
        LEN_VARINT => cur.read_varint_usize(),
        // only reachable for families that reserve 0xc for back-references
        _ => Err(UnknownControlByte {
            control: low,
            offset: cur.offset() - 1,
        }),
    }
}

/// Reads the integer selected by one of the shared integer and delta low nibbles.
fn read_int_suffix(cur: &mut JksnBytes, low: u8) -> Result<Inum, DecodeError> {
    Ok(match low {
        SUFFIX_I32 => Inum::from(cur.read_fixed(4)?),
        SUFFIX_I16 => Inum::from(cur.read_fixed(2)?),
        SUFFIX_I8 => Inum::from(cur.read_fixed(1)?),
        SUFFIX_VAR_NEG => Inum::from(-cur.read_varint()?),
        _ => Inum::from(cur.read_varint()?),
    })
}
