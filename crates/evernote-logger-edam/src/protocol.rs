//! Thrift binary protocol, the subset EDAM needs.
//!
//! Big-endian integers, length-prefixed strings, strict message headers.

use crate::error::{EdamError, Result};

const VERSION_1: u32 = 0x8001_0000;
const VERSION_MASK: u32 = 0xffff_0000;
/// Nesting limit when skipping unknown values
const MAX_SKIP_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TType {
    Stop,
    Bool,
    Byte,
    Double,
    I16,
    I32,
    I64,
    String,
    Struct,
    Map,
    Set,
    List,
}

impl TType {
    fn to_u8(self) -> u8 {
        match self {
            TType::Stop => 0,
            TType::Bool => 2,
            TType::Byte => 3,
            TType::Double => 4,
            TType::I16 => 6,
            TType::I32 => 8,
            TType::I64 => 10,
            TType::String => 11,
            TType::Struct => 12,
            TType::Map => 13,
            TType::Set => 14,
            TType::List => 15,
        }
    }

    fn from_u8(value: u8) -> Result<Self> {
        Ok(match value {
            0 => TType::Stop,
            2 => TType::Bool,
            3 => TType::Byte,
            4 => TType::Double,
            6 => TType::I16,
            8 => TType::I32,
            10 => TType::I64,
            11 => TType::String,
            12 => TType::Struct,
            13 => TType::Map,
            14 => TType::Set,
            15 => TType::List,
            other => return Err(EdamError::Protocol(format!("unknown field type {}", other))),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Call,
    Reply,
    Exception,
    Oneway,
}

impl MessageType {
    fn to_u8(self) -> u8 {
        match self {
            MessageType::Call => 1,
            MessageType::Reply => 2,
            MessageType::Exception => 3,
            MessageType::Oneway => 4,
        }
    }

    fn from_u8(value: u8) -> Result<Self> {
        Ok(match value {
            1 => MessageType::Call,
            2 => MessageType::Reply,
            3 => MessageType::Exception,
            4 => MessageType::Oneway,
            other => return Err(EdamError::Protocol(format!("unknown message type {}", other))),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub name: String,
    pub kind: MessageType,
    pub seq: i32,
}

/// Serializes Thrift values into a byte buffer.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_message_begin(&mut self, name: &str, kind: MessageType, seq: i32) {
        self.write_u32(VERSION_1 | kind.to_u8() as u32);
        self.write_string(name);
        self.write_i32(seq);
    }

    pub fn write_field_begin(&mut self, ttype: TType, id: i16) {
        self.buf.push(ttype.to_u8());
        self.write_i16(id);
    }

    pub fn write_field_stop(&mut self) {
        self.buf.push(TType::Stop.to_u8());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_binary(&mut self, bytes: &[u8]) {
        self.write_i32(bytes.len() as i32);
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_string(&mut self, value: &str) {
        self.write_binary(value.as_bytes());
    }

    pub fn write_list_begin(&mut self, elem: TType, len: usize) {
        self.buf.push(elem.to_u8());
        self.write_i32(len as i32);
    }

    /// Write the fields produced by `body`, then the stop marker.
    pub fn write_struct(&mut self, body: impl FnOnce(&mut Self)) {
        body(self);
        self.write_field_stop();
    }

    pub fn field_bool(&mut self, id: i16, value: bool) {
        self.write_field_begin(TType::Bool, id);
        self.write_bool(value);
    }

    pub fn field_i32(&mut self, id: i16, value: i32) {
        self.write_field_begin(TType::I32, id);
        self.write_i32(value);
    }

    pub fn field_i64(&mut self, id: i16, value: i64) {
        self.write_field_begin(TType::I64, id);
        self.write_i64(value);
    }

    pub fn field_string(&mut self, id: i16, value: &str) {
        self.write_field_begin(TType::String, id);
        self.write_string(value);
    }

    pub fn field_struct(&mut self, id: i16, body: impl FnOnce(&mut Self)) {
        self.write_field_begin(TType::Struct, id);
        self.write_struct(body);
    }
}

/// Reads Thrift values from a byte slice.
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(EdamError::Protocol(format!(
                "unexpected end of data: need {} bytes at offset {}, have {}",
                n,
                self.pos,
                self.remaining()
            )));
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads both strict (versioned) and old-style headers.
    pub fn read_message_begin(&mut self) -> Result<MessageHeader> {
        let first = self.read_i32()?;
        if first < 0 {
            let word = first as u32;
            if word & VERSION_MASK != VERSION_1 {
                return Err(EdamError::Protocol(format!(
                    "bad protocol version {:#010x}",
                    word & VERSION_MASK
                )));
            }
            let kind = MessageType::from_u8((word & 0xff) as u8)?;
            let name = self.read_string()?;
            let seq = self.read_i32()?;
            Ok(MessageHeader { name, kind, seq })
        } else {
            let name_bytes = self.take(first as usize)?;
            let name = String::from_utf8(name_bytes.to_vec())
                .map_err(|e| EdamError::Protocol(format!("invalid UTF-8 method name: {}", e)))?;
            let kind = MessageType::from_u8(self.read_byte()? as u8)?;
            let seq = self.read_i32()?;
            Ok(MessageHeader { name, kind, seq })
        }
    }

    /// `None` at the stop marker
    pub fn read_field_begin(&mut self) -> Result<Option<(TType, i16)>> {
        let ttype = TType::from_u8(self.read_byte()? as u8)?;
        if ttype == TType::Stop {
            return Ok(None);
        }
        let id = self.read_i16()?;
        Ok(Some((ttype, id)))
    }

    /// Call `field` for every field of a struct until the stop marker.
    pub fn read_struct<F>(&mut self, mut field: F) -> Result<()>
    where
        F: FnMut(&mut Self, i16, TType) -> Result<()>,
    {
        while let Some((ttype, id)) = self.read_field_begin()? {
            field(self, id, ttype)?;
        }
        Ok(())
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_byte()? != 0)
    }

    pub fn read_byte(&mut self) -> Result<i8> {
        Ok(i8::from_be_bytes(self.take_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    fn read_len(&mut self) -> Result<usize> {
        let len = self.read_i32()?;
        usize::try_from(len).map_err(|_| EdamError::Protocol(format!("negative length {}", len)))
    }

    pub fn read_binary(&mut self) -> Result<Vec<u8>> {
        let len = self.read_len()?;
        Ok(self.take(len)?.to_vec())
    }

    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_binary()?;
        String::from_utf8(bytes).map_err(|e| EdamError::Protocol(format!("invalid UTF-8: {}", e)))
    }

    fn read_elem_type(&mut self) -> Result<TType> {
        match TType::from_u8(self.read_byte()? as u8)? {
            TType::Stop => Err(EdamError::Protocol("stop is not a container element type".into())),
            ttype => Ok(ttype),
        }
    }

    /// Element type and length; also used for sets
    pub fn read_list_begin(&mut self) -> Result<(TType, usize)> {
        let elem = self.read_elem_type()?;
        let len = self.read_len()?;
        // Every element takes at least one byte
        if len > self.remaining() {
            return Err(EdamError::Protocol(format!(
                "list of {} elements exceeds {} remaining bytes",
                len,
                self.remaining()
            )));
        }
        Ok((elem, len))
    }

    pub fn read_map_begin(&mut self) -> Result<(TType, TType, usize)> {
        let key = self.read_elem_type()?;
        let value = self.read_elem_type()?;
        let len = self.read_len()?;
        if len.saturating_mul(2) > self.remaining() {
            return Err(EdamError::Protocol(format!(
                "map of {} entries exceeds {} remaining bytes",
                len,
                self.remaining()
            )));
        }
        Ok((key, value, len))
    }

    /// Read a list whose elements are decoded by `item`.
    pub fn read_list<T, F>(&mut self, expected: TType, mut item: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let (elem, len) = self.read_list_begin()?;
        if len > 0 && elem != expected {
            return Err(EdamError::Protocol(format!(
                "expected list of {:?}, got {:?}",
                expected, elem
            )));
        }
        // Capacity is bounded by the input so a bogus length cannot balloon it
        let mut items = Vec::with_capacity(len.min(self.remaining()));
        for _ in 0..len {
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// Skip over a value of the given type.
    pub fn skip(&mut self, ttype: TType) -> Result<()> {
        self.skip_depth(ttype, 0)
    }

    fn skip_depth(&mut self, ttype: TType, depth: usize) -> Result<()> {
        if depth > MAX_SKIP_DEPTH {
            return Err(EdamError::Protocol("value nested too deeply".to_string()));
        }
        match ttype {
            TType::Stop => {}
            TType::Bool | TType::Byte => {
                self.take(1)?;
            }
            TType::I16 => {
                self.take(2)?;
            }
            TType::I32 => {
                self.take(4)?;
            }
            TType::Double | TType::I64 => {
                self.take(8)?;
            }
            TType::String => {
                let len = self.read_len()?;
                self.take(len)?;
            }
            TType::Struct => {
                while let Some((field_type, _)) = self.read_field_begin()? {
                    self.skip_depth(field_type, depth + 1)?;
                }
            }
            TType::Map => {
                let (key, value, len) = self.read_map_begin()?;
                for _ in 0..len {
                    self.skip_depth(key, depth + 1)?;
                    self.skip_depth(value, depth + 1)?;
                }
            }
            TType::Set | TType::List => {
                let (elem, len) = self.read_list_begin()?;
                for _ in 0..len {
                    self.skip_depth(elem, depth + 1)?;
                }
            }
        }
        Ok(())
    }
}

/// Types that can be written as a Thrift struct body.
pub trait ThriftEncode {
    fn encode(&self, enc: &mut Encoder);
}

/// Types that can be read from a Thrift struct body.
pub trait ThriftDecode: Sized {
    fn decode(dec: &mut Decoder<'_>) -> Result<Self>;
}
