//! Protobuf wire-format reader
//!
//! The webcast protocol serializes frame payloads as protobuf messages.
//! This is a minimal reader for the wire format itself — just enough to
//! walk a message's fields; typed message structs live in `messages`.
//!
//! Wire types:
//! ```text
//! 0 - Varint (u64, LEB128)
//! 1 - Fixed64
//! 2 - Length-delimited (bytes, strings, nested messages)
//! 5 - Fixed32
//! ```

use bytes::{Buf, Bytes};

use crate::error::WireError;

// Wire type discriminants (low 3 bits of a field key)
const WIRE_VARINT: u8 = 0;
const WIRE_FIXED64: u8 = 1;
const WIRE_LEN: u8 = 2;
const WIRE_FIXED32: u8 = 5;

/// Maximum bytes a varint may occupy
const MAX_VARINT_LEN: usize = 10;

/// One decoded field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    /// Varint-encoded integer (also used for bools and enums)
    Varint(u64),
    /// Fixed 64-bit value
    Fixed64(u64),
    /// Length-delimited payload: bytes, UTF-8 string, or nested message
    Bytes(Bytes),
    /// Fixed 32-bit value
    Fixed32(u32),
}

impl WireValue {
    /// Interpret the value as an integer
    pub fn as_u64(&self) -> u64 {
        match self {
            WireValue::Varint(v) => *v,
            WireValue::Fixed64(v) => *v,
            WireValue::Fixed32(v) => u64::from(*v),
            WireValue::Bytes(_) => 0,
        }
    }

    /// Interpret the value as a boolean
    pub fn as_bool(&self) -> bool {
        self.as_u64() != 0
    }

    /// Interpret the value as raw bytes
    pub fn as_bytes(&self) -> Bytes {
        match self {
            WireValue::Bytes(b) => b.clone(),
            _ => Bytes::new(),
        }
    }

    /// Interpret the value as a UTF-8 string
    pub fn as_string(&self) -> Result<String, WireError> {
        match self {
            WireValue::Bytes(b) => String::from_utf8(b.to_vec())
                .map_err(|_| WireError::InvalidUtf8),
            _ => Ok(String::new()),
        }
    }
}

/// One field: number plus value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireField {
    /// Field number from the message definition
    pub number: u32,
    /// Decoded value
    pub value: WireValue,
}

/// Cursor over a serialized message's fields
pub struct WireReader {
    buf: Bytes,
}

impl WireReader {
    /// Create a reader over a message payload
    pub fn new(buf: Bytes) -> Self {
        Self { buf }
    }

    /// Decode the next field, or `None` when the buffer is exhausted
    pub fn next_field(&mut self) -> Result<Option<WireField>, WireError> {
        if !self.buf.has_remaining() {
            return Ok(None);
        }

        let key = read_varint(&mut self.buf)?;
        let number = (key >> 3) as u32;
        let wire_type = (key & 0x07) as u8;

        let value = match wire_type {
            WIRE_VARINT => WireValue::Varint(read_varint(&mut self.buf)?),
            WIRE_FIXED64 => {
                if self.buf.remaining() < 8 {
                    return Err(WireError::UnexpectedEof);
                }
                WireValue::Fixed64(self.buf.get_u64_le())
            }
            WIRE_LEN => {
                let len = read_varint(&mut self.buf)? as usize;
                if self.buf.remaining() < len {
                    return Err(WireError::UnexpectedEof);
                }
                WireValue::Bytes(self.buf.split_to(len))
            }
            WIRE_FIXED32 => {
                if self.buf.remaining() < 4 {
                    return Err(WireError::UnexpectedEof);
                }
                WireValue::Fixed32(self.buf.get_u32_le())
            }
            other => return Err(WireError::InvalidWireType(other)),
        };

        Ok(Some(WireField { number, value }))
    }
}

/// Read a LEB128 varint from the buffer
pub fn read_varint(buf: &mut Bytes) -> Result<u64, WireError> {
    let mut value: u64 = 0;
    let mut shift = 0;

    for _ in 0..MAX_VARINT_LEN {
        if !buf.has_remaining() {
            return Err(WireError::UnexpectedEof);
        }
        let byte = buf.get_u8();
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }

    Err(WireError::VarintOverflow)
}
