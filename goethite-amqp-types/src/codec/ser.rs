//! Primitive encoders over a cursor-based byte buffer

use bytes::{BufMut, BytesMut};
use indexmap::IndexMap;

use crate::codec::{format_code::EncodingCodes, size, value::Value};
use crate::primitives::Symbol;

/// Writes a null constructor
pub fn write_null(buf: &mut BytesMut) {
    buf.put_u8(EncodingCodes::Null as u8);
}

/// Writes a boolean with the fixed-width-zero constructors
pub fn write_bool(buf: &mut BytesMut, val: bool) {
    match val {
        true => buf.put_u8(EncodingCodes::BooleanTrue as u8),
        false => buf.put_u8(EncodingCodes::BooleanFalse as u8),
    }
}

/// Writes a ubyte
pub fn write_ubyte(buf: &mut BytesMut, val: u8) {
    buf.put_u8(EncodingCodes::UByte as u8);
    buf.put_u8(val);
}

/// Writes a uint with the smallest constructor that fits the value
pub fn write_uint(buf: &mut BytesMut, val: u32) {
    match val {
        0 => buf.put_u8(EncodingCodes::Uint0 as u8),
        1..=255 => {
            buf.put_u8(EncodingCodes::SmallUint as u8);
            buf.put_u8(val as u8);
        }
        _ => {
            buf.put_u8(EncodingCodes::UInt as u8);
            buf.put_u32(val);
        }
    }
}

/// Writes a ulong with the smallest constructor that fits the value
pub fn write_ulong(buf: &mut BytesMut, val: u64) {
    match val {
        0 => buf.put_u8(EncodingCodes::Ulong0 as u8),
        1..=255 => {
            buf.put_u8(EncodingCodes::SmallUlong as u8);
            buf.put_u8(val as u8);
        }
        _ => {
            buf.put_u8(EncodingCodes::ULong as u8);
            buf.put_u64(val);
        }
    }
}

/// Writes a string with the smallest constructor that fits the length
pub fn write_string(buf: &mut BytesMut, val: &str) {
    write_variable(buf, val.as_bytes(), EncodingCodes::Str8, EncodingCodes::Str32);
}

/// Writes a symbol with the smallest constructor that fits the length
pub fn write_symbol(buf: &mut BytesMut, val: &str) {
    write_variable(buf, val.as_bytes(), EncodingCodes::Sym8, EncodingCodes::Sym32);
}

/// Writes a binary with the smallest constructor that fits the length
pub fn write_binary(buf: &mut BytesMut, val: &[u8]) {
    write_variable(buf, val, EncodingCodes::VBin8, EncodingCodes::VBin32);
}

fn write_variable(buf: &mut BytesMut, val: &[u8], narrow: EncodingCodes, wide: EncodingCodes) {
    if val.len() <= u8::MAX as usize {
        buf.put_u8(narrow as u8);
        buf.put_u8(val.len() as u8);
    } else {
        debug_assert!(val.len() <= u32::MAX as usize);
        buf.put_u8(wide as u8);
        buf.put_u32(val.len() as u32);
    }
    buf.put_slice(val);
}

/// Writes a map of symbol keys to scalar values with the smallest map
/// constructor that fits
pub fn write_map(buf: &mut BytesMut, map: &IndexMap<Symbol, Value>) {
    let entries = size::map_entries(map);
    let count = map.len() * 2;

    if entries + 1 <= u8::MAX as usize && count <= u8::MAX as usize {
        buf.put_u8(EncodingCodes::Map8 as u8);
        // size includes the one byte taken by count
        buf.put_u8((entries + 1) as u8);
        buf.put_u8(count as u8);
    } else {
        buf.put_u8(EncodingCodes::Map32 as u8);
        // size includes the four bytes taken by count
        buf.put_u32((entries + 4) as u32);
        buf.put_u32(count as u32);
    }

    for (key, value) in map {
        write_symbol(buf, key.as_str());
        value.encode(buf);
    }
}

/// Writes one boolean field slot, mapping `None` to null
pub fn write_field_bool(buf: &mut BytesMut, val: Option<bool>) {
    match val {
        Some(val) => write_bool(buf, val),
        None => write_null(buf),
    }
}

/// Writes one string field slot, mapping `None` to null
pub fn write_field_string(buf: &mut BytesMut, val: Option<&str>) {
    match val {
        Some(val) => write_string(buf, val),
        None => write_null(buf),
    }
}

/// Writes one binary field slot, mapping `None` to null
pub fn write_field_binary(buf: &mut BytesMut, val: Option<&[u8]>) {
    match val {
        Some(val) => write_binary(buf, val),
        None => write_null(buf),
    }
}

/// Writes one map field slot, mapping `None` to null
pub fn write_field_map(buf: &mut BytesMut, val: Option<&IndexMap<Symbol, Value>>) {
    match val {
        Some(val) => write_map(buf, val),
        None => write_null(buf),
    }
}
