//! Primitive decoders over a cursor-based byte buffer

use bytes::{Buf, Bytes};
use indexmap::IndexMap;

use crate::codec::{
    composite::{self, Described},
    error::Error,
    format_code::EncodingCodes,
    value::Value,
};
use crate::primitives::{Binary, Symbol};

/// Reads a single byte
pub fn read_u8(buf: &mut Bytes) -> Result<u8, Error> {
    if buf.remaining() < 1 {
        return Err(Error::InsufficientBytes);
    }
    Ok(buf.get_u8())
}

/// Reads a big-endian u32
pub fn read_u32(buf: &mut Bytes) -> Result<u32, Error> {
    if buf.remaining() < 4 {
        return Err(Error::InsufficientBytes);
    }
    Ok(buf.get_u32())
}

/// Reads a big-endian u64
pub fn read_u64(buf: &mut Bytes) -> Result<u64, Error> {
    if buf.remaining() < 8 {
        return Err(Error::InsufficientBytes);
    }
    Ok(buf.get_u64())
}

/// Reads `len` bytes
pub fn read_bytes(buf: &mut Bytes, len: usize) -> Result<Bytes, Error> {
    if buf.remaining() < len {
        return Err(Error::InsufficientBytes);
    }
    Ok(buf.copy_to_bytes(len))
}

/// Consumes and returns the next format code
pub fn read_format_code(buf: &mut Bytes) -> Result<EncodingCodes, Error> {
    EncodingCodes::try_from(read_u8(buf)?)
}

/// Returns the next format code without consuming it
pub fn peek_format_code(buf: &Bytes) -> Result<EncodingCodes, Error> {
    let byte = buf.chunk().first().ok_or(Error::InsufficientBytes)?;
    EncodingCodes::try_from(*byte)
}

/// Reads the payload of a variable-width constructor. The one-byte width
/// is used when `wide` is false, the four-byte width otherwise.
pub fn read_variable_bytes(buf: &mut Bytes, wide: bool) -> Result<Bytes, Error> {
    let len = match wide {
        false => read_u8(buf)? as usize,
        true => read_u32(buf)? as usize,
    };
    read_bytes(buf, len)
}

/// Reads one boolean field slot, mapping a null constructor to `None`
pub fn read_field_bool(buf: &mut Bytes) -> Result<Option<bool>, Error> {
    match read_format_code(buf)? {
        EncodingCodes::Null => Ok(None),
        EncodingCodes::BooleanTrue => Ok(Some(true)),
        EncodingCodes::BooleanFalse => Ok(Some(false)),
        EncodingCodes::Boolean => match read_u8(buf)? {
            0x00 => Ok(Some(false)),
            0x01 => Ok(Some(true)),
            _ => Err(Error::InvalidValue),
        },
        code => Err(Error::InvalidFormatCode(code as u8)),
    }
}

/// Reads one ubyte field slot, mapping a null constructor to `None`
pub fn read_field_ubyte(buf: &mut Bytes) -> Result<Option<u8>, Error> {
    match read_format_code(buf)? {
        EncodingCodes::Null => Ok(None),
        EncodingCodes::UByte => Ok(Some(read_u8(buf)?)),
        code => Err(Error::InvalidFormatCode(code as u8)),
    }
}

/// Reads one uint field slot, mapping a null constructor to `None`
pub fn read_field_uint(buf: &mut Bytes) -> Result<Option<u32>, Error> {
    match read_format_code(buf)? {
        EncodingCodes::Null => Ok(None),
        EncodingCodes::Uint0 => Ok(Some(0)),
        EncodingCodes::SmallUint => Ok(Some(read_u8(buf)? as u32)),
        EncodingCodes::UInt => Ok(Some(read_u32(buf)?)),
        code => Err(Error::InvalidFormatCode(code as u8)),
    }
}

/// Reads one ulong field slot, mapping a null constructor to `None`
pub fn read_field_ulong(buf: &mut Bytes) -> Result<Option<u64>, Error> {
    match read_format_code(buf)? {
        EncodingCodes::Null => Ok(None),
        EncodingCodes::Ulong0 => Ok(Some(0)),
        EncodingCodes::SmallUlong => Ok(Some(read_u8(buf)? as u64)),
        EncodingCodes::ULong => Ok(Some(read_u64(buf)?)),
        code => Err(Error::InvalidFormatCode(code as u8)),
    }
}

/// Reads one string field slot, mapping a null constructor to `None`
pub fn read_field_string(buf: &mut Bytes) -> Result<Option<String>, Error> {
    let wide = match read_format_code(buf)? {
        EncodingCodes::Null => return Ok(None),
        EncodingCodes::Str8 => false,
        EncodingCodes::Str32 => true,
        code => return Err(Error::InvalidFormatCode(code as u8)),
    };
    let bytes = read_variable_bytes(buf, wide)?;
    Ok(Some(String::from_utf8(bytes.to_vec())?))
}

/// Reads one symbol field slot, mapping a null constructor to `None`
pub fn read_field_symbol(buf: &mut Bytes) -> Result<Option<Symbol>, Error> {
    let wide = match read_format_code(buf)? {
        EncodingCodes::Null => return Ok(None),
        EncodingCodes::Sym8 => false,
        EncodingCodes::Sym32 => true,
        code => return Err(Error::InvalidFormatCode(code as u8)),
    };
    let bytes = read_variable_bytes(buf, wide)?;
    Ok(Some(Symbol::new(std::str::from_utf8(&bytes)?)))
}

/// Reads one binary field slot, mapping a null constructor to `None`
pub fn read_field_binary(buf: &mut Bytes) -> Result<Option<Binary>, Error> {
    let wide = match read_format_code(buf)? {
        EncodingCodes::Null => return Ok(None),
        EncodingCodes::VBin8 => false,
        EncodingCodes::VBin32 => true,
        code => return Err(Error::InvalidFormatCode(code as u8)),
    };
    let bytes = read_variable_bytes(buf, wide)?;
    Ok(Some(bytes.to_vec()))
}

/// Reads one map field slot, mapping a null constructor to `None`.
///
/// Map keys must be symbols and map values must be scalar [`Value`]s.
pub fn read_field_map(buf: &mut Bytes) -> Result<Option<IndexMap<Symbol, Value>>, Error> {
    let wide = match read_format_code(buf)? {
        EncodingCodes::Null => return Ok(None),
        EncodingCodes::Map8 => false,
        EncodingCodes::Map32 => true,
        code => return Err(Error::InvalidFormatCode(code as u8)),
    };

    let count = match wide {
        false => {
            let size = read_u8(buf)? as usize;
            if size < 1 {
                return Err(Error::InvalidLength);
            }
            read_u8(buf)? as usize
        }
        true => {
            let size = read_u32(buf)? as usize;
            if size < 4 {
                return Err(Error::InvalidLength);
            }
            read_u32(buf)? as usize
        }
    };

    if count % 2 != 0 {
        return Err(Error::InvalidLength);
    }

    let mut map = IndexMap::with_capacity(count / 2);
    for _ in 0..count / 2 {
        let key = read_field_symbol(buf)?.ok_or(Error::InvalidValue)?;
        let value = Value::decode(buf)?;
        map.insert(key, value);
    }
    Ok(Some(map))
}

/// Reads one composite-valued field slot, mapping a null constructor to
/// `None`. The descriptor must match `T`.
pub fn read_field_described<T>(buf: &mut Bytes) -> Result<Option<T>, Error>
where
    T: Described + Default,
{
    match peek_format_code(buf)? {
        EncodingCodes::Null => {
            let _ = read_u8(buf)?;
            Ok(None)
        }
        EncodingCodes::DescribedType => Ok(Some(composite::decode(buf)?)),
        code => Err(Error::InvalidFormatCode(code as u8)),
    }
}
