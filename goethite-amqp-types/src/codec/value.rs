//! Scalar value model for annotation maps

use bytes::{Bytes, BytesMut};

use crate::codec::{de, error::Error, format_code::EncodingCodes, ser, size};
use crate::primitives::{Binary, Boolean, Symbol, UByte, UInt, ULong};

/// A scalar AMQP value.
///
/// This is the value type carried by annotation maps such as
/// [`Fields`](crate::definitions::Fields). Lists, maps and described types
/// are not valid in that position in this engine's subset and are rejected
/// on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Indicates an empty value
    Null,

    /// Represents a true or false value
    Bool(Boolean),

    /// Integer in the range 0 to 2^8 - 1 inclusive
    Ubyte(UByte),

    /// Integer in the range 0 to 2^32 - 1 inclusive
    Uint(UInt),

    /// Integer in the range 0 to 2^64 - 1 inclusive
    Ulong(ULong),

    /// A sequence of Unicode characters
    String(String),

    /// Symbolic values from a constrained domain
    Symbol(Symbol),

    /// A sequence of octets
    Binary(Binary),
}

impl Value {
    /// Encoded size of the value, constructor included
    pub fn size(&self) -> usize {
        match self {
            Value::Null => size::NULL,
            Value::Bool(_) => size::BOOL,
            Value::Ubyte(_) => size::UBYTE,
            Value::Uint(val) => size::uint(*val),
            Value::Ulong(val) => size::ulong(*val),
            Value::String(val) => size::string(val),
            Value::Symbol(val) => size::symbol(val.as_str()),
            Value::Binary(val) => size::binary(val),
        }
    }

    /// Writes the value into the buffer
    pub fn encode(&self, buf: &mut BytesMut) {
        match self {
            Value::Null => ser::write_null(buf),
            Value::Bool(val) => ser::write_bool(buf, *val),
            Value::Ubyte(val) => ser::write_ubyte(buf, *val),
            Value::Uint(val) => ser::write_uint(buf, *val),
            Value::Ulong(val) => ser::write_ulong(buf, *val),
            Value::String(val) => ser::write_string(buf, val),
            Value::Symbol(val) => ser::write_symbol(buf, val.as_str()),
            Value::Binary(val) => ser::write_binary(buf, val),
        }
    }

    /// Reads one value from the buffer
    pub fn decode(buf: &mut Bytes) -> Result<Self, Error> {
        let value = match de::read_format_code(buf)? {
            EncodingCodes::Null => Value::Null,
            EncodingCodes::BooleanTrue => Value::Bool(true),
            EncodingCodes::BooleanFalse => Value::Bool(false),
            EncodingCodes::Boolean => match de::read_u8(buf)? {
                0x00 => Value::Bool(false),
                0x01 => Value::Bool(true),
                _ => return Err(Error::InvalidValue),
            },
            EncodingCodes::UByte => Value::Ubyte(de::read_u8(buf)?),
            EncodingCodes::Uint0 => Value::Uint(0),
            EncodingCodes::SmallUint => Value::Uint(de::read_u8(buf)? as u32),
            EncodingCodes::UInt => Value::Uint(de::read_u32(buf)?),
            EncodingCodes::Ulong0 => Value::Ulong(0),
            EncodingCodes::SmallUlong => Value::Ulong(de::read_u8(buf)? as u64),
            EncodingCodes::ULong => Value::Ulong(de::read_u64(buf)?),
            EncodingCodes::Str8 => {
                let bytes = de::read_variable_bytes(buf, false)?;
                Value::String(String::from_utf8(bytes.to_vec())?)
            }
            EncodingCodes::Str32 => {
                let bytes = de::read_variable_bytes(buf, true)?;
                Value::String(String::from_utf8(bytes.to_vec())?)
            }
            EncodingCodes::Sym8 => {
                let bytes = de::read_variable_bytes(buf, false)?;
                Value::Symbol(Symbol::new(std::str::from_utf8(&bytes)?))
            }
            EncodingCodes::Sym32 => {
                let bytes = de::read_variable_bytes(buf, true)?;
                Value::Symbol(Symbol::new(std::str::from_utf8(&bytes)?))
            }
            EncodingCodes::VBin8 => Value::Binary(de::read_variable_bytes(buf, false)?.to_vec()),
            EncodingCodes::VBin32 => Value::Binary(de::read_variable_bytes(buf, true)?.to_vec()),
            code => return Err(Error::InvalidFormatCode(code as u8)),
        };
        Ok(value)
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<u8> for Value {
    fn from(val: u8) -> Self {
        Value::Ubyte(val)
    }
}

impl From<u32> for Value {
    fn from(val: u32) -> Self {
        Value::Uint(val)
    }
}

impl From<u64> for Value {
    fn from(val: u64) -> Self {
        Value::Ulong(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::String(String::from(val))
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::String(val)
    }
}

impl From<Symbol> for Value {
    fn from(val: Symbol) -> Self {
        Value::Symbol(val)
    }
}

#[cfg(test)]
mod tests {
    use bytes::{Bytes, BytesMut};

    use super::Value;
    use crate::codec::format_code::EncodingCodes;

    fn roundtrip(value: Value) {
        let mut buf = BytesMut::new();
        value.encode(&mut buf);
        assert_eq!(buf.len(), value.size());

        let mut buf = Bytes::from(buf.to_vec());
        let decoded = Value::decode(&mut buf).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_roundtrip_scalars() {
        roundtrip(Value::Null);
        roundtrip(Value::Bool(true));
        roundtrip(Value::Ubyte(0x7f));
        roundtrip(Value::Uint(0));
        roundtrip(Value::Uint(255));
        roundtrip(Value::Uint(1 << 20));
        roundtrip(Value::Ulong(1 << 40));
        roundtrip(Value::String(String::from("hello AMQP")));
        roundtrip(Value::Symbol("amqp:decode-error".into()));
        roundtrip(Value::Binary(vec![0x00, 0x01, 0x02]));
    }

    #[test]
    fn test_smallest_width_is_chosen() {
        let mut buf = BytesMut::new();
        Value::Ulong(0x26).encode(&mut buf);
        let expected = vec![EncodingCodes::SmallUlong as u8, 0x26];
        assert_eq!(&buf[..], &expected[..]);
    }

    #[test]
    fn test_decode_rejects_list_constructor() {
        let mut buf = Bytes::from(vec![EncodingCodes::List0 as u8]);
        assert!(Value::decode(&mut buf).is_err());
    }
}
