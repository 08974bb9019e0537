//! Encoding codes of AMQP types

use std::{convert::TryFrom, fmt::Display};

use crate::codec::error::Error;

/// Encoding code for different types
///
/// Only the constructors this workspace encodes or decodes are listed; any
/// other byte in a constructor position is a framing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
#[repr(u8)]
pub enum EncodingCodes {
    DescribedType = 0x00_u8,

    Null = 0x40,

    Boolean = 0x56,
    BooleanTrue = 0x41,
    BooleanFalse = 0x42,

    /// u8
    UByte = 0x50,

    /// u32
    UInt = 0x70,
    SmallUint = 0x52,
    Uint0 = 0x43,

    /// u64
    ULong = 0x80,
    SmallUlong = 0x53,
    Ulong0 = 0x44,

    // Binary
    VBin8 = 0xa0,
    VBin32 = 0xb0,

    // String
    Str8 = 0xa1,
    Str32 = 0xb1,

    // A special version of String
    Sym8 = 0xa3,
    Sym32 = 0xb3,

    List0 = 0x45,
    List8 = 0xc0,
    List32 = 0xd0,

    Map8 = 0xc1,
    Map32 = 0xd1,
}

impl Display for EncodingCodes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}:0x{:x}", self, *self as u8)
    }
}

impl TryFrom<u8> for EncodingCodes {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let code = match value {
            0x00 => EncodingCodes::DescribedType,

            0x40 => EncodingCodes::Null,

            0x56 => EncodingCodes::Boolean,
            0x41 => EncodingCodes::BooleanTrue,
            0x42 => EncodingCodes::BooleanFalse,

            // u8
            0x50 => EncodingCodes::UByte,

            // u32
            0x70 => EncodingCodes::UInt,
            0x52 => EncodingCodes::SmallUint,
            0x43 => EncodingCodes::Uint0,

            // u64
            0x80 => EncodingCodes::ULong,
            0x53 => EncodingCodes::SmallUlong,
            0x44 => EncodingCodes::Ulong0,

            // binary
            0xa0 => EncodingCodes::VBin8,
            0xb0 => EncodingCodes::VBin32,

            // string
            0xa1 => EncodingCodes::Str8,
            0xb1 => EncodingCodes::Str32,

            // symbol
            0xa3 => EncodingCodes::Sym8,
            0xb3 => EncodingCodes::Sym32,

            // list
            0x45 => EncodingCodes::List0,
            0xc0 => EncodingCodes::List8,
            0xd0 => EncodingCodes::List32,

            // map
            0xc1 => EncodingCodes::Map8,
            0xd1 => EncodingCodes::Map32,

            _ => return Err(Error::InvalidFormatCode(value)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::EncodingCodes;
    use crate::codec::error::Error;

    #[test]
    fn test_try_from_known_codes() {
        let code = EncodingCodes::try_from(0x45).unwrap();
        assert_eq!(code, EncodingCodes::List0);

        let code = EncodingCodes::try_from(0xa3).unwrap();
        assert_eq!(code, EncodingCodes::Sym8);
    }

    #[test]
    fn test_try_from_unknown_code() {
        let result = EncodingCodes::try_from(0x9f);
        assert!(matches!(result, Err(Error::InvalidFormatCode(0x9f))));
    }
}
