//! Descriptor of a described type

use bytes::Bytes;

use crate::codec::{de, error::Error, format_code::EncodingCodes};
use crate::primitives::Symbol;

/// Descriptor of a described type
///
/// Other implementations serialize the descriptor name as a Symbol:
/// 1. amqpnetlite: Symbol
/// 2. go-amqp: Symbol
/// 3. qpid-proton-j2: Symbol
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Descriptor {
    /// Symbolic descriptor
    Name(Symbol),

    /// Numeric descriptor
    Code(u64),
}

impl Descriptor {
    /// Creates a descriptor with the symbolic form
    pub fn name(name: impl Into<Symbol>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a descriptor with the numeric form
    pub fn code(code: u64) -> Self {
        Self::Code(code)
    }

    /// Reads the described-type constructor (0x00) followed by the
    /// descriptor value, accepting both the symbolic and the numeric form.
    pub fn decode(buf: &mut Bytes) -> Result<Self, Error> {
        match de::read_format_code(buf)? {
            EncodingCodes::DescribedType => {}
            code => return Err(Error::InvalidFormatCode(code as u8)),
        }

        match de::read_format_code(buf)? {
            EncodingCodes::Sym8 => {
                let bytes = de::read_variable_bytes(buf, false)?;
                Ok(Descriptor::Name(Symbol::new(std::str::from_utf8(&bytes)?)))
            }
            EncodingCodes::Sym32 => {
                let bytes = de::read_variable_bytes(buf, true)?;
                Ok(Descriptor::Name(Symbol::new(std::str::from_utf8(&bytes)?)))
            }
            EncodingCodes::SmallUlong => Ok(Descriptor::Code(de::read_u8(buf)? as u64)),
            EncodingCodes::ULong => Ok(Descriptor::Code(de::read_u64(buf)?)),
            EncodingCodes::Ulong0 => Ok(Descriptor::Code(0)),
            code => Err(Error::InvalidFormatCode(code as u8)),
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::Descriptor;
    use crate::codec::format_code::EncodingCodes;

    #[test]
    fn test_decode_symbolic_descriptor() {
        let name = "amqp:released:list";
        let mut buf = vec![
            EncodingCodes::DescribedType as u8,
            EncodingCodes::Sym8 as u8,
            name.len() as u8,
        ];
        buf.extend_from_slice(name.as_bytes());
        let mut buf = Bytes::from(buf);

        let descriptor = Descriptor::decode(&mut buf).unwrap();
        assert_eq!(descriptor, Descriptor::name(name));
    }

    #[test]
    fn test_decode_numeric_descriptor() {
        let buf = vec![
            EncodingCodes::DescribedType as u8,
            EncodingCodes::SmallUlong as u8,
            0x26,
        ];
        let mut buf = Bytes::from(buf);

        let descriptor = Descriptor::decode(&mut buf).unwrap();
        assert_eq!(descriptor, Descriptor::code(0x26));
    }

    #[test]
    fn test_decode_without_described_constructor() {
        let buf = vec![EncodingCodes::SmallUlong as u8, 0x26];
        let mut buf = Bytes::from(buf);

        assert!(Descriptor::decode(&mut buf).is_err());
    }
}
