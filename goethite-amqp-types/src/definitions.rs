//! Part 2.8 definitions

use std::any::Any;

use bytes::{Bytes, BytesMut};
use indexmap::IndexMap;

use crate::codec::{self, de, ser, size, Composite, Described, Value};
use crate::primitives::Symbol;

/// A mapping from field name to value
pub type Fields = IndexMap<Symbol, Value>;

/// 2.8.15 AMQP Error
///
/// Shared error conditions.
/// <type name="amqp-error" class="restricted" source="symbol" provides="error-condition">
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmqpError {
    /// An internal error occurred. Operator intervention might be necessary
    /// to resume normal operation.
    InternalError,

    /// The peer tried to use a frame in a manner that is inconsistent with
    /// the semantics defined in the specification.
    NotImplemented,

    /// Data could not be decoded.
    DecodeError,

    /// The client attempted to work with a server entity to which it has no
    /// access due to security settings.
    UnauthorizedAccess,
}

impl AmqpError {
    /// Returns the condition symbol value
    pub fn as_str(&self) -> &'static str {
        match self {
            AmqpError::InternalError => "amqp:internal-error",
            AmqpError::NotImplemented => "amqp:not-implemented",
            AmqpError::DecodeError => "amqp:decode-error",
            AmqpError::UnauthorizedAccess => "amqp:unauthorized-access",
        }
    }
}

impl From<AmqpError> for Symbol {
    fn from(err: AmqpError) -> Self {
        Symbol::from(err.as_str())
    }
}

/// 2.8.14 Error
///
/// Details of an error.
/// <type name="error" class="composite" source="list">
///     <descriptor name="amqp:error:list" code="0x00000000:0x0000001d"/>
///     <field name="condition" type="symbol" requires="error-condition" mandatory="true"/>
///     <field name="description" type="string"/>
///     <field name="info" type="fields"/>
/// </type>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Error {
    /// condition a symbolic value indicating the error condition
    pub condition: Symbol,

    /// descriptive text about the error condition
    pub description: Option<String>,

    /// map carrying information about the error condition
    pub info: Option<Fields>,
}

impl Error {
    /// Descriptor name of error
    pub const NAME: &'static str = "amqp:error:list";

    /// Descriptor code of error
    pub const CODE: u64 = 0x0000_0000_0000_001d;

    const FIELDS: usize = 3;

    /// Creates a new [`Error`]
    pub fn new(
        condition: impl Into<Symbol>,
        description: Option<String>,
        info: Option<Fields>,
    ) -> Self {
        Self {
            condition: condition.into(),
            description,
            info,
        }
    }
}

impl<T> From<T> for Error
where
    T: Into<Symbol>,
{
    fn from(condition: T) -> Self {
        Self {
            condition: condition.into(),
            description: None,
            info: None,
        }
    }
}

impl Composite for Error {
    fn descriptor_name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor_code(&self) -> u64 {
        Self::CODE
    }

    fn field_count(&self) -> usize {
        Self::FIELDS
    }

    fn encoded_field_count(&self) -> usize {
        if self.info.is_some() {
            3
        } else if self.description.is_some() {
            2
        } else {
            1
        }
    }

    fn value_size(&self) -> usize {
        let count = self.encoded_field_count();
        let mut sz = size::symbol(self.condition.as_str());
        if count >= 2 {
            sz += self.description.as_deref().map_or(size::NULL, size::string);
        }
        if count >= 3 {
            sz += self.info.as_ref().map_or(size::NULL, size::map);
        }
        sz
    }

    fn encode_fields(&self, buf: &mut BytesMut) {
        let count = self.encoded_field_count();
        ser::write_symbol(buf, self.condition.as_str());
        if count >= 2 {
            ser::write_field_string(buf, self.description.as_deref());
        }
        if count >= 3 {
            ser::write_field_map(buf, self.info.as_ref());
        }
    }

    fn decode_fields(&mut self, buf: &mut Bytes, count: usize) -> Result<(), codec::Error> {
        if count >= 1 {
            self.condition = de::read_field_symbol(buf)?.ok_or(codec::Error::InvalidValue)?;
        }
        if count >= 2 {
            self.description = de::read_field_string(buf)?;
        }
        if count >= 3 {
            self.info = de::read_field_map(buf)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Described for Error {
    const NAME: &'static str = Error::NAME;
    const CODE: u64 = Error::CODE;
}

#[cfg(test)]
mod tests {
    use crate::codec::{from_slice, to_vec, Value};

    use super::{AmqpError, Error, Fields};

    #[test]
    fn test_roundtrip_error() {
        let expected = Error::from(AmqpError::DecodeError);
        let serialized = to_vec(&expected);
        let deserialized: Error = from_slice(&serialized).unwrap();
        assert_eq!(expected, deserialized)
    }

    #[test]
    fn test_roundtrip_error_with_info() {
        let mut info = Fields::new();
        info.insert("retry-after".into(), Value::Uint(30));
        info.insert("peer".into(), Value::from("broker-1"));

        let expected = Error::new(
            AmqpError::InternalError,
            Some(String::from("connection dropped")),
            Some(info),
        );
        let serialized = to_vec(&expected);
        let deserialized: Error = from_slice(&serialized).unwrap();
        assert_eq!(expected, deserialized)
    }

    #[test]
    fn test_mandatory_condition_cannot_be_null() {
        let buf = vec![
            0x00, // described type
            0x53, // smallulong
            0x1d,
            0xc0, // list8
            0x02,
            0x01,
            0x40, // null condition
        ];
        let result: Result<Error, _> = from_slice(&buf);
        assert!(result.is_err());
    }
}
