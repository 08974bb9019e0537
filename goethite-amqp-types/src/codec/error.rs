//! Custom error

use crate::codec::descriptor::Descriptor;

/// Framing errors raised while encoding or decoding a described list.
///
/// Each variant is fatal to the single encode/decode call that raised it;
/// the codec never retries on its own.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Buffer was exhausted before the value was complete
    #[error("Insufficient bytes in buffer")]
    InsufficientBytes,

    /// Invalid format code
    #[error("Invalid format code 0x{0:02x}")]
    InvalidFormatCode(u8),

    /// Found invalid UTF-8 encoding
    #[error("Invalid UTF-8 encoding")]
    InvalidUtf8Encoding,

    /// Invalid value
    #[error("Invalid value")]
    InvalidValue,

    /// Length is invalid
    #[error("Invalid length")]
    InvalidLength,

    /// Encoded list carries more fields than the type declares
    #[error("Encoded field count {encoded} exceeds the {declared} field(s) declared by {name}")]
    TooManyFields {
        /// Descriptor name of the decoded type
        name: &'static str,
        /// Field count declared by the type
        declared: usize,
        /// Field count found on the wire
        encoded: usize,
    },

    /// Descriptor does not match the expected type
    #[error("Descriptor mismatch")]
    MismatchedDescriptor,

    /// Descriptor is not present in the registry
    #[error("Descriptor {0:?} is not registered")]
    UnknownDescriptor(Descriptor),
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(_: std::string::FromUtf8Error) -> Self {
        Error::InvalidUtf8Encoding
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(_: std::str::Utf8Error) -> Self {
        Error::InvalidUtf8Encoding
    }
}
