//! Primitive types

use std::fmt::{self, Display};

/// Variable width sequence of bytes
pub type Binary = Vec<u8>;

/// Represents a true or false value
pub type Boolean = bool;

/// Integer in the range 0 to 2^8 - 1 inclusive
pub type UByte = u8;

/// Integer in the range 0 to 2^32 - 1 inclusive
pub type UInt = u32;

/// Integer in the range 0 to 2^64 - 1 inclusive
pub type ULong = u64;

/// Symbolic values from a constrained domain.
///
/// Symbols are values from a constrained domain. Although the set of
/// possible domains is open-ended, typically the both number and size of
/// symbols in use for any given application will be small, e.g. small
/// enough that it is reasonable to cache the decoded representations.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Symbol(pub String);

impl Symbol {
    /// Creates a new [`Symbol`]
    pub fn new(val: impl Into<String>) -> Self {
        Self(val.into())
    }

    /// Consume the wrapper into the inner string
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the inner value as str
    pub fn as_str(&self) -> &str {
        &self.0[..]
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(val: &str) -> Self {
        Self(String::from(val))
    }
}

impl From<String> for Symbol {
    fn from(val: String) -> Self {
        Self(val)
    }
}
