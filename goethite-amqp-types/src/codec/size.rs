//! Size computation of encoded values.
//!
//! Every composite type reports its encoded field-region size through
//! [`Composite::value_size`](crate::codec::Composite::value_size) so the
//! encoder can pick the compact or extended list header without a
//! two-pass encode. The helpers here must agree byte for byte with the
//! corresponding writers in [`ser`](crate::codec::ser).

use indexmap::IndexMap;

use crate::codec::value::Value;
use crate::primitives::Symbol;

/// Encoded size of a null constructor
pub const NULL: usize = 1;

/// Encoded size of a boolean
pub const BOOL: usize = 1;

/// Encoded size of a ubyte
pub const UBYTE: usize = 2;

/// Encoded size of a uint
pub fn uint(val: u32) -> usize {
    match val {
        0 => 1,
        1..=255 => 2,
        _ => 5,
    }
}

/// Encoded size of a ulong
pub fn ulong(val: u64) -> usize {
    match val {
        0 => 1,
        1..=255 => 2,
        _ => 9,
    }
}

/// Encoded size of a string
pub fn string(val: &str) -> usize {
    variable(val.len())
}

/// Encoded size of a symbol
pub fn symbol(val: &str) -> usize {
    variable(val.len())
}

/// Encoded size of a binary
pub fn binary(val: &[u8]) -> usize {
    variable(val.len())
}

fn variable(len: usize) -> usize {
    if len <= u8::MAX as usize {
        2 + len
    } else {
        5 + len
    }
}

/// Encoded size of a map, constructor and header included
pub fn map(map: &IndexMap<Symbol, Value>) -> usize {
    let entries = map_entries(map);
    let count = map.len() * 2;
    if entries + 1 <= u8::MAX as usize && count <= u8::MAX as usize {
        3 + entries
    } else {
        9 + entries
    }
}

/// Encoded size of a map's entry region, header excluded
pub fn map_entries(map: &IndexMap<Symbol, Value>) -> usize {
    map.iter()
        .map(|(key, value)| symbol(key.as_str()) + value.size())
        .sum()
}
