//! The described-list conversion contract

use std::any::Any;
use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::codec::{
    de, descriptor::Descriptor, error::Error, format_code::EncodingCodes, ser, size,
};

/// Conversion contract shared by every described-list composite type.
///
/// Fields are positional and individually nullable. An implementation only
/// supplies its wire identity and per-field encoders/decoders; header
/// selection, descriptor handling and excess-field tolerance live in the
/// free drivers of this module.
pub trait Composite: fmt::Debug + Send {
    /// Descriptor name identifying the type on the wire
    fn descriptor_name(&self) -> &'static str;

    /// Numeric descriptor identifying the type on the wire
    fn descriptor_code(&self) -> u64;

    /// Number of fields the type declares
    fn field_count(&self) -> usize;

    /// Index of the last non-absent field plus one.
    ///
    /// Trailing absent fields are never serialized, so this is the field
    /// count that actually goes on the wire.
    fn encoded_field_count(&self) -> usize;

    /// Byte length of the encoded field-value region, descriptor and list
    /// header excluded. Zero for a zero-field type.
    fn value_size(&self) -> usize;

    /// Writes exactly [`encoded_field_count`](Composite::encoded_field_count)
    /// field slots; absent interior fields are written as null.
    fn encode_fields(&self, buf: &mut BytesMut);

    /// Reads `count` field slots, each possibly null. Called only with
    /// `count <= field_count()`; fields beyond `count` keep their default
    /// (absent) value.
    fn decode_fields(&mut self, buf: &mut Bytes, count: usize) -> Result<(), Error>;

    /// Downcasting support for registry consumers
    fn as_any(&self) -> &dyn Any;
}

/// Compile-time wire identity of a composite type, used for typed decoding
pub trait Described: Composite {
    /// Descriptor name
    const NAME: &'static str;

    /// Numeric descriptor
    const CODE: u64;
}

/// Writes the full described-list encoding of `value`: the described-type
/// constructor, the symbolic descriptor and the minimal list header
/// followed by the field region.
pub fn encode(value: &dyn Composite, buf: &mut BytesMut) {
    buf.put_u8(EncodingCodes::DescribedType as u8);
    ser::write_symbol(buf, value.descriptor_name());

    let count = value.encoded_field_count();
    let value_size = value.value_size();
    if count == 0 {
        buf.put_u8(EncodingCodes::List0 as u8);
    } else if value_size + 1 <= u8::MAX as usize && count <= u8::MAX as usize {
        buf.put_u8(EncodingCodes::List8 as u8);
        // size includes the one byte taken by count
        buf.put_u8((value_size + 1) as u8);
        buf.put_u8(count as u8);
    } else {
        buf.put_u8(EncodingCodes::List32 as u8);
        // size includes the four bytes taken by count
        buf.put_u32((value_size + 4) as u32);
        buf.put_u32(count as u32);
    }

    value.encode_fields(buf);
}

/// Encodes `value` into a fresh byte vector
pub fn to_vec(value: &dyn Composite) -> Vec<u8> {
    let mut buf = BytesMut::new();
    encode(value, &mut buf);
    buf.to_vec()
}

/// Full encoded size of `value`, descriptor and list header included.
///
/// Composite-valued fields use this to report their slot size.
pub fn described_size(value: &dyn Composite) -> usize {
    let count = value.encoded_field_count();
    let value_size = value.value_size();
    let header = if count == 0 {
        1
    } else if value_size + 1 <= u8::MAX as usize && count <= u8::MAX as usize {
        3
    } else {
        9
    };
    1 + size::symbol(value.descriptor_name()) + header + value_size
}

/// Reads one described-list value of a known type, checking the descriptor
/// in either its symbolic or numeric form.
pub fn decode<T>(buf: &mut Bytes) -> Result<T, Error>
where
    T: Described + Default,
{
    let descriptor = Descriptor::decode(buf)?;
    let matches = match &descriptor {
        Descriptor::Name(name) => name.as_str() == T::NAME,
        Descriptor::Code(code) => *code == T::CODE,
    };
    if !matches {
        return Err(Error::MismatchedDescriptor);
    }

    let mut value = T::default();
    decode_list_body(&mut value, buf)?;
    Ok(value)
}

/// Reads one described-list value of a known type from a byte slice
pub fn from_slice<T>(slice: &[u8]) -> Result<T, Error>
where
    T: Described + Default,
{
    let mut buf = Bytes::copy_from_slice(slice);
    decode(&mut buf)
}

/// Reads the list header and field region into an already constructed
/// value. The descriptor must have been consumed by the caller.
pub(crate) fn decode_list_body(value: &mut dyn Composite, buf: &mut Bytes) -> Result<(), Error> {
    let (region, count) = read_list_header(buf)?;
    if buf.remaining() < region {
        return Err(Error::InsufficientBytes);
    }

    let declared = value.field_count();
    value.decode_fields(buf, count.min(declared))?;

    // A newer peer may transmit more fields than this type declares; the
    // excess slots must all be empty.
    for _ in declared..count {
        match de::read_format_code(buf)? {
            EncodingCodes::Null => {}
            _ => {
                return Err(Error::TooManyFields {
                    name: value.descriptor_name(),
                    declared,
                    encoded: count,
                })
            }
        }
    }
    Ok(())
}

/// Returns the byte length of the field region and the encoded field count
fn read_list_header(buf: &mut Bytes) -> Result<(usize, usize), Error> {
    match de::read_format_code(buf)? {
        EncodingCodes::List0 => Ok((0, 0)),
        EncodingCodes::List8 => {
            let sz = de::read_u8(buf)? as usize;
            if sz < 1 {
                return Err(Error::InvalidLength);
            }
            let count = de::read_u8(buf)? as usize;
            Ok((sz - 1, count))
        }
        EncodingCodes::List32 => {
            let sz = de::read_u32(buf)? as usize;
            if sz < 4 {
                return Err(Error::InvalidLength);
            }
            let count = de::read_u32(buf)? as usize;
            Ok((sz - 4, count))
        }
        code => Err(Error::InvalidFormatCode(code as u8)),
    }
}
