//! Encoding and decoding of described-list composite types.
//!
//! Every performative, delivery outcome and error structure on an AMQP1.0
//! wire is a described list: a descriptor identifying the type followed by
//! a positional list of fields. The [`Composite`] trait captures the
//! conversion contract once; concrete types only supply their descriptor,
//! declared field count and per-field encoders/decoders.

pub mod composite;
pub mod de;
pub mod descriptor;
pub mod error;
pub mod format_code;
pub mod registry;
pub mod ser;
pub mod size;
pub mod value;

pub use composite::{described_size, encode, from_slice, to_vec, Composite, Described};
pub use descriptor::Descriptor;
pub use error::Error;
pub use format_code::EncodingCodes;
pub use registry::CompositeRegistry;
pub use value::Value;
