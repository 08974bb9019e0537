//! Descriptor-keyed dispatch to concrete composite types

use std::collections::HashMap;

use bytes::Bytes;

use crate::codec::{
    composite::{decode_list_body, Composite},
    descriptor::Descriptor,
    error::Error,
};

type Constructor = fn() -> Box<dyn Composite>;

/// Maps descriptors to constructors of concrete composite types.
///
/// Dispatch from a wire-level descriptor to the type implementing it is a
/// table lookup; registering a new performative or outcome type never
/// touches the shared decode driver.
#[derive(Debug, Default)]
pub struct CompositeRegistry {
    by_name: HashMap<&'static str, Constructor>,
    by_code: HashMap<u64, Constructor>,
}

impl CompositeRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a composite type under both of its descriptor forms
    pub fn register(&mut self, name: &'static str, code: u64, ctor: Constructor) {
        self.by_name.insert(name, ctor);
        self.by_code.insert(code, ctor);
    }

    /// Looks up the constructor for a decoded descriptor
    pub fn resolve(&self, descriptor: &Descriptor) -> Option<Constructor> {
        match descriptor {
            Descriptor::Name(name) => self.by_name.get(name.as_str()).copied(),
            Descriptor::Code(code) => self.by_code.get(code).copied(),
        }
    }

    /// Reads one described-list value, dispatching on its descriptor
    pub fn decode(&self, buf: &mut Bytes) -> Result<Box<dyn Composite>, Error> {
        let descriptor = Descriptor::decode(buf)?;
        let ctor = self
            .resolve(&descriptor)
            .ok_or(Error::UnknownDescriptor(descriptor))?;

        let mut value = ctor();
        decode_list_body(value.as_mut(), buf)?;
        Ok(value)
    }
}
