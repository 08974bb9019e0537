//! Part 3.4 delivery state

use std::any::Any;
use std::fmt::{self, Display};

use bytes::{Bytes, BytesMut};

use crate::codec::{self, composite, de, ser, size, Composite, Described};
use crate::definitions::{Error, Fields};
use crate::primitives::Boolean;

/// A terminal delivery state is also referred to as Outcome
#[derive(Debug, Clone)]
pub enum Outcome {
    /// 3.4.2 Accepted
    Accepted(Accepted),

    /// 3.4.3 Rejected
    Rejected(Rejected),

    /// 3.4.4 Released
    Released(Released),

    /// 3.4.5 Modified
    Modified(Modified),
}

impl From<Accepted> for Outcome {
    fn from(value: Accepted) -> Self {
        Outcome::Accepted(value)
    }
}

impl From<Rejected> for Outcome {
    fn from(value: Rejected) -> Self {
        Outcome::Rejected(value)
    }
}

impl From<Released> for Outcome {
    fn from(value: Released) -> Self {
        Outcome::Released(value)
    }
}

impl From<Modified> for Outcome {
    fn from(value: Modified) -> Self {
        Outcome::Modified(value)
    }
}

/// 3.4.2 Accepted
/// The accepted outcome
///
/// <type name="accepted" class="composite" source="list" provides="delivery-state, outcome">
///     <descriptor name="amqp:accepted:list" code="0x00000000:0x00000024"/>
/// </type>
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accepted {}

impl Accepted {
    /// Descriptor name of accepted
    pub const NAME: &'static str = "amqp:accepted:list";

    /// Descriptor code of accepted
    pub const CODE: u64 = 0x0000_0000_0000_0024;
}

impl Display for Accepted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "accepted()")
    }
}

impl Composite for Accepted {
    fn descriptor_name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor_code(&self) -> u64 {
        Self::CODE
    }

    fn field_count(&self) -> usize {
        0
    }

    fn encoded_field_count(&self) -> usize {
        0
    }

    fn value_size(&self) -> usize {
        0
    }

    fn encode_fields(&self, _buf: &mut BytesMut) {}

    fn decode_fields(&mut self, _buf: &mut Bytes, _count: usize) -> Result<(), codec::Error> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Described for Accepted {
    const NAME: &'static str = Accepted::NAME;
    const CODE: u64 = Accepted::CODE;
}

/// 3.4.3 Rejected
/// The rejected outcome.
///
/// <type name="rejected" class="composite" source="list" provides="delivery-state, outcome">
///     <descriptor name="amqp:rejected:list" code="0x00000000:0x00000025"/>
///     <field name="error" type="error"/>
/// </type>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rejected {
    /// diagnostic information about the cause of the rejection
    pub error: Option<Error>,
}

impl Rejected {
    /// Descriptor name of rejected
    pub const NAME: &'static str = "amqp:rejected:list";

    /// Descriptor code of rejected
    pub const CODE: u64 = 0x0000_0000_0000_0025;

    const FIELDS: usize = 1;
}

impl Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(error) => write!(f, "rejected(error: {})", error.condition),
            None => write!(f, "rejected()"),
        }
    }
}

impl Composite for Rejected {
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
        match self.error {
            Some(_) => 1,
            None => 0,
        }
    }

    fn value_size(&self) -> usize {
        match &self.error {
            Some(error) => composite::described_size(error),
            None => 0,
        }
    }

    fn encode_fields(&self, buf: &mut BytesMut) {
        if let Some(error) = &self.error {
            composite::encode(error, buf);
        }
    }

    fn decode_fields(&mut self, buf: &mut Bytes, count: usize) -> Result<(), codec::Error> {
        if count >= 1 {
            self.error = de::read_field_described(buf)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Described for Rejected {
    const NAME: &'static str = Rejected::NAME;
    const CODE: u64 = Rejected::CODE;
}

/// 3.4.4 Released
/// The released outcome.
///
/// <type name="released" class="composite" source="list" provides="delivery-state, outcome">
///     <descriptor name="amqp:released:list" code="0x00000000:0x00000026"/>
/// </type>
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Released {}

impl Released {
    /// Descriptor name of released
    pub const NAME: &'static str = "amqp:released:list";

    /// Descriptor code of released
    pub const CODE: u64 = 0x0000_0000_0000_0026;
}

impl Display for Released {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "released()")
    }
}

impl Composite for Released {
    fn descriptor_name(&self) -> &'static str {
        Self::NAME
    }

    fn descriptor_code(&self) -> u64 {
        Self::CODE
    }

    fn field_count(&self) -> usize {
        0
    }

    fn encoded_field_count(&self) -> usize {
        0
    }

    fn value_size(&self) -> usize {
        0
    }

    fn encode_fields(&self, _buf: &mut BytesMut) {}

    fn decode_fields(&mut self, _buf: &mut Bytes, _count: usize) -> Result<(), codec::Error> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Described for Released {
    const NAME: &'static str = Released::NAME;
    const CODE: u64 = Released::CODE;
}

/// 3.4.5 Modified
/// The modified outcome.
///
/// <type name="modified" class="composite" source="list" provides="delivery-state, outcome">
///     <descriptor name="amqp:modified:list" code="0x00000000:0x00000027"/>
///     <field name="delivery-failed" type="boolean"/>
///     <field name="undeliverable-here" type="boolean"/>
///     <field name="message-annotations" type="fields"/>
/// </type>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modified {
    /// count the transfer as an unsuccessful delivery attempt
    pub delivery_failed: Option<Boolean>,

    /// prevent redelivery
    pub undeliverable_here: Option<Boolean>,

    /// message attributes to combine with the existing message-annotations
    pub message_annotations: Option<Fields>,
}

impl Modified {
    /// Descriptor name of modified
    pub const NAME: &'static str = "amqp:modified:list";

    /// Descriptor code of modified
    pub const CODE: u64 = 0x0000_0000_0000_0027;

    const FIELDS: usize = 3;
}

impl Display for Modified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modified()")
    }
}

impl Composite for Modified {
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
        if self.message_annotations.is_some() {
            3
        } else if self.undeliverable_here.is_some() {
            2
        } else if self.delivery_failed.is_some() {
            1
        } else {
            0
        }
    }

    fn value_size(&self) -> usize {
        let count = self.encoded_field_count();
        let mut sz = 0;
        if count >= 1 {
            sz += self.delivery_failed.map_or(size::NULL, |_| size::BOOL);
        }
        if count >= 2 {
            sz += self.undeliverable_here.map_or(size::NULL, |_| size::BOOL);
        }
        if count >= 3 {
            sz += self.message_annotations.as_ref().map_or(size::NULL, size::map);
        }
        sz
    }

    fn encode_fields(&self, buf: &mut BytesMut) {
        let count = self.encoded_field_count();
        if count >= 1 {
            ser::write_field_bool(buf, self.delivery_failed);
        }
        if count >= 2 {
            ser::write_field_bool(buf, self.undeliverable_here);
        }
        if count >= 3 {
            ser::write_field_map(buf, self.message_annotations.as_ref());
        }
    }

    fn decode_fields(&mut self, buf: &mut Bytes, count: usize) -> Result<(), codec::Error> {
        if count >= 1 {
            self.delivery_failed = de::read_field_bool(buf)?;
        }
        if count >= 2 {
            self.undeliverable_here = de::read_field_bool(buf)?;
        }
        if count >= 3 {
            self.message_annotations = de::read_field_map(buf)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Described for Modified {
    const NAME: &'static str = Modified::NAME;
    const CODE: u64 = Modified::CODE;
}
