//! Part 5.3 SASL

use std::any::Any;

use bytes::{Bytes, BytesMut};

use crate::codec::{self, de, ser, size, Composite, Described};
use crate::primitives::{Binary, Symbol};

/// 5.3.3.2 SASL Init
/// Initiate sasl exchange.
/// <type name="sasl-init" class="composite" source="list" provides="sasl-frame">
///     <descriptor name="amqp:sasl-init:list" code="0x00000000:0x00000041"/>
///     <field name="mechanism" type="symbol" mandatory="true"/>
///     <field name="initial-response" type="binary"/>
///     <field name="hostname" type="string"/>
/// </type>
/// Selects the sasl mechanism and provides the initial response if needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaslInit {
    /// selected security mechanism
    ///
    /// The name of the SASL mechanism used for the SASL exchange. If the selected mechanism is
    /// not supported by the receiving peer, it MUST close the connection with the
    /// authentication-failure close-code.
    pub mechanism: Symbol,

    /// security response data
    ///
    /// A block of opaque data passed to the security mechanism. The contents of this data are
    /// defined by the SASL security mechanism.
    pub initial_response: Option<Binary>,

    /// the name of the target host
    ///
    /// The DNS name of the host (either fully qualified or relative) to which the sending peer
    /// is connecting.
    pub hostname: Option<String>,
}

impl SaslInit {
    /// Descriptor name of sasl-init
    pub const NAME: &'static str = "amqp:sasl-init:list";

    /// Descriptor code of sasl-init
    pub const CODE: u64 = 0x0000_0000_0000_0041;

    const FIELDS: usize = 3;
}

impl Composite for SaslInit {
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
        if self.hostname.is_some() {
            3
        } else if self.initial_response.is_some() {
            2
        } else {
            1
        }
    }

    fn value_size(&self) -> usize {
        let count = self.encoded_field_count();
        let mut sz = size::symbol(self.mechanism.as_str());
        if count >= 2 {
            sz += self
                .initial_response
                .as_deref()
                .map_or(size::NULL, size::binary);
        }
        if count >= 3 {
            sz += self.hostname.as_deref().map_or(size::NULL, size::string);
        }
        sz
    }

    fn encode_fields(&self, buf: &mut BytesMut) {
        let count = self.encoded_field_count();
        ser::write_symbol(buf, self.mechanism.as_str());
        if count >= 2 {
            ser::write_field_binary(buf, self.initial_response.as_deref());
        }
        if count >= 3 {
            ser::write_field_string(buf, self.hostname.as_deref());
        }
    }

    fn decode_fields(&mut self, buf: &mut Bytes, count: usize) -> Result<(), codec::Error> {
        if count >= 1 {
            self.mechanism = de::read_field_symbol(buf)?.ok_or(codec::Error::InvalidValue)?;
        }
        if count >= 2 {
            self.initial_response = de::read_field_binary(buf)?;
        }
        if count >= 3 {
            self.hostname = de::read_field_string(buf)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Described for SaslInit {
    const NAME: &'static str = SaslInit::NAME;
    const CODE: u64 = SaslInit::CODE;
}

/// 5.3.3.3 SASL Challenge
/// Security mechanism challenge.
/// <type name="sasl-challenge" class="composite" source="list" provides="sasl-frame">
///     <descriptor name="amqp:sasl-challenge:list" code="0x00000000:0x00000042"/>
///     <field name="challenge" type="binary" mandatory="true"/>
/// </type>
/// Send the SASL challenge data as defined by the SASL specification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaslChallenge {
    /// security challenge data
    pub challenge: Binary,
}

impl SaslChallenge {
    /// Descriptor name of sasl-challenge
    pub const NAME: &'static str = "amqp:sasl-challenge:list";

    /// Descriptor code of sasl-challenge
    pub const CODE: u64 = 0x0000_0000_0000_0042;

    const FIELDS: usize = 1;
}

impl Composite for SaslChallenge {
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
        1
    }

    fn value_size(&self) -> usize {
        size::binary(&self.challenge)
    }

    fn encode_fields(&self, buf: &mut BytesMut) {
        ser::write_binary(buf, &self.challenge);
    }

    fn decode_fields(&mut self, buf: &mut Bytes, count: usize) -> Result<(), codec::Error> {
        if count >= 1 {
            self.challenge = de::read_field_binary(buf)?.ok_or(codec::Error::InvalidValue)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Described for SaslChallenge {
    const NAME: &'static str = SaslChallenge::NAME;
    const CODE: u64 = SaslChallenge::CODE;
}

/// 5.3.3.4 SASL Response
/// Security mechanism response.
/// <type name="sasl-response" class="composite" source="list" provides="sasl-frame">
///     <descriptor name="amqp:sasl-response:list" code="0x00000000:0x00000043"/>
///     <field name="response" type="binary" mandatory="true"/>
/// </type>
/// Send the SASL response data as defined by the SASL specification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaslResponse {
    /// security response data
    pub response: Binary,
}

impl SaslResponse {
    /// Descriptor name of sasl-response
    pub const NAME: &'static str = "amqp:sasl-response:list";

    /// Descriptor code of sasl-response
    pub const CODE: u64 = 0x0000_0000_0000_0043;

    const FIELDS: usize = 1;
}

impl Composite for SaslResponse {
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
        1
    }

    fn value_size(&self) -> usize {
        size::binary(&self.response)
    }

    fn encode_fields(&self, buf: &mut BytesMut) {
        ser::write_binary(buf, &self.response);
    }

    fn decode_fields(&mut self, buf: &mut Bytes, count: usize) -> Result<(), codec::Error> {
        if count >= 1 {
            self.response = de::read_field_binary(buf)?.ok_or(codec::Error::InvalidValue)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Described for SaslResponse {
    const NAME: &'static str = SaslResponse::NAME;
    const CODE: u64 = SaslResponse::CODE;
}

/// 5.3.3.5 SASL Outcome
/// Indicates the outcome of the sasl dialog.
/// <type name="sasl-outcome" class="composite" source="list" provides="sasl-frame">
///     <descriptor name="amqp:sasl-outcome:list" code="0x00000000:0x00000044"/>
///     <field name="code" type="sasl-code" mandatory="true"/>
///     <field name="additional-data" type="binary"/>
/// </type>
/// This frame indicates the outcome of the SASL dialog. Upon successful completion of the SASL
/// dialog the security layer has been established.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaslOutcome {
    /// indicates the outcome of the sasl dialog
    pub code: SaslCode,

    /// additional data as specified in RFC-4422
    pub additional_data: Option<Binary>,
}

impl SaslOutcome {
    /// Descriptor name of sasl-outcome
    pub const NAME: &'static str = "amqp:sasl-outcome:list";

    /// Descriptor code of sasl-outcome
    pub const CODE: u64 = 0x0000_0000_0000_0044;

    const FIELDS: usize = 2;
}

impl Composite for SaslOutcome {
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
        match self.additional_data {
            Some(_) => 2,
            None => 1,
        }
    }

    fn value_size(&self) -> usize {
        let mut sz = size::UBYTE;
        if let Some(data) = &self.additional_data {
            sz += size::binary(data);
        }
        sz
    }

    fn encode_fields(&self, buf: &mut BytesMut) {
        ser::write_ubyte(buf, self.code as u8);
        if let Some(data) = &self.additional_data {
            ser::write_binary(buf, data);
        }
    }

    fn decode_fields(&mut self, buf: &mut Bytes, count: usize) -> Result<(), codec::Error> {
        if count >= 1 {
            let code = de::read_field_ubyte(buf)?.ok_or(codec::Error::InvalidValue)?;
            self.code = SaslCode::try_from(code)?;
        }
        if count >= 2 {
            self.additional_data = de::read_field_binary(buf)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Described for SaslOutcome {
    const NAME: &'static str = SaslOutcome::NAME;
    const CODE: u64 = SaslOutcome::CODE;
}

/// 5.3.3.6 SASL Code
/// Codes to indicate the outcome of the sasl dialog.
/// <type name="sasl-code" class="restricted" source="ubyte">
///     <choice name="ok" value="0"/>
///     <choice name="auth" value="1"/>
///     <choice name="sys" value="2"/>
///     <choice name="sys-perm" value="3"/>
///     <choice name="sys-temp" value="4"/>
/// </type>
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum SaslCode {
    /// 0 Connection authentication succeeded.
    #[default]
    Ok = 0u8,
    /// 1 Connection authentication failed due to an unspecified problem with the supplied
    /// credentials.
    Auth = 1,
    /// 2 Connection authentication failed due to a system error.
    Sys = 2,
    /// 3 Connection authentication failed due to a system error that is unlikely to be corrected
    /// without intervention.
    SysPerm = 3,
    /// 4 Connection authentication failed due to a transient system error.
    SysTemp = 4,
}

impl TryFrom<u8> for SaslCode {
    type Error = codec::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let code = match value {
            0 => SaslCode::Ok,
            1 => SaslCode::Auth,
            2 => SaslCode::Sys,
            3 => SaslCode::SysPerm,
            4 => SaslCode::SysTemp,
            _ => return Err(codec::Error::InvalidValue),
        };
        Ok(code)
    }
}
