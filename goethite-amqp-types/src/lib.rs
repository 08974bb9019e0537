#![deny(missing_docs, missing_debug_implementations)]

//! Implements the AMQP1.0 described-list codec and the data types built on
//! top of it as defined in the [specification](http://docs.oasis-open.org/amqp/core/v1.0/os/amqp-core-overview-v1.0-os.html).
//!
//! Every composite type in this crate implements the
//! [`Composite`](crate::codec::Composite) contract and is reachable through
//! the descriptor registry, so new performative or outcome types can be
//! added without touching the shared encode/decode drivers.

pub mod codec;

pub mod definitions;

#[cfg(feature = "messaging")]
pub mod messaging;

pub mod primitives;

#[cfg(feature = "security")]
pub mod sasl;

use codec::CompositeRegistry;

/// Returns a [`CompositeRegistry`] pre-populated with every composite type
/// defined by this crate.
pub fn default_registry() -> CompositeRegistry {
    let mut registry = CompositeRegistry::new();

    registry.register(definitions::Error::NAME, definitions::Error::CODE, || {
        Box::<definitions::Error>::default()
    });

    #[cfg(feature = "messaging")]
    {
        use messaging::{Accepted, Modified, Rejected, Released};

        registry.register(Accepted::NAME, Accepted::CODE, || {
            Box::<Accepted>::default()
        });
        registry.register(Rejected::NAME, Rejected::CODE, || {
            Box::<Rejected>::default()
        });
        registry.register(Released::NAME, Released::CODE, || {
            Box::<Released>::default()
        });
        registry.register(Modified::NAME, Modified::CODE, || {
            Box::<Modified>::default()
        });
    }

    #[cfg(feature = "security")]
    {
        use sasl::{SaslChallenge, SaslInit, SaslOutcome, SaslResponse};

        registry.register(SaslInit::NAME, SaslInit::CODE, || {
            Box::<SaslInit>::default()
        });
        registry.register(SaslChallenge::NAME, SaslChallenge::CODE, || {
            Box::<SaslChallenge>::default()
        });
        registry.register(SaslResponse::NAME, SaslResponse::CODE, || {
            Box::<SaslResponse>::default()
        });
        registry.register(SaslOutcome::NAME, SaslOutcome::CODE, || {
            Box::<SaslOutcome>::default()
        });
    }

    registry
}
