#![deny(missing_docs, missing_debug_implementations)]

//! SASL security-layer negotiation core for AMQP1.0.
//!
//! A listener registers mechanism templates in a
//! [`SaslHandlerRegistry`](crate::sasl::SaslHandlerRegistry) once; the
//! negotiator that owns the frame exchange clones a handler per connection
//! attempt, drives it through the [`SaslHandler`](crate::sasl::SaslHandler)
//! hooks and receives exactly one terminal
//! [`complete_negotiation`](crate::sasl::SaslNegotiator::complete_negotiation)
//! call for the attempt.
//!
//! Credential validation itself is delegated to the asynchronous
//! [`PlainAuthenticator`](crate::auth::PlainAuthenticator) collaborator;
//! this crate only parses message structure and maps verification results
//! to SASL outcome codes.

pub mod auth;
pub mod sasl;

pub use goethite_amqp_types as types;
