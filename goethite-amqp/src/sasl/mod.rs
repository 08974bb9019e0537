//! SASL mechanism abstraction.
//!
//! A mechanism is registered once as a template and cloned for every
//! negotiation attempt, so concurrent handshakes never share mutable
//! state. The external negotiator owns the wire: it feeds frames into the
//! handler hooks and receives either frames to transmit or the single
//! terminal completion signal of the attempt.

use std::fmt;

use async_trait::async_trait;
use tracing::trace;

use goethite_amqp_types::primitives::Symbol;
use goethite_amqp_types::sasl::{SaslChallenge, SaslCode, SaslInit, SaslResponse};

use crate::auth::Principal;

pub mod error;
pub mod plain;

pub use error::Error;
pub use plain::SaslPlainHandler;

/// SASL mechanism token for PLAIN
pub const PLAIN: &str = "PLAIN";

/// Position of a negotiation attempt within the handshake state machine.
///
/// Multi-round mechanisms loop between [`Started`](SaslState::Started) and
/// [`ChallengeIssued`](SaslState::ChallengeIssued); a zero-round-trip
/// mechanism like PLAIN moves straight from [`Idle`](SaslState::Idle) to
/// [`Completed`](SaslState::Completed) on the server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaslState {
    /// No frame has been processed yet
    Idle,

    /// The initial frame has been processed
    Started,

    /// A challenge was sent and the peer's response is pending
    ChallengeIssued,

    /// The attempt reached a terminal outcome
    Completed,
}

/// Frames a mechanism may hand back to the negotiator for transmission
#[derive(Debug)]
pub enum SaslFrame {
    /// SASL init frame
    Init(SaslInit),

    /// SASL challenge frame
    Challenge(SaslChallenge),

    /// SASL response frame
    Response(SaslResponse),
}

/// Driver of the SASL frame exchange.
///
/// The negotiator owns frame transmission and timing. It receives exactly
/// one [`complete_negotiation`](SaslNegotiator::complete_negotiation) call
/// per attempt, delivered directly from the verification's completion
/// point, which may be an arbitrary thread.
pub trait SaslNegotiator: Send + Sync {
    /// Transmits a frame built by the mechanism. `needs_reply` indicates
    /// whether the exchange continues after this frame.
    fn write_frame(&self, frame: SaslFrame, needs_reply: bool);

    /// Terminal signal of the attempt
    fn complete_negotiation(&self, code: SaslCode, detail: Option<Error>);
}

/// Pluggable per-attempt mechanism handler.
///
/// A handler instance is used for exactly one negotiation attempt. Any
/// hook may fail synchronously by returning an error, in which case the
/// negotiator terminates the attempt itself; otherwise the attempt ends
/// with the handler's single completion call.
#[async_trait]
pub trait SaslHandler: fmt::Debug + Send + Sync {
    /// Mechanism token advertised to peers
    fn mechanism(&self) -> Symbol;

    /// Produces an independent handler for one negotiation attempt,
    /// copying configuration and resetting per-attempt state
    fn clone_handler(&self) -> Box<dyn SaslHandler>;

    /// Current position in the handshake
    fn state(&self) -> SaslState;

    /// Entry point. A client builds and sends its initial response; a
    /// server consumes the peer's init frame and begins verification.
    async fn on_start(
        &mut self,
        init: SaslInit,
        negotiator: &dyn SaslNegotiator,
        is_client: bool,
    ) -> Result<(), Error>;

    /// Processes a mid-handshake challenge on the client side
    async fn on_challenge(
        &mut self,
        challenge: SaslChallenge,
        negotiator: &dyn SaslNegotiator,
    ) -> Result<(), Error> {
        let _ = (challenge, negotiator);
        Err(Error::UnsupportedOperation(self.mechanism()))
    }

    /// Processes a mid-handshake response on the server side
    async fn on_response(
        &mut self,
        response: SaslResponse,
        negotiator: &dyn SaslNegotiator,
    ) -> Result<(), Error> {
        let _ = (response, negotiator);
        Err(Error::UnsupportedOperation(self.mechanism()))
    }

    /// Identity resolved by a successful attempt
    fn principal(&self) -> Option<&Principal>;
}

/// Mechanism templates registered on a listener.
///
/// Registration order is the advertisement order, decreasing in
/// preference.
#[derive(Debug, Default)]
pub struct SaslHandlerRegistry {
    templates: Vec<Box<dyn SaslHandler>>,
}

impl SaslHandlerRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mechanism template
    pub fn register(&mut self, template: Box<dyn SaslHandler>) {
        self.templates.push(template);
    }

    /// Mechanism tokens available for advertisement
    pub fn mechanisms(&self) -> Vec<Symbol> {
        self.templates
            .iter()
            .map(|template| template.mechanism())
            .collect()
    }

    /// Clones the template registered for `mechanism` to begin one
    /// negotiation attempt
    pub fn begin_attempt(&self, mechanism: &str) -> Option<Box<dyn SaslHandler>> {
        let template = self
            .templates
            .iter()
            .find(|template| template.mechanism().as_str() == mechanism)?;
        trace!(mechanism, "cloning mechanism template");
        Some(template.clone_handler())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::auth::{AuthError, PlainAuthenticator, Principal};

    use super::{SaslHandler, SaslHandlerRegistry, SaslPlainHandler, SaslState, PLAIN};

    #[derive(Debug)]
    struct DenyAll;

    #[async_trait::async_trait]
    impl PlainAuthenticator for DenyAll {
        async fn authenticate(
            &self,
            _identity: &str,
            _credential: &str,
        ) -> Result<Principal, AuthError> {
            Err(AuthError::Fault(String::from("denied")))
        }
    }

    #[test]
    fn test_registry_advertises_in_registration_order() {
        let mut registry = SaslHandlerRegistry::new();
        registry.register(Box::new(SaslPlainHandler::new(Arc::new(DenyAll))));

        let mechanisms = registry.mechanisms();
        assert_eq!(mechanisms.len(), 1);
        assert_eq!(mechanisms[0].as_str(), PLAIN);
    }

    #[test]
    fn test_begin_attempt_clones_template() {
        let mut registry = SaslHandlerRegistry::new();
        registry.register(Box::new(SaslPlainHandler::new(Arc::new(DenyAll))));

        let handler = registry.begin_attempt(PLAIN).unwrap();
        assert_eq!(handler.state(), SaslState::Idle);
        assert!(handler.principal().is_none());

        assert!(registry.begin_attempt("SCRAM-SHA-256").is_none());
    }
}
