//! SASL mechanism errors

use goethite_amqp_types::primitives::Symbol;

use crate::auth::AuthError;
use crate::sasl::SaslState;

/// SASL mechanism error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The SASL message failed structural validation
    #[error("Invalid user name or password")]
    MalformedCredential,

    /// The mechanism does not support mid-handshake rounds
    #[error("Mechanism {0} does not support a challenge-response exchange")]
    UnsupportedOperation(Symbol),

    /// A hook was invoked in the wrong handshake state
    #[error("Expected handshake state {expected:?} but found {found:?}")]
    IllegalState {
        /// State the hook requires
        expected: SaslState,
        /// State the handler was in
        found: SaslState,
    },

    /// Server-side negotiation requires an authenticator
    #[error("No authenticator is configured")]
    MissingAuthenticator,

    /// The verification step failed or was canceled
    #[error(transparent)]
    Authentication(#[from] AuthError),
}
