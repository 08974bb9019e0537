//! SASL PLAIN handshake flows driven through mock collaborators

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use goethite_amqp::auth::{AuthError, PlainAuthenticator, Principal};
use goethite_amqp::sasl::{
    Error, SaslFrame, SaslHandler, SaslHandlerRegistry, SaslNegotiator, SaslPlainHandler,
    SaslState, PLAIN,
};
use goethite_amqp::types::primitives::Symbol;
use goethite_amqp::types::sasl::{SaslChallenge, SaslCode, SaslInit};

#[derive(Debug, Default)]
struct MockNegotiator {
    completions: Mutex<Vec<(SaslCode, Option<String>)>>,
    frames: Mutex<Vec<(SaslFrame, bool)>>,
}

impl SaslNegotiator for MockNegotiator {
    fn write_frame(&self, frame: SaslFrame, needs_reply: bool) {
        self.frames.lock().push((frame, needs_reply));
    }

    fn complete_negotiation(&self, code: SaslCode, detail: Option<Error>) {
        self.completions
            .lock()
            .push((code, detail.map(|err| err.to_string())));
    }
}

#[derive(Debug, Default)]
struct MapAuthenticator {
    users: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MapAuthenticator {
    fn with_user(mut self, identity: &str, credential: &str) -> Self {
        self.users
            .insert(String::from(identity), String::from(credential));
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlainAuthenticator for MapAuthenticator {
    async fn authenticate(
        &self,
        identity: &str,
        credential: &str,
    ) -> Result<Principal, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.users.get(identity) {
            Some(expected) if expected == credential => Ok(Principal::new(identity)),
            _ => Err(AuthError::Fault(String::from(
                "identity store rejected the credential",
            ))),
        }
    }
}

#[derive(Debug)]
struct CancelingAuthenticator;

#[async_trait]
impl PlainAuthenticator for CancelingAuthenticator {
    async fn authenticate(
        &self,
        _identity: &str,
        _credential: &str,
    ) -> Result<Principal, AuthError> {
        Err(AuthError::Canceled)
    }
}

fn server_init(message: &[u8]) -> SaslInit {
    SaslInit {
        mechanism: Symbol::from(PLAIN),
        initial_response: Some(message.to_vec()),
        hostname: None,
    }
}

#[tokio::test]
async fn client_start_writes_init_frame() {
    let negotiator = MockNegotiator::default();
    let mut handler = SaslPlainHandler::client("alice", "secret").with_authorization_identity("az");

    let init = SaslInit {
        mechanism: handler.mechanism(),
        initial_response: None,
        hostname: Some(String::from("example.com")),
    };
    handler.on_start(init, &negotiator, true).await.unwrap();

    assert_eq!(handler.state(), SaslState::Started);
    assert!(negotiator.completions.lock().is_empty());

    let frames = negotiator.frames.lock();
    assert_eq!(frames.len(), 1);
    let (frame, needs_reply) = &frames[0];
    assert!(*needs_reply);
    match frame {
        SaslFrame::Init(init) => {
            assert_eq!(init.mechanism.as_str(), PLAIN);
            assert_eq!(init.initial_response.as_deref(), Some(&b"az\0alice\0secret"[..]));
            assert_eq!(init.hostname.as_deref(), Some("example.com"));
        }
        frame => panic!("unexpected frame {frame:?}"),
    }
}

#[tokio::test]
async fn server_accepts_valid_credential() {
    let authenticator = Arc::new(MapAuthenticator::default().with_user("alice", "secret"));
    let negotiator = MockNegotiator::default();
    let mut handler = SaslPlainHandler::new(authenticator.clone());

    handler
        .on_start(server_init(b"az\0alice\0secret"), &negotiator, false)
        .await
        .unwrap();

    assert_eq!(handler.state(), SaslState::Completed);
    assert_eq!(handler.authorization_identity(), Some("az"));
    assert_eq!(handler.authentication_identity(), Some("alice"));
    assert_eq!(handler.principal(), Some(&Principal::new("alice")));
    assert_eq!(authenticator.calls(), 1);

    let completions = negotiator.completions.lock();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0], (SaslCode::Ok, None));
}

#[tokio::test]
async fn server_reports_fault_as_system_error() {
    let authenticator = Arc::new(MapAuthenticator::default().with_user("alice", "secret"));
    let negotiator = MockNegotiator::default();
    let mut handler = SaslPlainHandler::new(authenticator.clone());

    handler
        .on_start(server_init(b"\0alice\0wrong"), &negotiator, false)
        .await
        .unwrap();

    assert_eq!(handler.state(), SaslState::Completed);
    assert!(handler.principal().is_none());

    let completions = negotiator.completions.lock();
    assert_eq!(completions.len(), 1);
    let (code, detail) = &completions[0];
    assert_eq!(*code, SaslCode::Sys);
    assert!(detail
        .as_deref()
        .unwrap()
        .contains("identity store rejected the credential"));
}

#[tokio::test]
async fn server_reports_cancellation_as_system_error() {
    let negotiator = MockNegotiator::default();
    let mut handler = SaslPlainHandler::new(Arc::new(CancelingAuthenticator));

    handler
        .on_start(server_init(b"\0alice\0secret"), &negotiator, false)
        .await
        .unwrap();

    let completions = negotiator.completions.lock();
    assert_eq!(completions.len(), 1);
    let (code, detail) = &completions[0];
    assert_eq!(*code, SaslCode::Sys);
    assert!(detail.as_deref().unwrap().contains("canceled"));
}

#[tokio::test]
async fn server_rejects_message_without_separators() {
    let authenticator = Arc::new(MapAuthenticator::default().with_user("alice", "secret"));
    let negotiator = MockNegotiator::default();
    let mut handler = SaslPlainHandler::new(authenticator.clone());

    let result = handler
        .on_start(server_init(b"onlyonepart"), &negotiator, false)
        .await;

    assert!(matches!(result, Err(Error::MalformedCredential)));
    // failed fast: the authenticator was never consulted and the attempt
    // produced no completion of its own
    assert_eq!(authenticator.calls(), 0);
    assert!(negotiator.completions.lock().is_empty());
}

#[tokio::test]
async fn server_rejects_empty_authentication_identity() {
    let authenticator = Arc::new(MapAuthenticator::default().with_user("alice", "secret"));
    let negotiator = MockNegotiator::default();
    let mut handler = SaslPlainHandler::new(authenticator.clone());

    let result = handler
        .on_start(server_init(b"\0\0secret"), &negotiator, false)
        .await;

    assert!(matches!(result, Err(Error::MalformedCredential)));
    assert_eq!(authenticator.calls(), 0);
}

#[tokio::test]
async fn server_rejects_absent_initial_response() {
    let authenticator = Arc::new(MapAuthenticator::default().with_user("alice", "secret"));
    let negotiator = MockNegotiator::default();
    let mut handler = SaslPlainHandler::new(authenticator.clone());

    let init = SaslInit {
        mechanism: Symbol::from(PLAIN),
        initial_response: None,
        hostname: None,
    };
    let result = handler.on_start(init, &negotiator, false).await;

    assert!(matches!(result, Err(Error::MalformedCredential)));
    assert_eq!(authenticator.calls(), 0);
}

#[tokio::test]
async fn second_start_on_same_handler_is_rejected() {
    let authenticator = Arc::new(MapAuthenticator::default().with_user("alice", "secret"));
    let negotiator = MockNegotiator::default();
    let mut handler = SaslPlainHandler::new(authenticator);

    handler
        .on_start(server_init(b"\0alice\0secret"), &negotiator, false)
        .await
        .unwrap();
    let result = handler
        .on_start(server_init(b"\0alice\0secret"), &negotiator, false)
        .await;

    assert!(matches!(result, Err(Error::IllegalState { .. })));
    // the completion of the first attempt remains the only one
    assert_eq!(negotiator.completions.lock().len(), 1);
}

#[tokio::test]
async fn challenge_is_unsupported() {
    let negotiator = MockNegotiator::default();
    let mut handler = SaslPlainHandler::client("alice", "secret");

    let challenge = SaslChallenge {
        challenge: b"nonce".to_vec(),
    };
    let result = handler.on_challenge(challenge, &negotiator).await;
    assert!(matches!(result, Err(Error::UnsupportedOperation(_))));
}

#[tokio::test]
async fn clones_negotiate_in_isolation() {
    let authenticator = Arc::new(
        MapAuthenticator::default()
            .with_user("alice", "secret")
            .with_user("bob", "hunter2"),
    );

    let mut registry = SaslHandlerRegistry::new();
    registry.register(Box::new(SaslPlainHandler::new(authenticator.clone())));

    let mut first = registry.begin_attempt(PLAIN).unwrap();
    let mut second = registry.begin_attempt(PLAIN).unwrap();
    let first_negotiator = MockNegotiator::default();
    let second_negotiator = MockNegotiator::default();

    let (first_result, second_result) = tokio::join!(
        first.on_start(server_init(b"\0alice\0secret"), &first_negotiator, false),
        second.on_start(server_init(b"\0bob\0hunter2"), &second_negotiator, false),
    );
    first_result.unwrap();
    second_result.unwrap();

    assert_eq!(first.principal(), Some(&Principal::new("alice")));
    assert_eq!(second.principal(), Some(&Principal::new("bob")));
    assert_eq!(authenticator.calls(), 2);

    assert_eq!(first_negotiator.completions.lock().len(), 1);
    assert_eq!(second_negotiator.completions.lock().len(), 1);
    assert_eq!(first_negotiator.completions.lock()[0].0, SaslCode::Ok);
    assert_eq!(second_negotiator.completions.lock()[0].0, SaslCode::Ok);
}
