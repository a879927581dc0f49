use std::cell::RefCell;

use super::*;
use crate::session::{MemoryStore, Session};

/// Transport that records what was dispatched and answers with a fixed status.
struct FakeTransport {
    status: StatusCode,
    fail_with: Option<TransportError>,
    sent: RefCell<Vec<ApiRequest>>,
}

impl FakeTransport {
    fn answering(status: StatusCode) -> Self {
        Self { status, fail_with: None, sent: RefCell::new(Vec::new()) }
    }

    fn failing(err: TransportError) -> Self {
        Self { status: StatusCode::OK, fail_with: Some(err), sent: RefCell::new(Vec::new()) }
    }

    fn last_authorization(&self) -> Option<String> {
        self.sent.borrow().last().and_then(|r| r.authorization().map(str::to_owned))
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        tokio::task::yield_now().await;
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(ApiResponse::new(self.status, r#"{"ok":true}"#)),
        }
    }
}

fn signed_in_store() -> MemoryStore {
    MemoryStore::with_session(Session::new("abc", Some("alice".to_owned()), Some("admin".to_owned())))
}

// =============================================================================
// request interception
// =============================================================================

#[tokio::test]
async fn token_is_attached_as_bearer() {
    let client = AuthClient::new(FakeTransport::answering(StatusCode::OK), signed_in_store());
    let dispatch = client.execute(ApiRequest::get("/widgets")).await;
    assert!(dispatch.outcome.is_ok());
    assert_eq!(client.transport().last_authorization().as_deref(), Some("Bearer abc"));
}

#[tokio::test]
async fn missing_token_sends_request_unmodified() {
    let client = AuthClient::new(FakeTransport::answering(StatusCode::OK), MemoryStore::new());
    let dispatch = client.execute(ApiRequest::post("/auth/login")).await;
    assert!(dispatch.outcome.is_ok());
    assert!(client.transport().last_authorization().is_none());
}

#[test]
fn empty_token_adds_no_header() {
    let store = MemoryStore::with_session(Session { token: Some(String::new()), ..Session::default() });
    let client = AuthClient::new(FakeTransport::answering(StatusCode::OK), store);
    let request = client.authorize(ApiRequest::get("/widgets"));
    assert!(request.authorization().is_none());
}

#[test]
fn token_with_invalid_header_bytes_is_skipped() {
    let store = MemoryStore::with_session(Session::new("bad\ntoken", None, None));
    let client = AuthClient::new(FakeTransport::answering(StatusCode::OK), store);
    let request = client.authorize(ApiRequest::get("/widgets"));
    assert!(request.authorization().is_none());
}

#[test]
fn stored_token_replaces_caller_authorization() {
    let client = AuthClient::new(FakeTransport::answering(StatusCode::OK), signed_in_store());
    let request = ApiRequest::get("/widgets").header(AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
    let request = client.authorize(request);
    assert_eq!(request.authorization(), Some("Bearer abc"));
}

#[test]
fn attached_header_is_marked_sensitive() {
    let client = AuthClient::new(FakeTransport::answering(StatusCode::OK), signed_in_store());
    let request = client.authorize(ApiRequest::get("/widgets"));
    assert!(request.headers.get(AUTHORIZATION).is_some_and(HeaderValue::is_sensitive));
}

// =============================================================================
// response interception
// =============================================================================

#[tokio::test]
async fn unauthorized_clears_session_and_raises_effect() {
    let client = AuthClient::new(FakeTransport::answering(StatusCode::UNAUTHORIZED), signed_in_store());
    let dispatch = client.execute(ApiRequest::get("/widgets")).await;

    assert_eq!(dispatch.expired, Some(SessionExpired { path: "/widgets".to_owned() }));
    assert!(client.store().get().is_empty());
    let err = dispatch.outcome.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn unauthorized_failure_reaches_caller_unchanged() {
    let client = AuthClient::new(FakeTransport::answering(StatusCode::UNAUTHORIZED), signed_in_store());
    match client.send(ApiRequest::get("/widgets")).await {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, r#"{"ok":true}"#);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn forbidden_passes_through_without_clearing() {
    let client = AuthClient::new(FakeTransport::answering(StatusCode::FORBIDDEN), signed_in_store());
    let dispatch = client.execute(ApiRequest::get("/widgets")).await;
    assert!(!dispatch.is_expired());
    assert_eq!(dispatch.outcome.unwrap_err().status(), Some(StatusCode::FORBIDDEN));
    assert!(client.store().get().is_authenticated());
}

#[tokio::test]
async fn server_error_passes_through() {
    let client = AuthClient::new(FakeTransport::answering(StatusCode::INTERNAL_SERVER_ERROR), signed_in_store());
    let dispatch = client.execute(ApiRequest::get("/widgets")).await;
    assert!(!dispatch.is_expired());
    assert!(client.store().get().is_authenticated());
}

#[tokio::test]
async fn timeout_is_not_an_authorization_failure() {
    let client = AuthClient::new(FakeTransport::failing(TransportError::Timeout), signed_in_store());
    let dispatch = client.execute(ApiRequest::get("/widgets")).await;
    assert!(!dispatch.is_expired());
    assert!(matches!(dispatch.outcome, Err(ClientError::Transport(TransportError::Timeout))));
    assert!(client.store().get().is_authenticated());
}

#[tokio::test]
async fn send_json_decodes_success_body() {
    let client = AuthClient::new(FakeTransport::answering(StatusCode::OK), signed_in_store());
    let value: serde_json::Value = client.send_json(ApiRequest::get("/widgets")).await.unwrap();
    assert_eq!(value["ok"], true);
}

// =============================================================================
// concurrent expiry
// =============================================================================

#[tokio::test]
async fn concurrent_unauthorized_responses_each_raise_effect() {
    let client = AuthClient::new(FakeTransport::answering(StatusCode::UNAUTHORIZED), signed_in_store());
    let (a, b, c) = tokio::join!(
        client.execute(ApiRequest::get("/device")),
        client.execute(ApiRequest::get("/alert")),
        client.execute(ApiRequest::get("/report")),
    );

    for dispatch in [a, b, c] {
        assert!(dispatch.is_expired());
        assert!(dispatch.outcome.is_err());
    }
    assert!(client.store().get().is_empty());
    // Every request was dispatched with the credential that was valid at send time.
    let sent = client.transport().sent.borrow();
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|r| r.authorization() == Some("Bearer abc")));
}
