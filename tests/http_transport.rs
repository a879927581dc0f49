//! End-to-end checks of the reqwest transport against a local axum backend.

#![cfg(feature = "native")]

use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use netops_session::net::HttpTransport;
use netops_session::{
    ApiRequest, ClientError, ConsoleView, Credentials, FileStore, HistoryNavigator, Navigator, NoticeLog, RouteTable,
    Session, SessionConfig, SessionConsole, SessionStore, Transport, TransportError,
};
use serde_json::{Value, json};

type Console = SessionConsole<HttpTransport, FileStore, HistoryNavigator, NoticeLog>;

async fn echo_authorization(headers: HeaderMap) -> Json<Value> {
    let auth = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()).map(str::to_owned);
    Json(json!({ "authorization": auth }))
}

async fn login(Json(body): Json<Value>) -> Json<Value> {
    if body["password"] == "secret" {
        Json(json!({
            "code": 200,
            "msg": "ok",
            "data": { "token": "jwt-live", "user": { "id": 1, "username": body["username"], "role": "admin" } }
        }))
    } else {
        Json(json!({ "code": 500, "msg": "wrong username or password", "data": null }))
    }
}

/// Start the fixture backend and return its API base URL.
async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/widgets", get(echo_authorization))
        .route("/api/expired", get(|| async { StatusCode::UNAUTHORIZED }))
        .route("/api/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route(
            "/api/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                "late"
            }),
        )
        .route("/api/auth/login", post(login));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn console(config: SessionConfig, store: FileStore, at: &str) -> Console {
    SessionConsole::new(
        config.clone(),
        HttpTransport::new(&config),
        store,
        RouteTable::<ConsoleView>::standard(&config),
        HistoryNavigator::starting_at(at),
        NoticeLog::new(),
    )
}

// =============================================================================
// credential injection
// =============================================================================

#[tokio::test]
async fn bearer_header_reaches_server() {
    let base = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("session.json"));
    store.set(Session::new("abc", Some("alice".to_owned()), None)).unwrap();
    let console = console(SessionConfig::default().with_api_base_url(base), store, "/device");

    let body: Value = console.request_json(ApiRequest::get("/widgets")).await.unwrap();

    assert_eq!(body["authorization"], "Bearer abc");
}

#[tokio::test]
async fn no_header_without_session() {
    let base = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let console = console(
        SessionConfig::default().with_api_base_url(base),
        FileStore::open(dir.path().join("session.json")),
        "/login",
    );

    let body: Value = console.request_json(ApiRequest::get("/widgets")).await.unwrap();

    assert!(body["authorization"].is_null());
}

// =============================================================================
// expiry
// =============================================================================

#[tokio::test]
async fn unauthorized_erases_persisted_session() {
    let base = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = FileStore::open(&path);
    store.set(Session::new("abc", None, None)).unwrap();
    let console = console(SessionConfig::default().with_api_base_url(base), store, "/device");

    let err = console.request(ApiRequest::get("/expired")).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(console.session().is_empty());
    assert!(FileStore::open(&path).get().is_empty());
    assert_eq!(console.navigator().current_path().as_deref(), Some("/login?redirect=%2Fdevice"));
    assert_eq!(console.notifier().notices().len(), 1);
}

#[tokio::test]
async fn server_error_keeps_session() {
    let base = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("session.json"));
    store.set(Session::new("abc", None, None)).unwrap();
    let console = console(SessionConfig::default().with_api_base_url(base), store, "/device");

    let err = console.request(ApiRequest::get("/broken")).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(console.session().is_authenticated());
}

// =============================================================================
// transport failures
// =============================================================================

#[tokio::test]
async fn slow_response_times_out_without_clearing() {
    let base = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("session.json"));
    store.set(Session::new("abc", None, None)).unwrap();
    let config = SessionConfig::default()
        .with_api_base_url(base)
        .with_request_timeout(Duration::from_millis(100));
    let console = console(config, store, "/device");

    let err = console.request(ApiRequest::get("/slow")).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(TransportError::Timeout)));
    assert!(console.session().is_authenticated());
    assert!(console.notifier().notices().is_empty());
}

#[tokio::test]
async fn relative_base_url_is_rejected_natively() {
    let transport = HttpTransport::new(&SessionConfig::default());
    let err = transport.send(ApiRequest::get("/widgets")).await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidUrl(_)));
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let config = SessionConfig::default().with_api_base_url(format!("http://{addr}/api"));

    let err = HttpTransport::new(&config).send(ApiRequest::get("/widgets")).await.unwrap_err();

    assert!(matches!(err, TransportError::Connect(_)));
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_persists_session_and_resumes() {
    let base = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let console = console(
        SessionConfig::default().with_api_base_url(base),
        FileStore::open(&path),
        "/login?redirect=%2Ftopology",
    );

    let session = console.login(&Credentials::new("alice", "secret")).await.unwrap();

    assert_eq!(session.token(), Some("jwt-live"));
    assert_eq!(FileStore::open(&path).get(), session);
    assert_eq!(console.navigator().current_path().as_deref(), Some("/topology"));
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let base = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let console = console(
        SessionConfig::default().with_api_base_url(base),
        FileStore::open(dir.path().join("session.json")),
        "/login",
    );

    let err = console.login(&Credentials::new("alice", "guess")).await.unwrap_err();

    assert!(matches!(err, ClientError::Rejected { code: 500, .. }));
    assert!(console.session().is_empty());
}
