use super::*;

// =============================================================================
// join_url
// =============================================================================

#[test]
fn join_url_inserts_single_slash() {
    assert_eq!(join_url("/api", "/widgets"), "/api/widgets");
    assert_eq!(join_url("/api/", "widgets"), "/api/widgets");
    assert_eq!(join_url("http://ops.local/api/", "/device/list"), "http://ops.local/api/device/list");
}

#[test]
fn join_url_keeps_absolute_paths() {
    assert_eq!(join_url("/api", "https://other.example/x"), "https://other.example/x");
}

#[test]
fn join_url_with_empty_path_returns_base() {
    assert_eq!(join_url("/api", ""), "/api");
    assert_eq!(join_url("", "/"), "/");
}

// =============================================================================
// ApiRequest
// =============================================================================

#[test]
fn new_request_has_no_authorization() {
    let request = ApiRequest::get("/widgets");
    assert_eq!(request.method, Method::GET);
    assert!(request.authorization().is_none());
}

#[test]
fn url_encodes_query_pairs() {
    let request = ApiRequest::get("/device").query("name", "core sw/1").query("page", "2");
    assert_eq!(request.url("/api"), "/api/device?name=core+sw%2F1&page=2");
}

#[test]
fn url_appends_to_existing_query() {
    let request = ApiRequest::get("/device?type=switch").query("page", "2");
    assert_eq!(request.url("/api"), "/api/device?type=switch&page=2");
}

#[test]
fn json_sets_body() {
    let request = ApiRequest::post("/alert").json(&serde_json::json!({ "level": "high" })).unwrap();
    assert_eq!(request.body, Some(serde_json::json!({ "level": "high" })));
}

// =============================================================================
// ApiResponse
// =============================================================================

#[test]
fn response_success_follows_status_class() {
    assert!(ApiResponse::new(StatusCode::OK, "").is_success());
    assert!(ApiResponse::new(StatusCode::NO_CONTENT, "").is_success());
    assert!(!ApiResponse::new(StatusCode::UNAUTHORIZED, "").is_success());
    assert!(!ApiResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "").is_success());
}

#[test]
fn response_json_decodes_body() {
    let response = ApiResponse::new(StatusCode::OK, r#"{"count":3}"#);
    let value: serde_json::Value = response.json().unwrap();
    assert_eq!(value["count"], 3);
}
