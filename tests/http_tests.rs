// HTTP API tests driven through tower's oneshot

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;
use voxmeter::config::{AgentConfig, VapiConfig};
use voxmeter::{create_router, AppState, Provider};

fn test_state(public_key: &str, assistant_id: &str) -> AppState {
    AppState::new(
        VapiConfig {
            public_key: public_key.to_string(),
            assistant_id: assistant_id.to_string(),
        },
        AgentConfig {
            provider: Provider::Scripted,
            voice_id: voxmeter::default_voice().id.to_string(),
        },
    )
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let router = create_router(test_state("", ""));

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_voices_catalog() {
    let router = create_router(test_state("", ""));

    let response = router
        .oneshot(Request::get("/voices").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Charlie"));
    assert!(body.contains("Q0HZwrR1H2SmRvd5cX3U"));
}

#[tokio::test]
async fn test_status_without_session_is_404() {
    let router = create_router(test_state("pk", "asst"));

    let response = router
        .oneshot(Request::get("/session/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_latency_without_session_is_inactive() {
    let router = create_router(test_state("pk", "asst"));

    let response = router
        .oneshot(Request::get("/session/latency").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["state"], "inactive");
}

#[tokio::test]
async fn test_start_with_missing_credential_is_400() {
    let router = create_router(test_state("", "asst_configured"));

    let response = router
        .oneshot(
            Request::post("/session/start")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_string(response).await;
    assert!(body.contains("public key"));
}

#[tokio::test]
async fn test_start_with_missing_assistant_id_names_it() {
    let router = create_router(test_state("pk_configured", ""));

    let response = router
        .oneshot(
            Request::post("/session/start")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_string(response).await;
    assert!(body.contains("assistant ID"));
}

#[tokio::test]
async fn test_start_with_unknown_voice_is_400() {
    let router = create_router(test_state("pk", "asst"));

    let response = router
        .oneshot(
            Request::post("/session/start")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"voice_id":"not-a-voice"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_string(response).await;
    assert!(body.contains("unknown voice"));
}

#[tokio::test]
async fn test_stop_without_session_is_404() {
    let router = create_router(test_state("pk", "asst"));

    let response = router
        .oneshot(Request::post("/session/stop").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_second_start_is_conflict_until_stopped() {
    let state = test_state("pk", "asst");

    let response = create_router(state.clone())
        .oneshot(
            Request::post("/session/start")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Immediately after start the session may still be connecting; the
    // slot is occupied either way, so a second start must not displace it
    let response = create_router(state.clone())
        .oneshot(
            Request::post("/session/start")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_string(response).await;
    assert!(body.contains("already active"));

    let response = create_router(state.clone())
        .oneshot(Request::post("/session/stop").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // With the slot cleared a new session can start
    let response = create_router(state)
        .oneshot(
            Request::post("/session/start")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_start_then_status_and_stop() {
    let state = test_state("pk", "asst");

    let response = create_router(state.clone())
        .oneshot(
            Request::post("/session/start")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = create_router(state.clone())
        .oneshot(Request::get("/session/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(body["session_id"].as_str().unwrap().starts_with("call-"));

    let response = create_router(state)
        .oneshot(Request::post("/session/stop").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("stopped"));
}
