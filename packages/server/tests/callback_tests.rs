//! HTTP behavior of the webhook and health endpoints.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use bot_core::kernel::TestMessenger;
use bot_core::server::build_app;
use common::*;
use tower::ServiceExt;

fn text_event(reply_token: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "message",
        "replyToken": reply_token,
        "timestamp": 1700000000000i64,
        "source": {"type": "user", "userId": "U1234"},
        "message": {"type": "text", "id": "m-1", "text": text}
    })
}

fn payload(events: Vec<serde_json::Value>) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({"destination": "U0", "events": events})).unwrap()
}

fn callback(body: Vec<u8>, signature: Option<&str>) -> Request<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri("/callback")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        request = request.header("X-Line-Signature", signature);
    }
    request.body(Body::from(body)).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn signed_text_message_gets_search_reply() {
    let messenger = TestMessenger::new(CHANNEL_SECRET);
    let app = build_app(test_deps(&messenger, sample_index()));
    let body = payload(vec![text_event("r-1", "雙年展")]);
    let signature = messenger.sign(&body);

    let response = app.oneshot(callback(body, Some(&signature))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
    let replies = messenger.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].reply_token, "r-1");
    assert!(replies[0].text.starts_with("《臺北雙年展》"));
    assert!(replies[0].text.contains("📍 地址：10461臺北市中山區中山北路三段181號"));
}

#[tokio::test]
async fn unknown_keyword_gets_no_results_reply() {
    let messenger = TestMessenger::new(CHANNEL_SECRET);
    let app = build_app(test_deps(&messenger, sample_index()));
    let body = payload(vec![text_event("r-1", "雕塑")]);
    let signature = messenger.sign(&body);

    let response = app.oneshot(callback(body, Some(&signature))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        messenger.replies()[0].text,
        "找不到符合的展覽，可以試試其他關鍵字～"
    );
}

#[tokio::test]
async fn missing_signature_is_rejected() {
    let messenger = TestMessenger::new(CHANNEL_SECRET);
    let app = build_app(test_deps(&messenger, sample_index()));

    let response = app
        .oneshot(callback(payload(vec![text_event("r-1", "雙年展")]), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(messenger.replies().is_empty());
}

#[tokio::test]
async fn wrong_signature_is_rejected() {
    let messenger = TestMessenger::new(CHANNEL_SECRET);
    let impostor = TestMessenger::new("someone-else");
    let app = build_app(test_deps(&messenger, sample_index()));
    let body = payload(vec![text_event("r-1", "雙年展")]);
    let signature = impostor.sign(&body);

    let response = app.oneshot(callback(body, Some(&signature))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Invalid signature");
    assert!(messenger.replies().is_empty());
}

#[tokio::test]
async fn signed_garbage_is_rejected() {
    let messenger = TestMessenger::new(CHANNEL_SECRET);
    let app = build_app(test_deps(&messenger, sample_index()));
    let body = b"{not json".to_vec();
    let signature = messenger.sign(&body);

    let response = app.oneshot(callback(body, Some(&signature))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Malformed payload");
}

#[tokio::test]
async fn non_text_events_are_ignored() {
    let messenger = TestMessenger::new(CHANNEL_SECRET);
    let app = build_app(test_deps(&messenger, sample_index()));
    let body = payload(vec![
        serde_json::json!({"type": "follow", "replyToken": "r-0"}),
        serde_json::json!({
            "type": "message",
            "replyToken": "r-1",
            "message": {"type": "sticker", "id": "m-1", "packageId": "1", "stickerId": "1"}
        }),
        text_event("r-2", "兒童"),
    ]);
    let signature = messenger.sign(&body);

    let response = app.oneshot(callback(body, Some(&signature))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let replies = messenger.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].reply_token, "r-2");
}

#[tokio::test]
async fn reply_failure_still_acknowledges_delivery() {
    let messenger = TestMessenger::new(CHANNEL_SECRET).failing_replies();
    let app = build_app(test_deps(&messenger, sample_index()));
    let body = payload(vec![text_event("r-1", "雙年展")]);
    let signature = messenger.sign(&body);

    let response = app.oneshot(callback(body, Some(&signature))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(messenger.replies().is_empty());
}

#[tokio::test]
async fn health_reports_exhibition_count() {
    let messenger = TestMessenger::new(CHANNEL_SECRET);
    let app = build_app(test_deps(&messenger, sample_index()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["exhibitions"], 3);
}
