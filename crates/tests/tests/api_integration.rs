use std::time::Duration;

use admissions_api::{build_app, ApiConfig};
use admissions_core::responder::{FALLBACK_REPLY, GREETING_REPLY};
use admissions_tests::{chat_request, send, static_root, test_app};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};

async fn chat(message: Value) -> Value {
    let (status, body) = send(test_app(), chat_request(message.to_string()))
        .await
        .expect("chat request should succeed");
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).expect("chat reply should be json")
}

#[tokio::test]
async fn health_reports_catalog() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(), request).await.unwrap();

    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["catalog_size"], 7);
    assert!(parsed.get("metrics").is_some());
}

#[tokio::test]
async fn greeting_is_case_and_space_insensitive() {
    for message in ["hi", "Hi", "hi ", "START"] {
        let reply = chat(json!({ "message": message })).await;
        assert_eq!(reply["reply"], GREETING_REPLY, "{message:?}");
        assert_eq!(reply["intent"], "greeting");
    }
}

#[tokio::test]
async fn grade_submission_lists_qualifying_courses() {
    let reply = chat(json!({ "message": "I got a B+ in school" })).await;

    assert_eq!(reply["intent"], "grade_submission");
    assert_eq!(reply["grade"], "B+");
    let text = reply["reply"].as_str().unwrap();
    assert!(text.contains("• Computer Science\n"));
    assert!(text.contains("• Diploma in IT\n"));
    assert!(!text.contains("Actuarial Science"));
}

#[tokio::test]
async fn course_name_returns_details() {
    let reply = chat(json!({ "message": "Bachelor of Commerce" })).await;

    assert_eq!(reply["intent"], "course_inquiry");
    let text = reply["reply"].as_str().unwrap();
    assert!(text.contains("Strathmore Business School"));
    assert!(text.contains("Department of Commerce"));
    assert!(text.contains("Minimum Grade Required: C+"));
}

#[tokio::test]
async fn missing_or_broken_messages_fall_back() {
    for body in [json!({}), json!({ "message": "" }), json!({ "message": 42 })] {
        let reply = chat(body).await;
        assert_eq!(reply["reply"], FALLBACK_REPLY);
        assert_eq!(reply["intent"], "unrecognized");
    }

    let (status, body) = send(test_app(), chat_request("not json")).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["reply"], FALLBACK_REPLY);
}

#[tokio::test]
async fn landing_favicon_and_chat_page() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(), request).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/chatbot"));

    let request = Request::builder().uri("/favicon.ico").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(), request).await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let request = Request::builder().uri("/chatbot").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(), request).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/chat"));
}

#[tokio::test]
async fn chat_page_is_missing_without_static_root() {
    let app = build_app(&ApiConfig::default().with_static_root(static_root().join("missing")));
    let request = Request::builder().uri("/chatbot").body(Body::empty()).unwrap();
    let (status, _) = send(app, request).await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_is_rate_limited_per_ip() {
    let config = ApiConfig {
        rate_limit_window: Duration::from_secs(60),
        rate_limit_max: 2,
        ..ApiConfig::default().with_static_root(static_root())
    };
    let app = build_app(&config);

    let limited = |ip: &str| {
        let mut request = chat_request(json!({ "message": "hi" }).to_string());
        request
            .headers_mut()
            .insert("x-forwarded-for", ip.parse().unwrap());
        request
    };

    for _ in 0..2 {
        let (status, _) = send(app.clone(), limited("198.51.100.4")).await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }
    let response = tower::ServiceExt::oneshot(app.clone(), limited("198.51.100.4"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    let (status, body) = send(app.clone(), limited("198.51.100.4")).await.unwrap();
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body.contains("rate_limited"));

    let (status, _) = send(app.clone(), limited("198.51.100.5")).await.unwrap();
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, _) = send(app, request).await.unwrap();
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = test_app();
    let response = tower::ServiceExt::oneshot(app, chat_request(json!({ "message": "1" }).to_string()))
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn oversized_chat_body_is_rejected() {
    let body = json!({ "message": "x".repeat(20 * 1024) }).to_string();

    // No content-length: the limit trips while the body is being read.
    let (status, text) = send(test_app(), chat_request(body.clone())).await.unwrap();
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(!text.contains(FALLBACK_REPLY));

    let mut request = chat_request(body.clone());
    request
        .headers_mut()
        .insert("content-length", body.len().to_string().parse().unwrap());
    let (status, _) = send(test_app(), request).await.unwrap();
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
