//! Web API Send Tests
//!
//! Integration tests for POST /send-email.

mod common;

use axum::http::StatusCode;
use common::{create_test_server, create_test_server_with, test_config, RecordingFactory, SCRIPTED_FAILURE};
use mail_relay::Provider;
use serde_json::{json, Value};

#[tokio::test]
async fn test_send_email_success() {
    let factory = RecordingFactory::new();
    let server = create_test_server(&factory);

    let response = server
        .post("/send-email")
        .json(&json!({
            "to": "ada@example.com",
            "subject": "Hello",
            "text": "Plain body",
            "html": "<p>HTML body</p>"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Email sent successfully");
    assert_eq!(body["messageId"], "<1@relay.test>");
    assert_eq!(body["response"], "250 2.0.0 OK queued");

    assert_eq!(factory.created(), 1);
    assert_eq!(factory.providers(), vec![Provider::Gmail]);

    let sent = factory.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.com");
    assert_eq!(sent[0].text.as_deref(), Some("Plain body"));
    assert_eq!(sent[0].html.as_deref(), Some("<p>HTML body</p>"));
    assert!(sent[0].from.is_none());
}

#[tokio::test]
async fn test_send_email_selects_provider() {
    let factory = RecordingFactory::new();
    let server = create_test_server(&factory);

    for service in ["outlook", "smtp", "unknown-service", "OUTLOOK"] {
        server
            .post("/send-email")
            .json(&json!({
                "to": "ada@example.com",
                "subject": "Hello",
                "text": "Body",
                "service": service
            }))
            .await
            .assert_status_ok();
    }

    assert_eq!(
        factory.providers(),
        vec![Provider::Outlook, Provider::Smtp, Provider::Gmail, Provider::Gmail]
    );
}

#[tokio::test]
async fn test_send_email_passes_sender() {
    let factory = RecordingFactory::new();
    let server = create_test_server(&factory);

    server
        .post("/send-email")
        .json(&json!({
            "to": "ada@example.com",
            "from": "noreply@example.org",
            "subject": "Hello",
            "html": "<b>hi</b>"
        }))
        .await
        .assert_status_ok();

    assert_eq!(factory.sent()[0].from.as_deref(), Some("noreply@example.org"));
}

#[tokio::test]
async fn test_send_email_missing_body() {
    let factory = RecordingFactory::new();
    let server = create_test_server(&factory);

    let response = server
        .post("/send-email")
        .json(&json!({"to": "ada@example.com", "subject": "Hello"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Missing required fields: to, subject, and text or html"
    );
    assert_eq!(factory.created(), 0);
}

#[tokio::test]
async fn test_send_email_null_fields_are_missing() {
    let factory = RecordingFactory::new();
    let server = create_test_server(&factory);

    let response = server
        .post("/send-email")
        .json(&json!({"to": null, "subject": "Hello", "text": "Body"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(factory.created(), 0);
}

#[tokio::test]
async fn test_send_email_invalid_recipient() {
    let factory = RecordingFactory::new();
    let server = create_test_server(&factory);

    let response = server
        .post("/send-email")
        .json(&json!({"to": "not-an-email", "subject": "Hello", "text": "Body"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid recipient email address");
    assert_eq!(factory.created(), 0);
}

#[tokio::test]
async fn test_send_email_invalid_sender() {
    let factory = RecordingFactory::new();
    let server = create_test_server(&factory);

    let response = server
        .post("/send-email")
        .json(&json!({
            "to": "ada@example.com",
            "from": "a@b",
            "subject": "Hello",
            "text": "Body"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid sender email address");
    assert_eq!(factory.created(), 0);
}

#[tokio::test]
async fn test_send_email_with_attachments() {
    let factory = RecordingFactory::new();
    let server = create_test_server(&factory);

    server
        .post("/send-email")
        .json(&json!({
            "to": "ada@example.com",
            "subject": "Report",
            "text": "See attached",
            "attachments": [
                {"filename": "report.csv", "content": "a,b\n1,2\n"},
                {"filename": "logo.png", "content": "iVBORw0KGgo=", "encoding": "base64"}
            ]
        }))
        .await
        .assert_status_ok();

    let sent = factory.sent();
    let attachments = &sent[0].attachments;
    assert_eq!(attachments.len(), 2);
    assert_eq!(attachments[0].filename, "report.csv");
    assert_eq!(attachments[0].content, b"a,b\n1,2\n");
    assert_eq!(attachments[1].content[..4], [0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_send_email_bad_attachment() {
    let factory = RecordingFactory::new();
    let server = create_test_server(&factory);

    let response = server
        .post("/send-email")
        .json(&json!({
            "to": "ada@example.com",
            "subject": "Report",
            "text": "See attached",
            "attachments": [{"filename": "x.bin", "content": "@@@", "encoding": "base64"}]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid attachment: x.bin"));
    assert_eq!(factory.created(), 0);
}

#[tokio::test]
async fn test_send_email_transport_failure() {
    let factory = RecordingFactory::failing_on(&[1]);
    let server = create_test_server(&factory);

    let response = server
        .post("/send-email")
        .json(&json!({"to": "ada@example.com", "subject": "Hello", "text": "Body"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to send email");
    assert_eq!(body["details"], SCRIPTED_FAILURE);
}

#[tokio::test]
async fn test_send_email_transport_failure_redacted() {
    let factory = RecordingFactory::failing_on(&[1]);
    let mut config = test_config();
    config.mail.expose_transport_errors = false;
    let server = create_test_server_with(&factory, &config);

    let response = server
        .post("/send-email")
        .json(&json!({"to": "ada@example.com", "subject": "Hello", "text": "Body"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to send email");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_send_email_transport_creation_failure() {
    let factory = RecordingFactory::broken();
    let server = create_test_server(&factory);

    let response = server
        .post("/send-email")
        .json(&json!({"to": "ada@example.com", "subject": "Hello", "text": "Body"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(factory.sent().is_empty());
}

#[tokio::test]
async fn test_send_email_invalid_json() {
    let factory = RecordingFactory::new();
    let server = create_test_server(&factory);

    let response = server
        .post("/send-email")
        .content_type("application/json")
        .bytes("{\"to\": ".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON body:"));
    assert_eq!(factory.created(), 0);
}

#[tokio::test]
async fn test_send_email_wrong_content_type() {
    let factory = RecordingFactory::new();
    let server = create_test_server(&factory);

    let response = server
        .post("/send-email")
        .text("to=ada@example.com")
        .await;

    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON body:"));
    assert_eq!(factory.created(), 0);
}

#[tokio::test]
async fn test_send_email_body_too_large() {
    let factory = RecordingFactory::new();
    let server = create_test_server(&factory);
    let text = "x".repeat(3 * 1024 * 1024);

    let response = server
        .post("/send-email")
        .json(&json!({"to": "ada@example.com", "subject": "Hello", "text": text}))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(factory.created(), 0);
}
