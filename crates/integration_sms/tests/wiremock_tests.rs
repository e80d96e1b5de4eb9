//! Integration tests for the Twilio client using WireMock

use application::ports::MessageGatewayPort;
use integration_sms::{TwilioSmsClient, TwilioSmsConfig};
use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> TwilioSmsConfig {
    TwilioSmsConfig {
        account_sid: "AC1234567890".to_string(),
        auth_token: "twilio_auth".to_string(),
        from_number: "+15550001111".to_string(),
        webhook_token: None,
    }
}

fn client_against(server: &MockServer) -> TwilioSmsClient {
    TwilioSmsClient::new(test_config())
        .expect("client config is valid")
        .with_base_url(server.uri())
}

#[tokio::test]
async fn send_posts_form_with_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC1234567890/Messages.json"))
        .and(header_exists("authorization"))
        .and(body_string_contains("To=%2B15551234567"))
        .and(body_string_contains("From=%2B15550001111"))
        .and(body_string_contains("Body=hello"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "sid": "SM123",
            "status": "queued"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_against(&server);
    let outcome = client.send_text("+15551234567", "hello").await;

    assert!(outcome.success);
    assert_eq!(outcome.provider_id.as_deref(), Some("SM123"));
    assert_eq!(outcome.status.as_deref(), Some("queued"));
}

#[tokio::test]
async fn api_rejection_becomes_failed_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/AC1234567890/Messages.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": 21211,
            "message": "Invalid 'To' phone number"
        })))
        .mount(&server)
        .await;

    let client = client_against(&server);
    let outcome = client.send_text("bad-number", "hello").await;

    assert!(!outcome.success);
    assert!(outcome.error.unwrap_or_default().contains("21211"));
}

#[tokio::test]
async fn connection_failure_becomes_failed_outcome() {
    let server = MockServer::start().await;
    let client = client_against(&server);
    drop(server);

    let outcome = client.send_text("+15551234567", "hello").await;
    assert!(!outcome.success);
}
