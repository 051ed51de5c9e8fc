//! # REST Client Tests
//!
//! Exercises the client against a local wiremock server: request shapes,
//! union decoding, error mapping, and the create-and-wait composition.

use std::time::Duration;

use secrets_manager_client::client::requests::{
    ConfigurationAction, SecretAction, SecretMetadataPatch, SecretPrototype,
    SecretVersionPrototype,
};
use secrets_manager_client::client::responses::{ConfigurationSettings, SecretMaterial};
use secrets_manager_client::client::SecretsManagerClient;
use secrets_manager_client::error::StoreError;
use secrets_manager_client::store::{ConfigurationStore, SecretStore};
use secrets_manager_client::waiter::StateWaiter;
use secrets_manager_client::SecretState;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET_ID: &str = "b49ad24d-81d4-5ebc-b9b9-b0937d1c84d5";

fn client_for(server: &MockServer) -> SecretsManagerClient {
    SecretsManagerClient::with_base_url(server.uri(), "test-token").unwrap()
}

fn secret_body(state: SecretState) -> serde_json::Value {
    json!({
        "id": SECRET_ID,
        "name": "app-token",
        "state": state.code(),
        "state_description": state.as_str(),
        "secret_type": "arbitrary",
        "payload": "s3cret"
    })
}

#[tokio::test]
async fn test_get_secret_sends_bearer_token_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/secrets/{SECRET_ID}")))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(secret_body(SecretState::Active)))
        .expect(1)
        .mount(&server)
        .await;

    let secret = client_for(&server).get_secret(SECRET_ID).await.unwrap();

    assert_eq!(secret.id, SECRET_ID);
    assert_eq!(secret.state_description, SecretState::Active);
    match &secret.material {
        SecretMaterial::Arbitrary { payload, .. } => {
            assert_eq!(payload.as_ref().unwrap().expose(), "s3cret");
        }
        other => panic!("wrong secret kind decoded: {}", other.secret_type()),
    }
}

#[tokio::test]
async fn test_get_secret_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/secrets/{SECRET_ID}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).get_secret(SECRET_ID).await.unwrap_err();

    match err {
        StoreError::NotFound { id } => assert_eq!(id, SECRET_ID),
        other => panic!("expected NotFound, got: {other}"),
    }
}

#[tokio::test]
async fn test_create_secret_posts_discriminated_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/secrets"))
        .and(body_partial_json(json!({
            "secret_type": "arbitrary",
            "name": "app-token",
            "payload": "s3cret"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(secret_body(SecretState::PreActivation)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_secret(&SecretPrototype::arbitrary("app-token", "s3cret"))
        .await
        .unwrap();

    assert_eq!(created.state_description, SecretState::PreActivation);
}

#[tokio::test]
async fn test_api_error_body_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/secrets/{SECRET_ID}")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status_code": 400,
            "trace": "9daee671-916a-4678-850b-10b9110236d5",
            "errors": [{"code": "bad_request", "message": "secret name is invalid"}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).get_secret(SECRET_ID).await.unwrap_err();

    match err {
        StoreError::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("secret name is invalid"));
            assert!(message.contains("bad_request"));
        }
        other => panic!("expected API error, got: {other}"),
    }
}

#[tokio::test]
async fn test_update_secret_metadata_patches() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(format!("/api/v2/secrets/{SECRET_ID}/metadata")))
        .and(body_partial_json(json!({"description": "rotated weekly"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(secret_body(SecretState::Active)))
        .expect(1)
        .mount(&server)
        .await;

    let patch = SecretMetadataPatch {
        description: Some("rotated weekly".to_string()),
        ..Default::default()
    };
    client_for(&server)
        .update_secret_metadata(SECRET_ID, &patch)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_secret_version() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/api/v2/secrets/{SECRET_ID}/versions")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "4a8d2b9e",
            "secret_id": SECRET_ID,
            "payload_available": true
        })))
        .mount(&server)
        .await;

    let version = client_for(&server)
        .create_secret_version(SECRET_ID, &SecretVersionPrototype::default())
        .await
        .unwrap();

    assert_eq!(version.id, "4a8d2b9e");
    assert!(version.payload_available);
}

#[tokio::test]
async fn test_delete_secret_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/v2/secrets/{SECRET_ID}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).delete_secret(SECRET_ID).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_secret_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/v2/secrets/{SECRET_ID}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .delete_secret(SECRET_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_secret_action_posts_discriminant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/api/v2/secrets/{SECRET_ID}/actions")))
        .and(body_partial_json(json!({
            "action_type": "validate_dns_challenge"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .create_secret_action(SECRET_ID, &SecretAction::ValidateDnsChallenge)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_configuration_decodes_by_discriminant() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/configurations/internal-root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "internal-root",
            "config_type": "private_cert_root_ca",
            "common_name": "internal.example.com",
            "max_ttl": "8760h"
        })))
        .mount(&server)
        .await;

    let configuration = client_for(&server)
        .get_configuration("internal-root")
        .await
        .unwrap();

    assert_eq!(configuration.name, "internal-root");
    match &configuration.settings {
        ConfigurationSettings::PrivateCertRootCa { common_name, .. } => {
            assert_eq!(common_name, "internal.example.com");
        }
        _ => panic!("wrong configuration kind decoded"),
    }
}

#[tokio::test]
async fn test_sign_csr_action_returns_certificate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/configurations/internal-root/actions"))
        .and(body_partial_json(json!({"action_type": "sign_csr"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "certificate": "-----BEGIN CERTIFICATE-----",
            "issuing_ca": "-----BEGIN CERTIFICATE-----"
        })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .create_configuration_action(
            "internal-root",
            &ConfigurationAction::SignCsr {
                csr: "-----BEGIN CERTIFICATE REQUEST-----".to_string(),
            },
        )
        .await
        .unwrap();

    assert!(result.certificate.unwrap().starts_with("-----BEGIN"));
}

#[tokio::test]
async fn test_create_secret_and_wait_polls_until_active() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/secrets"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(secret_body(SecretState::PreActivation)),
        )
        .mount(&server)
        .await;
    // first poll still pending, every poll after that active
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/secrets/{SECRET_ID}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(secret_body(SecretState::PreActivation)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/secrets/{SECRET_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(secret_body(SecretState::Active)))
        .mount(&server)
        .await;

    let waiter = StateWaiter::until_active()
        .poll_interval(Duration::from_millis(10))
        .timeout(Duration::from_secs(5));
    let secret = client_for(&server)
        .create_secret_and_wait(&SecretPrototype::arbitrary("app-token", "s3cret"), &waiter)
        .await
        .unwrap();

    assert_eq!(secret.state_description, SecretState::Active);
}
