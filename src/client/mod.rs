//! # Secrets Manager REST Client
//!
//! Native REST implementation for the Secrets Manager API (v2 surface).
//! Uses reqwest for HTTP requests and an IAM bearer token for authentication.
//!
//! This implementation:
//! - Uses reqwest with rustls (no OpenSSL dependencies)
//! - Resolves the service endpoint from an explicit [`ServiceConfig`]
//! - Maps 404 responses to a typed not-found error so callers (deletion,
//!   the lifecycle waiter) can react without string matching
//!
//! References:
//! - [Secrets Manager API](https://cloud.ibm.com/apidocs/secrets-manager)

mod configurations;
mod operations;
pub mod requests;
pub mod responses;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::config::ServiceConfig;
use crate::constants::IAM_APIKEY_GRANT_TYPE;
use crate::error::StoreError;
use crate::store::SecretStore;
use crate::waiter::{StateWaiter, WaitError};
use requests::SecretPrototype;
use responses::{ApiErrorResponse, Secret, TokenResponse};

/// Secrets Manager REST client
///
/// Addresses one service instance; implements [`SecretStore`] and
/// [`crate::store::ConfigurationStore`].
pub struct SecretsManagerClient {
    http_client: Client,
    base_url: String,
    access_token: String,
}

impl std::fmt::Debug for SecretsManagerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsManagerClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SecretsManagerClient {
    /// Connect to the instance described by `config`
    ///
    /// Uses the configured access token if present; otherwise exchanges the
    /// configured API key for one at the IAM token service.
    ///
    /// # Errors
    /// Returns an error if client initialization or the token exchange fails.
    pub async fn connect(config: &ServiceConfig) -> Result<Self, StoreError> {
        let base_url = config.endpoint_url();
        info!(
            instance.id = %config.instance_id,
            region = %config.region,
            "Initializing Secrets Manager client for endpoint: {}", base_url
        );

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let access_token = match &config.access_token {
            Some(token) => token.clone(),
            None => Self::fetch_iam_token(&http_client, config).await?,
        };

        Ok(Self {
            http_client,
            base_url,
            access_token,
        })
    }

    /// Create a client against an explicit base URL with a pre-issued token
    ///
    /// Bypasses endpoint resolution and the IAM exchange; used for staging
    /// deployments and in tests against a local mock server.
    ///
    /// # Errors
    /// Returns an error if client initialization fails.
    pub fn with_base_url(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let http_client = Client::builder().build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into(),
            access_token: access_token.into(),
        })
    }

    /// Exchange an IAM API key for a bearer token
    async fn fetch_iam_token(
        http_client: &Client,
        config: &ServiceConfig,
    ) -> Result<String, StoreError> {
        let api_key = config.api_key.as_ref().ok_or_else(|| StoreError::Auth {
            message: "no access token or API key configured".to_string(),
        })?;

        debug!("Exchanging API key for IAM token at {}", config.iam_endpoint);
        let response = http_client
            .post(format!("{}/identity/token", config.iam_endpoint))
            .form(&[
                ("grant_type", IAM_APIKEY_GRANT_TYPE),
                ("apikey", api_key.expose()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth {
                message: format!("IAM token request returned {status}: {error_text}"),
            });
        }

        let token: TokenResponse = response.json().await?;
        info!("Retrieved IAM access token");
        Ok(token.access_token)
    }

    /// Create a secret and wait for it to settle
    ///
    /// Composes [`SecretStore::create_secret`] with the given waiter; this is
    /// the path most callers want for secret kinds with asynchronous
    /// activation.
    ///
    /// # Errors
    /// Returns the creation error wrapped as [`WaitError::Store`], or any
    /// error of the wait itself.
    pub async fn create_secret_and_wait(
        &self,
        prototype: &SecretPrototype,
        waiter: &StateWaiter,
    ) -> Result<Secret, WaitError> {
        let created = self.create_secret(prototype).await?;
        waiter.wait(self, &created.id).await
    }

    /// Build an HTTP request with authentication headers
    pub(crate) fn make_request(
        &self,
        method: &str,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}/api/v2/{}", self.base_url, path);

        let mut request = match method {
            "GET" => self.http_client.get(&url),
            "POST" => self.http_client.post(&url),
            "PATCH" => self.http_client.patch(&url),
            "DELETE" => self.http_client.delete(&url),
            _ => panic!("Unsupported HTTP method: {method}"),
        };

        // Add "Bearer " prefix if not already present
        let auth_header = if self.access_token.starts_with("Bearer ") {
            self.access_token.clone()
        } else {
            format!("Bearer {}", self.access_token)
        };

        request = request
            .header("Authorization", &auth_header)
            .header("Content-Type", "application/json");

        if let Some(body) = body {
            request = request.json(&body);
        }

        request
    }

    /// Map a non-success API response to a typed error
    pub(crate) fn handle_error_response(
        &self,
        status: reqwest::StatusCode,
        error_text: String,
    ) -> StoreError {
        if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(&error_text) {
            if let Some(detail) = error_response.errors.first() {
                return StoreError::Api {
                    status: status.as_u16(),
                    message: format!("{} (code: {})", detail.message, detail.code),
                };
            }
        }
        // Include the status code in the message for easier matching in logs
        StoreError::Api {
            status: status.as_u16(),
            message: error_text,
        }
    }
}
