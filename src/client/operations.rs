//! # Secret Operations
//!
//! Implementation of the [`SecretStore`] trait for the REST client.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info, info_span, Instrument};

use super::requests::{
    SecretAction, SecretMetadataPatch, SecretPrototype, SecretVersionMetadataPatch,
    SecretVersionPrototype,
};
use super::responses::{Secret, SecretVersion};
use super::SecretsManagerClient;
use crate::error::StoreError;
use crate::observability::metrics;
use crate::store::SecretStore;

#[async_trait]
impl SecretStore for SecretsManagerClient {
    async fn get_secret(&self, secret_id: &str) -> Result<Secret, StoreError> {
        let span = tracing::debug_span!("secrets_manager.secret.get", secret.id = secret_id);
        async move {
            let start = Instant::now();
            let response = self
                .make_request("GET", &format!("secrets/{secret_id}"), None)
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => {
                    let secret: Secret = response.json().await?;
                    metrics::record_store_operation("get_secret", start.elapsed().as_secs_f64());
                    Ok(secret)
                }
                status if status == 404 => {
                    debug!("secret {} not found", secret_id);
                    metrics::record_store_operation("get_secret", start.elapsed().as_secs_f64());
                    Err(StoreError::NotFound {
                        id: secret_id.to_string(),
                    })
                }
                status => {
                    let error_text = response.text().await.unwrap_or_default();
                    metrics::increment_store_errors("get_secret");
                    Err(self.handle_error_response(status, error_text))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn create_secret(&self, prototype: &SecretPrototype) -> Result<Secret, StoreError> {
        let span = info_span!(
            "secrets_manager.secret.create",
            secret.name = %prototype.name,
            secret.kind = prototype.material_type()
        );
        async move {
            let start = Instant::now();
            info!(
                "Creating {} secret: {}",
                prototype.material_type(),
                prototype.name
            );

            let response = self
                .make_request("POST", "secrets", Some(serde_json::to_value(prototype)?))
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                metrics::increment_store_errors("create_secret");
                return Err(self.handle_error_response(status, error_text));
            }

            let secret: Secret = response.json().await?;
            debug!(
                secret.id = %secret.id,
                state = %secret.state_description,
                "secret created"
            );
            metrics::record_store_operation("create_secret", start.elapsed().as_secs_f64());
            Ok(secret)
        }
        .instrument(span)
        .await
    }

    async fn update_secret_metadata(
        &self,
        secret_id: &str,
        patch: &SecretMetadataPatch,
    ) -> Result<Secret, StoreError> {
        let span = info_span!("secrets_manager.secret.update", secret.id = secret_id);
        async move {
            let start = Instant::now();
            let response = self
                .make_request(
                    "PATCH",
                    &format!("secrets/{secret_id}/metadata"),
                    Some(serde_json::to_value(patch)?),
                )
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => {
                    let secret: Secret = response.json().await?;
                    metrics::record_store_operation(
                        "update_secret_metadata",
                        start.elapsed().as_secs_f64(),
                    );
                    Ok(secret)
                }
                status if status == 404 => Err(StoreError::NotFound {
                    id: secret_id.to_string(),
                }),
                status => {
                    let error_text = response.text().await.unwrap_or_default();
                    metrics::increment_store_errors("update_secret_metadata");
                    Err(self.handle_error_response(status, error_text))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn create_secret_version(
        &self,
        secret_id: &str,
        prototype: &SecretVersionPrototype,
    ) -> Result<SecretVersion, StoreError> {
        let span = info_span!("secrets_manager.version.create", secret.id = secret_id);
        async move {
            let start = Instant::now();
            info!("Creating new version for secret: {}", secret_id);

            let response = self
                .make_request(
                    "POST",
                    &format!("secrets/{secret_id}/versions"),
                    Some(serde_json::to_value(prototype)?),
                )
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => {
                    let version: SecretVersion = response.json().await?;
                    metrics::record_store_operation(
                        "create_secret_version",
                        start.elapsed().as_secs_f64(),
                    );
                    Ok(version)
                }
                status if status == 404 => Err(StoreError::NotFound {
                    id: secret_id.to_string(),
                }),
                status => {
                    let error_text = response.text().await.unwrap_or_default();
                    metrics::increment_store_errors("create_secret_version");
                    Err(self.handle_error_response(status, error_text))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn update_secret_version_metadata(
        &self,
        secret_id: &str,
        version_id: &str,
        patch: &SecretVersionMetadataPatch,
    ) -> Result<SecretVersion, StoreError> {
        let span = info_span!(
            "secrets_manager.version.update",
            secret.id = secret_id,
            version.id = version_id
        );
        async move {
            let start = Instant::now();
            let response = self
                .make_request(
                    "PATCH",
                    &format!("secrets/{secret_id}/versions/{version_id}/metadata"),
                    Some(serde_json::to_value(patch)?),
                )
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => {
                    let version: SecretVersion = response.json().await?;
                    metrics::record_store_operation(
                        "update_secret_version_metadata",
                        start.elapsed().as_secs_f64(),
                    );
                    Ok(version)
                }
                status if status == 404 => Err(StoreError::NotFound {
                    id: format!("{secret_id}/{version_id}"),
                }),
                status => {
                    let error_text = response.text().await.unwrap_or_default();
                    metrics::increment_store_errors("update_secret_version_metadata");
                    Err(self.handle_error_response(status, error_text))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn delete_secret(&self, secret_id: &str) -> Result<(), StoreError> {
        info!("Deleting secret: {}", secret_id);
        let start = Instant::now();

        let response = self
            .make_request("DELETE", &format!("secrets/{secret_id}"), None)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                metrics::record_store_operation("delete_secret", start.elapsed().as_secs_f64());
                Ok(())
            }
            status if status == 404 => Err(StoreError::NotFound {
                id: secret_id.to_string(),
            }),
            status => {
                let error_text = response.text().await.unwrap_or_default();
                metrics::increment_store_errors("delete_secret");
                Err(self.handle_error_response(status, error_text))
            }
        }
    }

    async fn create_secret_action(
        &self,
        secret_id: &str,
        action: &SecretAction,
    ) -> Result<(), StoreError> {
        let span = info_span!("secrets_manager.secret.action", secret.id = secret_id);
        async move {
            let start = Instant::now();
            info!("Running action on secret {}: {:?}", secret_id, action);

            let response = self
                .make_request(
                    "POST",
                    &format!("secrets/{secret_id}/actions"),
                    Some(serde_json::to_value(action)?),
                )
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => {
                    metrics::record_store_operation(
                        "create_secret_action",
                        start.elapsed().as_secs_f64(),
                    );
                    Ok(())
                }
                status if status == 404 => Err(StoreError::NotFound {
                    id: secret_id.to_string(),
                }),
                status => {
                    let error_text = response.text().await.unwrap_or_default();
                    metrics::increment_store_errors("create_secret_action");
                    Err(self.handle_error_response(status, error_text))
                }
            }
        }
        .instrument(span)
        .await
    }
}
