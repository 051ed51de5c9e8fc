//! # Configuration Operations
//!
//! Implementation of the [`ConfigurationStore`] trait for the REST client.
//!
//! Configurations are addressed by name, not by generated ID; names are
//! caller-chosen and stable across updates.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, info_span, Instrument};

use super::requests::{ConfigurationAction, ConfigurationPatch, ConfigurationPrototype};
use super::responses::{Configuration, ConfigurationActionResult};
use super::SecretsManagerClient;
use crate::error::StoreError;
use crate::observability::metrics;
use crate::store::ConfigurationStore;

#[async_trait]
impl ConfigurationStore for SecretsManagerClient {
    async fn get_configuration(&self, name: &str) -> Result<Configuration, StoreError> {
        let span = tracing::debug_span!("secrets_manager.configuration.get", config.name = name);
        async move {
            let start = Instant::now();
            let response = self
                .make_request("GET", &format!("configurations/{name}"), None)
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => {
                    let configuration: Configuration = response.json().await?;
                    metrics::record_store_operation(
                        "get_configuration",
                        start.elapsed().as_secs_f64(),
                    );
                    Ok(configuration)
                }
                status if status == 404 => Err(StoreError::NotFound {
                    id: name.to_string(),
                }),
                status => {
                    let error_text = response.text().await.unwrap_or_default();
                    metrics::increment_store_errors("get_configuration");
                    Err(self.handle_error_response(status, error_text))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn create_configuration(
        &self,
        prototype: &ConfigurationPrototype,
    ) -> Result<Configuration, StoreError> {
        let span = info_span!(
            "secrets_manager.configuration.create",
            config.name = %prototype.name
        );
        async move {
            let start = Instant::now();
            info!("Creating configuration: {}", prototype.name);

            let response = self
                .make_request(
                    "POST",
                    "configurations",
                    Some(serde_json::to_value(prototype)?),
                )
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                metrics::increment_store_errors("create_configuration");
                return Err(self.handle_error_response(status, error_text));
            }

            let configuration: Configuration = response.json().await?;
            metrics::record_store_operation("create_configuration", start.elapsed().as_secs_f64());
            Ok(configuration)
        }
        .instrument(span)
        .await
    }

    async fn update_configuration(
        &self,
        name: &str,
        patch: &ConfigurationPatch,
    ) -> Result<Configuration, StoreError> {
        let span = info_span!("secrets_manager.configuration.update", config.name = name);
        async move {
            let start = Instant::now();
            let response = self
                .make_request(
                    "PATCH",
                    &format!("configurations/{name}"),
                    Some(serde_json::to_value(patch)?),
                )
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => {
                    let configuration: Configuration = response.json().await?;
                    metrics::record_store_operation(
                        "update_configuration",
                        start.elapsed().as_secs_f64(),
                    );
                    Ok(configuration)
                }
                status if status == 404 => Err(StoreError::NotFound {
                    id: name.to_string(),
                }),
                status => {
                    let error_text = response.text().await.unwrap_or_default();
                    metrics::increment_store_errors("update_configuration");
                    Err(self.handle_error_response(status, error_text))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn delete_configuration(&self, name: &str) -> Result<(), StoreError> {
        info!("Deleting configuration: {}", name);
        let start = Instant::now();

        let response = self
            .make_request("DELETE", &format!("configurations/{name}"), None)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                metrics::record_store_operation(
                    "delete_configuration",
                    start.elapsed().as_secs_f64(),
                );
                Ok(())
            }
            status if status == 404 => Err(StoreError::NotFound {
                id: name.to_string(),
            }),
            status => {
                let error_text = response.text().await.unwrap_or_default();
                metrics::increment_store_errors("delete_configuration");
                Err(self.handle_error_response(status, error_text))
            }
        }
    }

    async fn create_configuration_action(
        &self,
        name: &str,
        action: &ConfigurationAction,
    ) -> Result<ConfigurationActionResult, StoreError> {
        let span = info_span!("secrets_manager.configuration.action", config.name = name);
        async move {
            let start = Instant::now();
            info!("Running action on configuration: {}", name);

            let response = self
                .make_request(
                    "POST",
                    &format!("configurations/{name}/actions"),
                    Some(serde_json::to_value(action)?),
                )
                .send()
                .await?;

            match response.status() {
                status if status.is_success() => {
                    // Actions without result data return an empty body
                    let body = response.text().await.unwrap_or_default();
                    let result = if body.trim().is_empty() {
                        ConfigurationActionResult::default()
                    } else {
                        serde_json::from_str(&body)?
                    };
                    metrics::record_store_operation(
                        "create_configuration_action",
                        start.elapsed().as_secs_f64(),
                    );
                    Ok(result)
                }
                status if status == 404 => Err(StoreError::NotFound {
                    id: name.to_string(),
                }),
                status => {
                    let error_text = response.text().await.unwrap_or_default();
                    metrics::increment_store_errors("create_configuration_action");
                    Err(self.handle_error_response(status, error_text))
                }
            }
        }
        .instrument(span)
        .await
    }
}
