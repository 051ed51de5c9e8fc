//! # Store Traits
//!
//! Capability traits for the remote secret store.
//!
//! The REST client implements both; the lifecycle waiter and any embedding
//! application depend only on these traits, so tests can substitute an
//! in-memory store.

use async_trait::async_trait;

use crate::client::requests::{
    ConfigurationAction, ConfigurationPatch, ConfigurationPrototype, SecretAction,
    SecretMetadataPatch, SecretPrototype, SecretVersionMetadataPatch, SecretVersionPrototype,
};
use crate::client::responses::{
    Configuration, ConfigurationActionResult, Secret, SecretVersion,
};
use crate::error::StoreError;

/// Secret operations against a store instance
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch a secret by ID
    ///
    /// Returns [`StoreError::NotFound`] when the secret does not exist; the
    /// lifecycle waiter relies on that distinction.
    async fn get_secret(&self, secret_id: &str) -> Result<Secret, StoreError>;

    /// Create a secret; the returned representation carries the generated ID
    /// and the initial lifecycle state
    async fn create_secret(&self, prototype: &SecretPrototype) -> Result<Secret, StoreError>;

    /// Patch a secret's metadata
    async fn update_secret_metadata(
        &self,
        secret_id: &str,
        patch: &SecretMetadataPatch,
    ) -> Result<Secret, StoreError>;

    /// Add a new version to a secret
    async fn create_secret_version(
        &self,
        secret_id: &str,
        prototype: &SecretVersionPrototype,
    ) -> Result<SecretVersion, StoreError>;

    /// Patch a secret version's metadata
    async fn update_secret_version_metadata(
        &self,
        secret_id: &str,
        version_id: &str,
        patch: &SecretVersionMetadataPatch,
    ) -> Result<SecretVersion, StoreError>;

    /// Delete a secret
    async fn delete_secret(&self, secret_id: &str) -> Result<(), StoreError>;

    /// Run a one-shot action against a secret
    ///
    /// Callers that need the resulting state re-read the secret afterwards,
    /// typically through a state waiter.
    async fn create_secret_action(
        &self,
        secret_id: &str,
        action: &SecretAction,
    ) -> Result<(), StoreError>;
}

/// Configuration operations against a store instance
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Fetch a configuration by name
    async fn get_configuration(&self, name: &str) -> Result<Configuration, StoreError>;

    /// Create a named configuration
    async fn create_configuration(
        &self,
        prototype: &ConfigurationPrototype,
    ) -> Result<Configuration, StoreError>;

    /// Patch a configuration
    async fn update_configuration(
        &self,
        name: &str,
        patch: &ConfigurationPatch,
    ) -> Result<Configuration, StoreError>;

    /// Delete a configuration
    async fn delete_configuration(&self, name: &str) -> Result<(), StoreError>;

    /// Run a one-shot action against a configuration
    async fn create_configuration_action(
        &self,
        name: &str,
        action: &ConfigurationAction,
    ) -> Result<ConfigurationActionResult, StoreError>;
}
