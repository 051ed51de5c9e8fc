//! # Secrets Manager Client
//!
//! Client library for an IBM Cloud Secrets Manager instance: a remote store
//! holding managed secrets (arbitrary values, credentials, certificates) and
//! named configurations (CA accounts, DNS provider credentials, certificate
//! templates).
//!
//! ## Overview
//!
//! 1. **Typed model** - Every union the service exposes (secret kinds,
//!    configuration kinds, rotation policies, actions) is a tagged enum
//!    decoded by its discriminant field
//! 2. **REST client** - reqwest/rustls client implementing the
//!    [`store::SecretStore`] and [`store::ConfigurationStore`] traits, with
//!    IAM API-key token exchange and endpoint resolution from an explicit
//!    [`config::ServiceConfig`]
//! 3. **Lifecycle waiting** - [`waiter::StateWaiter`] polls a freshly
//!    created secret until it settles, with typed failure/timeout outcomes
//! 4. **Observability** - `tracing` spans on every store operation and
//!    Prometheus metrics for operations and waiter polls
//!
//! ## Example
//!
//! ```rust,ignore
//! use secrets_manager_client::{SecretsManagerClient, ServiceConfig, StateWaiter};
//! use secrets_manager_client::client::requests::SecretPrototype;
//!
//! let config = ServiceConfig::from_env()?;
//! let client = SecretsManagerClient::connect(&config).await?;
//! let secret = client
//!     .create_secret_and_wait(
//!         &SecretPrototype::arbitrary("app-token", "s3cret"),
//!         &StateWaiter::until_active(),
//!     )
//!     .await?;
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod handle;
pub mod observability;
pub mod store;
pub mod waiter;

pub use client::responses::{Secret, SecretState};
pub use client::SecretsManagerClient;
pub use config::{EndpointType, ServiceConfig};
pub use error::StoreError;
pub use handle::ResourceHandle;
pub use store::{ConfigurationStore, SecretStore};
pub use waiter::{StateWaiter, WaitError};
