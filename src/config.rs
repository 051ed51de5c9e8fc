//! # Service Configuration
//!
//! Connection settings for a Secrets Manager service instance.
//!
//! All ambient lookups happen in [`ServiceConfig::from_env`]; the rest of the
//! crate only ever sees an explicit config value, so endpoint resolution is
//! deterministic and testable.

use crate::client::responses::SensitiveValue;
use crate::constants::{
    DEFAULT_DOMAIN_SUFFIX, DEFAULT_IAM_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Which service endpoint variant to address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EndpointType {
    /// Public internet endpoint
    Public,
    /// Private network (service endpoint) variant
    Private,
}

impl std::str::FromStr for EndpointType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "public" => Ok(EndpointType::Public),
            "private" => Ok(EndpointType::Private),
            other => Err(anyhow::anyhow!(
                "invalid endpoint type '{other}' (expected 'public' or 'private')"
            )),
        }
    }
}

/// Connection settings for one Secrets Manager instance
///
/// The instance is addressed by a region/instance pair; the endpoint URL is
/// derived from those plus the endpoint type and domain suffix.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service instance ID (a UUID in the instance CRN)
    pub instance_id: String,
    /// Region the instance lives in (e.g. "us-south")
    pub region: String,
    /// Public or private endpoint variant
    pub endpoint_type: EndpointType,
    /// Domain suffix of the service endpoint
    /// Overriding this points the client at a staging or test deployment
    pub domain_suffix: String,
    /// IAM token service endpoint
    pub iam_endpoint: String,
    /// IAM API key, exchanged for a bearer token at connect time
    pub api_key: Option<SensitiveValue>,
    /// Pre-issued bearer token; skips the IAM exchange when set
    pub access_token: Option<String>,
    /// Per-request HTTP timeout (seconds)
    pub request_timeout_secs: u64,
}

impl ServiceConfig {
    /// Create a config for the given instance with default endpoint settings
    #[must_use]
    pub fn new(instance_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            region: region.into(),
            endpoint_type: EndpointType::Public,
            domain_suffix: DEFAULT_DOMAIN_SUFFIX.to_string(),
            iam_endpoint: DEFAULT_IAM_ENDPOINT.to_string(),
            api_key: None,
            access_token: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables
    ///
    /// `SECRETS_MANAGER_INSTANCE_ID` and `SECRETS_MANAGER_REGION` are
    /// required; everything else falls back to defaults.
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value fails
    /// to parse.
    pub fn from_env() -> Result<Self> {
        let instance_id = std::env::var("SECRETS_MANAGER_INSTANCE_ID")
            .context("SECRETS_MANAGER_INSTANCE_ID is not set")?;
        let region = std::env::var("SECRETS_MANAGER_REGION")
            .context("SECRETS_MANAGER_REGION is not set")?;

        let mut config = Self::new(instance_id, region);

        if let Ok(endpoint_type) = std::env::var("SECRETS_MANAGER_ENDPOINT_TYPE") {
            config.endpoint_type = endpoint_type
                .parse()
                .context("invalid SECRETS_MANAGER_ENDPOINT_TYPE")?;
        }
        if let Ok(domain_suffix) = std::env::var("SECRETS_MANAGER_DOMAIN_SUFFIX") {
            config.domain_suffix = domain_suffix;
        }
        if let Ok(iam_endpoint) = std::env::var("SECRETS_MANAGER_IAM_ENDPOINT") {
            config.iam_endpoint = iam_endpoint;
        }
        if let Ok(api_key) = std::env::var("SECRETS_MANAGER_API_KEY") {
            config.api_key = Some(SensitiveValue::new(api_key));
        }
        if let Ok(access_token) = std::env::var("SECRETS_MANAGER_ACCESS_TOKEN") {
            config.access_token = Some(access_token);
        }
        if let Ok(timeout) = std::env::var("SECRETS_MANAGER_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = timeout
                .parse()
                .context("invalid SECRETS_MANAGER_REQUEST_TIMEOUT_SECS")?;
        }

        Ok(config)
    }

    /// Base URL of the service endpoint for this instance
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        match self.endpoint_type {
            EndpointType::Public => format!(
                "https://{}.{}.secrets-manager.{}",
                self.instance_id, self.region, self.domain_suffix
            ),
            EndpointType::Private => format!(
                "https://{}.private.{}.secrets-manager.{}",
                self.instance_id, self.region, self.domain_suffix
            ),
        }
    }
}
