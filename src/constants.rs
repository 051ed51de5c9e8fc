//! # Constants
//!
//! Shared constants used throughout the client.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Default domain suffix for service endpoints
pub const DEFAULT_DOMAIN_SUFFIX: &str = "appdomain.cloud";

/// Default IAM token service endpoint
pub const DEFAULT_IAM_ENDPOINT: &str = "https://iam.cloud.ibm.com";

/// IAM grant type used when exchanging an API key for an access token
pub const IAM_APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Default HTTP request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default interval between lifecycle-state polls (seconds)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Default overall deadline for a lifecycle-state wait (seconds)
/// Certificate issuance can take several minutes end to end
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 1200;
