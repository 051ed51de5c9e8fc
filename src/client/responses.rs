//! # Response Types
//!
//! Secrets Manager REST API response structures and shared model types.
//!
//! Every union the service exposes (secret kinds, configuration kinds,
//! rotation policies, action results) is modeled as a tagged enum decoded by
//! its discriminant field, so an unknown or mismatched kind fails loudly at
//! deserialization instead of surfacing as a half-populated struct.
//!
//! Service documentation: <https://cloud.ibm.com/apidocs/secrets-manager>

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret material that is wiped from memory when dropped
///
/// Serializes transparently as a JSON string so it can sit directly in
/// request and response bodies. The `Debug` representation is redacted;
/// callers that need the cleartext go through [`SensitiveValue::expose`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SensitiveValue(String);

impl SensitiveValue {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the cleartext value
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SensitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SensitiveValue([REDACTED])")
    }
}

impl From<&str> for SensitiveValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SensitiveValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Lifecycle state of a secret
///
/// States follow the NIST SP 800-57 key lifecycle. A secret is created in
/// `pre_activation` and advances server-side; `destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretState {
    PreActivation,
    Active,
    Suspended,
    Deactivated,
    Destroyed,
}

impl SecretState {
    /// Numeric NIST SP 800-57 state code
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            SecretState::PreActivation => 0,
            SecretState::Active => 1,
            SecretState::Suspended => 2,
            SecretState::Deactivated => 3,
            SecretState::Destroyed => 5,
        }
    }

    /// Resolve a numeric state code to its label
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(SecretState::PreActivation),
            1 => Some(SecretState::Active),
            2 => Some(SecretState::Suspended),
            3 => Some(SecretState::Deactivated),
            5 => Some(SecretState::Destroyed),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SecretState::PreActivation => "pre_activation",
            SecretState::Active => "active",
            SecretState::Suspended => "suspended",
            SecretState::Deactivated => "deactivated",
            SecretState::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for SecretState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SecretState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre_activation" => Ok(SecretState::PreActivation),
            "active" => Ok(SecretState::Active),
            "suspended" => Ok(SecretState::Suspended),
            "deactivated" => Ok(SecretState::Deactivated),
            "destroyed" => Ok(SecretState::Destroyed),
            other => Err(format!("unknown secret state '{other}'")),
        }
    }
}

/// Unit for common rotation intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationUnit {
    Day,
    Month,
}

/// Automatic rotation policy attached to a secret
///
/// Tagged by `policy_type`: generic interval rotation applies to most secret
/// kinds, public certificates rotate whole orders and may rotate the key
/// pair alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy_type", rename_all = "snake_case")]
pub enum RotationPolicy {
    Common {
        auto_rotate: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        interval: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<RotationUnit>,
    },
    PublicCert {
        auto_rotate: bool,
        rotate_keys: bool,
    },
}

/// A secret held by the store
///
/// Common metadata lives here; the kind-specific fields are flattened in
/// from [`SecretMaterial`], discriminated by `secret_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Secret {
    /// Opaque secret identifier assigned by the service
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Numeric lifecycle state code (0/1/2/3/5)
    pub state: i64,
    /// Lifecycle state label; this is what state transitions are matched on
    pub state_description: SecretState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions_total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<RotationPolicy>,
    #[serde(flatten)]
    pub material: SecretMaterial,
}

/// Kind-specific portion of a secret, tagged by `secret_type`
///
/// Fields the service only returns after issuance completes (certificates,
/// generated credentials) are optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "secret_type", rename_all = "snake_case")]
pub enum SecretMaterial {
    Arbitrary {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<SensitiveValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expiration_date: Option<DateTime<Utc>>,
    },
    UsernamePassword {
        username: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<SensitiveValue>,
    },
    IamCredentials {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ttl: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        access_groups: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key: Option<SensitiveValue>,
        #[serde(default)]
        reuse_api_key: bool,
    },
    ImportedCert {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        common_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        certificate: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        intermediate: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        private_key: Option<SensitiveValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expiration_date: Option<DateTime<Utc>>,
    },
    PublicCert {
        common_name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        alt_names: Vec<String>,
        /// Name of the CA configuration used to order the certificate
        ca: String,
        /// Name of the DNS provider configuration, or "manual"
        dns: String,
        #[serde(default)]
        bundle_certs: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        certificate: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        private_key: Option<SensitiveValue>,
    },
    PrivateCert {
        certificate_template: String,
        common_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        certificate: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        private_key: Option<SensitiveValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        issuing_ca: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expiration_date: Option<DateTime<Utc>>,
    },
    Kv {
        #[serde(default)]
        data: serde_json::Value,
    },
}

impl SecretMaterial {
    /// Discriminant label as it appears on the wire
    #[must_use]
    pub fn secret_type(&self) -> &'static str {
        match self {
            SecretMaterial::Arbitrary { .. } => "arbitrary",
            SecretMaterial::UsernamePassword { .. } => "username_password",
            SecretMaterial::IamCredentials { .. } => "iam_credentials",
            SecretMaterial::ImportedCert { .. } => "imported_cert",
            SecretMaterial::PublicCert { .. } => "public_cert",
            SecretMaterial::PrivateCert { .. } => "private_cert",
            SecretMaterial::Kv { .. } => "kv",
        }
    }
}

/// One version of a secret
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretVersion {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_id: Option<String>,
    /// Whether the version still carries retrievable payload data
    #[serde(default)]
    pub payload_available: bool,
    #[serde(default)]
    pub auto_rotated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_custom_metadata: Option<serde_json::Value>,
}

/// A named, reusable configuration object
///
/// Configurations describe CA accounts, DNS provider credentials, and
/// certificate templates that secrets reference at issuance time. The
/// kind-specific settings are flattened in from [`ConfigurationSettings`],
/// discriminated by `config_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub settings: ConfigurationSettings,
}

/// Kind-specific portion of a configuration, tagged by `config_type`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "config_type", rename_all = "snake_case")]
pub enum ConfigurationSettings {
    PublicCertCaLetsEncrypt {
        /// "production" or "staging"
        lets_encrypt_environment: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lets_encrypt_private_key: Option<SensitiveValue>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lets_encrypt_preferred_chain: Option<String>,
    },
    PublicCertDnsCloudInternetServices {
        cis_crn: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cis_apikey: Option<SensitiveValue>,
    },
    PublicCertDnsClassicInfrastructure {
        classic_infrastructure_username: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        classic_infrastructure_password: Option<SensitiveValue>,
    },
    PrivateCertRootCa {
        common_name: String,
        max_ttl: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        crl_expiry: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        certificate: Option<String>,
    },
    PrivateCertIntermediateCa {
        common_name: String,
        max_ttl: String,
        /// "internal" (signed by a root CA in this instance) or "external"
        signing_method: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        issuer: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        certificate: Option<String>,
    },
    PrivateCertTemplate {
        certificate_authority: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        allowed_domains: Vec<String>,
        #[serde(default)]
        allow_subdomains: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_ttl: Option<String>,
    },
    IamCredentials {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key: Option<SensitiveValue>,
    },
}

/// Result of a one-shot configuration action
///
/// Only signing actions return data; the other actions yield an empty body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigurationActionResult {
    #[serde(default)]
    pub certificate: Option<String>,
    #[serde(default)]
    pub issuing_ca: Option<String>,
    #[serde(default)]
    pub ca_chain: Vec<String>,
}

/// Error response body returned by the service
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Request trace ID, useful when raising support tickets
    #[serde(default)]
    pub trace: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

/// One error entry inside an [`ApiErrorResponse`]
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

/// OAuth2 token response from the IAM token service
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for authenticating with the service
    pub access_token: String,
    #[serde(default)]
    #[allow(dead_code, reason = "Field is part of the wire format but unused after parsing")]
    pub token_type: Option<String>,
    /// Token lifetime in seconds
    #[serde(default)]
    #[allow(dead_code, reason = "Field is part of the wire format but unused after parsing")]
    pub expires_in: Option<u64>,
}
