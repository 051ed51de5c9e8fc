//! # Request Types
//!
//! Secrets Manager REST API request structures.
//!
//! Prototypes describe what to create; patches carry only the fields being
//! changed (absent fields are omitted from the body entirely, so the service
//! leaves them untouched).

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::responses::{RotationPolicy, SensitiveValue};

/// Request body for creating a new secret
///
/// Used in `POST /api/v2/secrets`. Common metadata lives here; the
/// kind-specific inputs are flattened in from [`SecretMaterialPrototype`],
/// discriminated by `secret_type`.
#[derive(Debug, Clone, Serialize)]
pub struct SecretPrototype {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_group_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<RotationPolicy>,
    #[serde(flatten)]
    pub material: SecretMaterialPrototype,
}

impl SecretPrototype {
    /// Create a prototype with no optional metadata
    #[must_use]
    pub fn new(name: impl Into<String>, material: SecretMaterialPrototype) -> Self {
        Self {
            name: name.into(),
            description: None,
            secret_group_id: None,
            labels: Vec::new(),
            rotation: None,
            material,
        }
    }

    /// Discriminant label of the material being created
    #[must_use]
    pub fn material_type(&self) -> &'static str {
        match &self.material {
            SecretMaterialPrototype::Arbitrary { .. } => "arbitrary",
            SecretMaterialPrototype::UsernamePassword { .. } => "username_password",
            SecretMaterialPrototype::IamCredentials { .. } => "iam_credentials",
            SecretMaterialPrototype::ImportedCert { .. } => "imported_cert",
            SecretMaterialPrototype::PublicCert { .. } => "public_cert",
            SecretMaterialPrototype::PrivateCert { .. } => "private_cert",
            SecretMaterialPrototype::Kv { .. } => "kv",
        }
    }

    /// Shorthand for an arbitrary secret holding one opaque value
    #[must_use]
    pub fn arbitrary(name: impl Into<String>, payload: impl Into<SensitiveValue>) -> Self {
        Self::new(
            name,
            SecretMaterialPrototype::Arbitrary {
                payload: payload.into(),
                expiration_date: None,
            },
        )
    }
}

/// Kind-specific creation inputs, tagged by `secret_type`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "secret_type", rename_all = "snake_case")]
pub enum SecretMaterialPrototype {
    Arbitrary {
        payload: SensitiveValue,
        #[serde(skip_serializing_if = "Option::is_none")]
        expiration_date: Option<DateTime<Utc>>,
    },
    UsernamePassword {
        username: String,
        password: SensitiveValue,
    },
    IamCredentials {
        ttl: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        access_groups: Vec<String>,
        reuse_api_key: bool,
    },
    ImportedCert {
        certificate: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        intermediate: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        private_key: Option<SensitiveValue>,
    },
    PublicCert {
        common_name: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        alt_names: Vec<String>,
        /// Name of the CA configuration to order through
        ca: String,
        /// Name of the DNS provider configuration, or "manual" to answer the
        /// challenge out of band and validate with a secret action
        dns: String,
        bundle_certs: bool,
    },
    PrivateCert {
        certificate_template: String,
        common_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        ttl: Option<String>,
    },
    Kv {
        data: serde_json::Value,
    },
}

/// Partial update for secret metadata, `PATCH /api/v2/secrets/{id}/metadata`
#[derive(Debug, Clone, Default, Serialize)]
pub struct SecretMetadataPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<RotationPolicy>,
}

/// Request body for creating a new secret version
///
/// A version with no payload asks the service to regenerate material
/// (rotation); a payload sets the new value explicitly.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SecretVersionPrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<SensitiveValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_custom_metadata: Option<serde_json::Value>,
}

/// Partial update for version metadata
#[derive(Debug, Clone, Default, Serialize)]
pub struct SecretVersionMetadataPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_custom_metadata: Option<serde_json::Value>,
}

/// One-shot operation on a secret, `POST /api/v2/secrets/{id}/actions`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum SecretAction {
    /// Confirm an out-of-band DNS challenge for a manually ordered public
    /// certificate; the secret then advances out of `pre_activation`
    ValidateDnsChallenge,
    /// Revoke an issued private certificate
    Revoke,
}

/// Request body for creating a new configuration
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationPrototype {
    pub name: String,
    #[serde(flatten)]
    pub settings: super::responses::ConfigurationSettings,
}

/// Partial update for a configuration
///
/// The updatable surface differs per configuration kind; the service
/// rejects fields that do not apply to the addressed configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigurationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SensitiveValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cis_apikey: Option<SensitiveValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lets_encrypt_private_key: Option<SensitiveValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ttl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crl_expiry: Option<String>,
}

/// One-shot operation on a configuration,
/// `POST /api/v2/configurations/{name}/actions`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum ConfigurationAction {
    /// Sign an externally generated CSR with this CA
    SignCsr { csr: String },
    /// Install the signed certificate for an externally signed
    /// intermediate CA
    SetSigned { certificate: String },
    /// Rotate the CA's certificate revocation list
    RotateCrl,
}
