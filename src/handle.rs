//! # Resource Handles
//!
//! Composite external identifiers for store resources.
//!
//! Tooling that records which remote resources it manages needs a single
//! opaque string per resource. The handle format is
//! `<region>/<instance_id>/<resource>` with an optional trailing
//! `/<action>` segment for one-shot action records.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error produced when parsing a resource handle
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandleError {
    #[error("malformed resource handle '{0}': expected <region>/<instance_id>/<resource>[/<action>]")]
    Malformed(String),
}

/// Composite handle addressing one secret, configuration, or action record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    pub region: String,
    pub instance_id: String,
    /// Secret ID or configuration name
    pub resource: String,
    /// Set for handles recording a one-shot action on the resource
    pub action: Option<String>,
}

impl ResourceHandle {
    /// Create a handle for a secret or configuration
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        instance_id: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            instance_id: instance_id.into(),
            resource: resource.into(),
            action: None,
        }
    }

    /// Attach an action segment to the handle
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.region, self.instance_id, self.resource)?;
        if let Some(action) = &self.action {
            write!(f, "/{action}")?;
        }
        Ok(())
    }
}

impl FromStr for ResourceHandle {
    type Err = HandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('/').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(HandleError::Malformed(s.to_string()));
        }
        match segments.as_slice() {
            [region, instance_id, resource] => Ok(Self::new(*region, *instance_id, *resource)),
            [region, instance_id, resource, action] => {
                Ok(Self::new(*region, *instance_id, *resource).with_action(*action))
            }
            _ => Err(HandleError::Malformed(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_handle_round_trip() {
        let handle = ResourceHandle::new("us-south", "6ebc4224", "secret-1234");
        let encoded = handle.to_string();
        assert_eq!(encoded, "us-south/6ebc4224/secret-1234");
        assert_eq!(encoded.parse::<ResourceHandle>().unwrap(), handle);
    }

    #[test]
    fn test_action_handle_round_trip() {
        let handle =
            ResourceHandle::new("eu-de", "6ebc4224", "secret-1234").with_action("validate_dns");
        let encoded = handle.to_string();
        assert_eq!(encoded, "eu-de/6ebc4224/secret-1234/validate_dns");
        assert_eq!(encoded.parse::<ResourceHandle>().unwrap(), handle);
    }

    #[test]
    fn test_configuration_handle() {
        let handle = ResourceHandle::new("us-east", "abc", "lets-encrypt-prod");
        assert_eq!(handle.to_string(), "us-east/abc/lets-encrypt-prod");
    }

    #[test]
    fn test_malformed_handles_rejected() {
        assert!("us-south/only-two".parse::<ResourceHandle>().is_err());
        assert!("a/b/c/d/e".parse::<ResourceHandle>().is_err());
        assert!("a//c".parse::<ResourceHandle>().is_err());
        assert!("".parse::<ResourceHandle>().is_err());
    }
}
