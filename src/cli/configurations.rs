//! Configuration commands.

use anyhow::{Context, Result};

use crate::client::SecretsManagerClient;
use crate::store::ConfigurationStore;

/// Fetch a configuration and print it as JSON
pub async fn get_configuration_command(client: &SecretsManagerClient, name: &str) -> Result<()> {
    let configuration = client
        .get_configuration(name)
        .await
        .with_context(|| format!("Failed to get configuration '{name}'"))?;
    println!("{}", serde_json::to_string_pretty(&configuration)?);
    Ok(())
}
