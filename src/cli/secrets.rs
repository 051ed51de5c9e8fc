//! Secret commands: get, create, delete, wait.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::client::requests::SecretPrototype;
use crate::client::responses::SecretState;
use crate::client::SecretsManagerClient;
use crate::store::SecretStore;
use crate::waiter::StateWaiter;

/// Fetch a secret and print it as JSON
pub async fn get_command(client: &SecretsManagerClient, secret_id: &str) -> Result<()> {
    let secret = client
        .get_secret(secret_id)
        .await
        .with_context(|| format!("Failed to get secret {secret_id}"))?;
    println!("{}", serde_json::to_string_pretty(&secret)?);
    Ok(())
}

/// Create an arbitrary secret, optionally waiting for activation
pub async fn create_arbitrary_command(
    client: &SecretsManagerClient,
    name: &str,
    payload: String,
    description: Option<String>,
    wait: bool,
) -> Result<()> {
    let mut prototype = SecretPrototype::arbitrary(name, payload);
    prototype.description = description;

    if wait {
        println!("► creating secret '{name}' and waiting for activation");
        let secret = client
            .create_secret_and_wait(&prototype, &StateWaiter::until_active())
            .await
            .with_context(|| format!("Failed to create secret '{name}'"))?;
        println!("✔ secret active: {} (state: {})", secret.id, secret.state_description);
    } else {
        let secret = client
            .create_secret(&prototype)
            .await
            .with_context(|| format!("Failed to create secret '{name}'"))?;
        println!("✔ secret created: {} (state: {})", secret.id, secret.state_description);
    }
    Ok(())
}

/// Delete a secret
pub async fn delete_command(client: &SecretsManagerClient, secret_id: &str) -> Result<()> {
    client
        .delete_secret(secret_id)
        .await
        .with_context(|| format!("Failed to delete secret {secret_id}"))?;
    println!("✔ secret deleted: {secret_id}");
    Ok(())
}

/// Wait for a secret to reach a lifecycle state
pub async fn wait_command(
    client: &SecretsManagerClient,
    secret_id: &str,
    target: &str,
    timeout_secs: Option<u64>,
    poll_interval_secs: Option<u64>,
) -> Result<()> {
    let target: SecretState = target
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("invalid --target")?;

    let mut waiter = StateWaiter::new(SecretState::PreActivation, target);
    if let Some(timeout) = timeout_secs {
        waiter = waiter.timeout(Duration::from_secs(timeout));
    }
    if let Some(interval) = poll_interval_secs {
        waiter = waiter.poll_interval(Duration::from_secs(interval));
    }

    println!("► waiting for secret {secret_id} to reach '{target}'");
    let secret = waiter
        .wait(client, secret_id)
        .await
        .with_context(|| format!("Wait failed for secret {secret_id}"))?;
    println!("✔ secret {} reached '{}'", secret.id, secret.state_description);
    Ok(())
}
