//! # SMCTL CLI
//!
//! Command-line interface for operating on a Secrets Manager instance.
//!
//! ## Usage
//!
//! ```bash
//! # Fetch a secret and print it as JSON
//! smctl get b49ad24d-81d4-5ebc-b9b9-b0937d1c84d5
//!
//! # Create an arbitrary secret and wait for it to activate
//! smctl create-arbitrary app-token --payload s3cret --wait
//!
//! # Wait for a slow certificate order to finish
//! smctl wait cert-id --target active --timeout-secs 900
//!
//! # Delete a secret
//! smctl delete b49ad24d-81d4-5ebc-b9b9-b0937d1c84d5
//!
//! # Inspect a CA or DNS provider configuration
//! smctl get-configuration lets-encrypt-prod
//! ```
//!
//! Connection settings come from `SECRETS_MANAGER_*` environment variables;
//! `--instance-id`/`--region` and the endpoint flags override them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::client::SecretsManagerClient;
use crate::config::{EndpointType, ServiceConfig};
use crate::observability::metrics;

mod configurations;
mod secrets;

/// Secrets Manager CLI
#[derive(Parser)]
#[command(name = "smctl")]
#[command(
    about = "Secrets Manager CLI",
    long_about = None,
    version,
    long_version = concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("BUILD_GIT_HASH"), ", built ", env!("BUILD_DATETIME"), ")"
    ),
    after_help = "\
Connection environment variables:
  SECRETS_MANAGER_INSTANCE_ID    service instance ID (required unless --instance-id)
  SECRETS_MANAGER_REGION         instance region (required unless --region)
  SECRETS_MANAGER_API_KEY        IAM API key, exchanged for a bearer token
  SECRETS_MANAGER_ACCESS_TOKEN   pre-issued bearer token (skips the exchange)

Examples:
  smctl get b49ad24d-81d4-5ebc-b9b9-b0937d1c84d5
  smctl create-arbitrary app-token --payload s3cret --wait
  smctl wait cert-id --target active --timeout-secs 900
"
)]
struct Cli {
    /// Service instance ID (overrides SECRETS_MANAGER_INSTANCE_ID)
    #[arg(long, global = true)]
    instance_id: Option<String>,

    /// Instance region (overrides SECRETS_MANAGER_REGION)
    #[arg(long, global = true)]
    region: Option<String>,

    /// Endpoint variant to address
    #[arg(long, global = true, value_enum)]
    endpoint_type: Option<EndpointType>,

    /// Override the service domain suffix (staging/test deployments)
    #[arg(long, global = true)]
    domain_suffix: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a secret and print it as JSON
    Get {
        /// Secret ID
        secret_id: String,
    },

    /// Create an arbitrary secret
    CreateArbitrary {
        /// Secret name
        name: String,
        /// Secret value
        #[arg(long)]
        payload: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
        /// Block until the secret reaches the active state
        #[arg(long)]
        wait: bool,
    },

    /// Delete a secret
    Delete {
        /// Secret ID
        secret_id: String,
    },

    /// Wait for a secret to reach a lifecycle state
    Wait {
        /// Secret ID
        secret_id: String,
        /// Target state label (e.g. active, pre_activation)
        #[arg(long, default_value = "active")]
        target: String,
        /// Overall deadline in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Interval between polls in seconds
        #[arg(long)]
        poll_interval_secs: Option<u64>,
    },

    /// Fetch a configuration and print it as JSON
    GetConfiguration {
        /// Configuration name
        name: String,
    },
}

/// Parse arguments, connect, and dispatch
///
/// # Errors
/// Returns an error if configuration is incomplete, the connection fails,
/// or the command itself fails.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = metrics::register_metrics() {
        tracing::debug!("metrics already registered: {}", e);
    }

    let config = resolve_config(&cli)?;
    let client = SecretsManagerClient::connect(&config)
        .await
        .context("Failed to connect to Secrets Manager")?;

    match cli.command {
        Commands::Get { secret_id } => secrets::get_command(&client, &secret_id).await,
        Commands::CreateArbitrary {
            name,
            payload,
            description,
            wait,
        } => secrets::create_arbitrary_command(&client, &name, payload, description, wait).await,
        Commands::Delete { secret_id } => secrets::delete_command(&client, &secret_id).await,
        Commands::Wait {
            secret_id,
            target,
            timeout_secs,
            poll_interval_secs,
        } => {
            secrets::wait_command(&client, &secret_id, &target, timeout_secs, poll_interval_secs)
                .await
        }
        Commands::GetConfiguration { name } => {
            configurations::get_configuration_command(&client, &name).await
        }
    }
}

/// Resolve connection settings from flags and environment
fn resolve_config(cli: &Cli) -> Result<ServiceConfig> {
    let mut config = match (&cli.instance_id, &cli.region) {
        (Some(instance_id), Some(region)) => {
            // Flags fully name the instance; credentials still come from env
            let mut config = ServiceConfig::new(instance_id, region);
            if let Ok(api_key) = std::env::var("SECRETS_MANAGER_API_KEY") {
                config.api_key = Some(api_key.into());
            }
            if let Ok(access_token) = std::env::var("SECRETS_MANAGER_ACCESS_TOKEN") {
                config.access_token = Some(access_token);
            }
            config
        }
        _ => ServiceConfig::from_env().context(
            "Connection settings incomplete: set SECRETS_MANAGER_INSTANCE_ID and \
             SECRETS_MANAGER_REGION, or pass --instance-id and --region",
        )?,
    };

    if let Some(endpoint_type) = cli.endpoint_type {
        config.endpoint_type = endpoint_type;
    }
    if let Some(domain_suffix) = &cli.domain_suffix {
        config.domain_suffix = domain_suffix.clone();
    }
    Ok(config)
}
