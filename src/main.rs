//! # smctl
//!
//! Binary entry point for the Secrets Manager CLI. All command logic lives
//! in the library's `cli` module so it can be tested.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    secrets_manager_client::cli::run().await
}
