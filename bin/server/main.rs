//! Bedrock Relay Server
//!
//! Runs the relay as a standalone HTTP server.

use anyhow::Result;
use bedrock_relay::{run_server, BedrockInvoker, RelayConfig};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

/// Flags override `RelayConfig::default()`, which already reads
/// RELAY_HOST, RELAY_PORT, AWS_PROFILE, AWS_REGION, BEDROCK_MODEL_ID and
/// OPENAI_API_BASE.
#[derive(Parser, Debug)]
#[command(name = "bedrock-relay")]
#[command(about = "HTTP relay forwarding chat requests to AWS Bedrock")]
struct Args {
    /// Server port [default: 3001]
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host [default: 127.0.0.1]
    #[arg(long)]
    host: Option<String>,

    /// AWS profile used for credentials [default: dev]
    #[arg(long)]
    profile: Option<String>,

    /// AWS region hosting the model [default: us-east-1]
    #[arg(long)]
    region: Option<String>,

    /// Bedrock model identifier
    #[arg(long)]
    model_id: Option<String>,

    /// Base URL of the OpenAI API for the image relay
    #[arg(long)]
    openai_api_base: Option<String>,
}

impl Args {
    fn into_config(self) -> RelayConfig {
        let defaults = RelayConfig::default();
        RelayConfig {
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
            aws_profile: self.profile.unwrap_or(defaults.aws_profile),
            aws_region: self.region.unwrap_or(defaults.aws_region),
            model_id: self.model_id.unwrap_or(defaults.model_id),
            openai_api_base: self.openai_api_base.unwrap_or(defaults.openai_api_base),
            ..defaults
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bedrock_relay=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    let config = Args::parse().into_config();

    info!("Starting Bedrock Relay");
    info!("  Model: {}", config.model_id);

    let invoker = Arc::new(BedrockInvoker::from_config(&config).await);
    run_server(config, invoker).await
}
