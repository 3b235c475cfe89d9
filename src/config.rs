//! Relay Configuration
//!
//! Defines everything the relay needs at startup:
//! - Bind address
//! - AWS profile and region used to build the Bedrock client
//! - Model identifier and protocol version sent to Bedrock
//! - Defaults applied to requests that omit optional fields
//! - Upstream base URL for the image generation relay

use serde::{Deserialize, Serialize};

/// Claude 3.5 Sonnet on Bedrock
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-5-sonnet-20240620-v1:0";

/// Protocol marker Bedrock expects in every Anthropic request body
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_PORT: u16 = 3001;

/// Complete relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Named profile from the shared AWS config/credentials files
    pub aws_profile: String,
    /// AWS region hosting the model
    pub aws_region: String,
    /// Bedrock model identifier every request is sent to
    pub model_id: String,
    /// Value of `anthropic_version` in outbound bodies
    pub anthropic_version: String,
    /// Used when the caller omits `max_tokens`
    pub default_max_tokens: u32,
    /// Used when the caller omits `temperature`
    pub default_temperature: f64,
    /// OpenAI API base for the image generation relay
    pub openai_api_base: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("RELAY_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("RELAY_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            aws_profile: std::env::var("AWS_PROFILE").unwrap_or_else(|_| "dev".to_string()),
            aws_region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            model_id: std::env::var("BEDROCK_MODEL_ID")
                .unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string()),
            anthropic_version: ANTHROPIC_VERSION.to_string(),
            default_max_tokens: DEFAULT_MAX_TOKENS,
            default_temperature: DEFAULT_TEMPERATURE,
            openai_api_base: std::env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
        }
    }
}

impl RelayConfig {
    /// `host:port` string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
