//! Model provider seam
//!
//! The relay talks to the model through `ModelInvoker`. Production uses
//! `BedrockInvoker`, built once at startup; tests plug in their own.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockruntime::config::Region;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use tracing::debug;

use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult};

/// Invokes a hosted model with a pre-serialized request body
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Returns the raw response body on success
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> RelayResult<Vec<u8>>;
}

/// Bedrock runtime client, safe to share across handlers
#[derive(Clone, Debug)]
pub struct BedrockInvoker {
    client: Client,
}

impl BedrockInvoker {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Resolve credentials from the configured profile and region
    pub async fn from_config(config: &RelayConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(&config.aws_profile)
            .region(Region::new(config.aws_region.clone()))
            .load()
            .await;

        debug!(
            "Bedrock client: profile={} region={}",
            config.aws_profile, config.aws_region
        );
        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl ModelInvoker for BedrockInvoker {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> RelayResult<Vec<u8>> {
        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(output.body.into_inner())
    }
}

/// Service errors carry a code and message; everything else is unclassified
fn map_sdk_error<E, R>(err: SdkError<E, R>) -> RelayError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err.as_service_error() {
        Some(service_err) => provider_error(service_err.code(), service_err.message()),
        None => RelayError::Unclassified(DisplayErrorContext(&err).to_string()),
    }
}

fn provider_error(code: Option<&str>, message: Option<&str>) -> RelayError {
    RelayError::provider(code.unwrap_or("Unknown"), message.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_with_metadata() {
        let err = provider_error(Some("ThrottlingException"), Some("rate exceeded"));
        assert_eq!(err.to_string(), "ThrottlingException - rate exceeded");
    }

    #[test]
    fn test_provider_error_missing_metadata() {
        let err = provider_error(None, None);
        assert!(matches!(
            err,
            RelayError::Provider { ref code, ref message } if code == "Unknown" && message.is_empty()
        ));
    }
}
