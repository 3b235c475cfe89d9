//! Messages relay endpoint.
//!
//! POST /proxy/v1/messages: reshape the caller's chat request into an
//! Anthropic-on-Bedrock body, invoke the configured model and pass the
//! provider's JSON straight back.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::error::RelayResult;
use crate::server::RelayState;
use crate::types::InboundRequest;

/// POST /proxy/v1/messages
pub async fn proxy_messages(
    State(state): State<Arc<RelayState>>,
    body: Result<Bytes, BytesRejection>,
) -> RelayResult<Json<serde_json::Value>> {
    let body = body?;
    relay_messages(&state, &body).await.map(Json)
}

/// Parse, reshape, invoke and decode one request
pub async fn relay_messages(state: &RelayState, body: &[u8]) -> RelayResult<serde_json::Value> {
    let outbound = InboundRequest::from_slice(body)?.into_outbound(&state.config);
    let payload = outbound.to_bytes()?;

    let model_id = &state.config.model_id;
    info!("Invoking model: {}", model_id);

    let response = state.invoker.invoke_model(model_id, payload).await?;
    Ok(serde_json::from_slice(&response)?)
}
