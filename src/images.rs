//! Image relay endpoints.
//!
//! - POST /proxy/v1/images/generations: forward to the OpenAI image API
//! - GET /fetch-image?url=...: fetch a remote image and return its bytes

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{RelayError, RelayResult};
use crate::server::RelayState;

const FALLBACK_IMAGE_TYPE: &str = "image/png";

// ============================================================================
// IMAGE GENERATION PROXY
// ============================================================================

/// POST /proxy/v1/images/generations
///
/// The body and the caller's `Authorization` header are forwarded untouched;
/// the relay holds no OpenAI credentials of its own.
pub async fn proxy_image_generation(
    State(state): State<Arc<RelayState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> RelayResult<Json<serde_json::Value>> {
    let body = body?;
    let url = format!(
        "{}/images/generations",
        state.config.openai_api_base.trim_end_matches('/')
    );
    debug!("Forwarding image generation to {}", url);

    let mut request = state
        .http
        .post(&url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body);
    if let Some(auth) = headers.get(header::AUTHORIZATION) {
        request = request.header(header::AUTHORIZATION, auth.clone());
    }

    let result = async {
        let resp = request.send().await?.error_for_status()?;
        Ok::<_, RelayError>(resp.json::<serde_json::Value>().await?)
    }
    .await;

    result.map(Json).map_err(|e| {
        warn!("Image generation relay failed: {}", e);
        e
    })
}

// ============================================================================
// IMAGE FETCH
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FetchImageQuery {
    pub url: Option<String>,
}

/// GET /fetch-image?url=<url>
pub async fn fetch_image(
    State(state): State<Arc<RelayState>>,
    Query(query): Query<FetchImageQuery>,
) -> RelayResult<Response> {
    let url = query
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| RelayError::unclassified("Missing required query parameter: url"))?;

    let resp = state
        .http
        .get(&url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| {
            warn!("Image fetch failed for {}: {}", url, e);
            RelayError::from(e)
        })?;

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(FALLBACK_IMAGE_TYPE)
        .to_string();
    let bytes = resp.bytes().await?;

    debug!("Fetched {} bytes ({}) from {}", bytes.len(), content_type, url);
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
