//! Bedrock Relay
//!
//! A small HTTP relay that accepts chat-completion style requests, reshapes
//! them into Anthropic-on-Bedrock payloads and forwards them to AWS Bedrock.
//!
//! ## Module Structure
//!
//! - `config`: startup configuration and request defaults
//! - `error`: relay error kinds and their HTTP mapping
//! - `types`: inbound and outbound request shapes
//! - `provider`: model invocation seam and the Bedrock implementation
//! - `relay`: the messages endpoint
//! - `images`: image generation and image fetch relays
//! - `server`: shared state, router and startup

pub mod config;
pub mod error;
pub mod images;
pub mod provider;
pub mod relay;
pub mod server;
pub mod types;

pub use config::RelayConfig;
pub use error::{RelayError, RelayResult};
pub use provider::{BedrockInvoker, ModelInvoker};
pub use server::{build_router, run_server, serve, RelayState};
pub use types::{ChatMessage, InboundRequest, OutboundRequest};
