//! Duet gateway — HTTP shell streaming two-agent dialogues over SSE.
//!
//! Each `GET /stream` request constructs fresh agents from config,
//! runs one dialogue, and publishes its events as server-sent frames.

pub mod config;
pub mod publish;
pub mod sse;

pub use config::GatewayConfig;
pub use publish::{DONE_SENTINEL, encode, publish};
pub use sse::{AppState, router};
