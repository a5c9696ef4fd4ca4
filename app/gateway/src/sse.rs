//! SSE server — axum routes and the stream handler.

use crate::{GatewayConfig, config::AgentConfig, publish::publish};
use anyhow::Result;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Sse},
    routing::get,
};
use dialogue::{Agent, Dialogue, TopicRotation};
use llm::{Client, Provider, build_provider};
use std::sync::Arc;

/// Embedded demo page.
const INDEX_HTML: &str = include_str!("../static/index.html");

/// Shared per-process state: immutable config and a pooled HTTP client.
///
/// Nothing here is dialogue state — every stream builds its own agents.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration.
    pub config: Arc<GatewayConfig>,
    /// Shared HTTP client for backend calls.
    pub client: Client,
}

/// Build the axum router with the `/` and `/stream` endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/stream", get(stream_handler))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Open a dialogue stream.
///
/// Each request constructs fresh agents with empty memory; nothing
/// survives the connection. Disconnecting drops the stream, which
/// cancels any in-flight backend call.
async fn stream_handler(State(state): State<AppState>) -> impl IntoResponse {
    match build_dialogue(&state) {
        Ok(dialogue) => Sse::new(publish(dialogue.run())).into_response(),
        Err(e) => {
            tracing::error!("failed to build dialogue: {e:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to start dialogue").into_response()
        }
    }
}

fn build_agent(config: &AgentConfig, client: &Client) -> Result<Agent<Provider>> {
    let provider = build_provider(
        config.provider,
        client.clone(),
        config.base_url.as_deref(),
        &config.api_key,
    )?;
    Ok(Agent::new(config.name.clone(), config.model.clone(), provider)
        .system_prompt(config.system_prompt.clone())
        .convention(config.convention))
}

fn build_dialogue(state: &AppState) -> Result<Dialogue<Provider, TopicRotation>> {
    let config = &state.config;
    let [first, second] = &config.agents[..] else {
        anyhow::bail!("dialogue requires exactly two agents");
    };

    let first = build_agent(first, &state.client)?;
    let second = build_agent(second, &state.client)?;
    let hook = TopicRotation::new(
        config.dialogue.topic_agent.clone(),
        config.dialogue.topics.clone(),
    );

    Ok(
        Dialogue::new(first, second, config.dialogue.setting.clone(), config.dialogue.turns)
            .pacing(config.dialogue.pacing())
            .hook(hook),
    )
}
