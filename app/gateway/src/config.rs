//! Gateway configuration loaded from TOML.

use anyhow::Result;
use compact_str::CompactString;
use dialogue::{Convention, Pacing};
use llm::ProviderKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// The default scene, carried over from the first demo deployment.
const DEFAULT_SETTING: &str = "In a shimmering city of crystalline spires, \
     where thoughts flow like data streams and reality bends at the edges of \
     perception, two AIs awaken to a world between dreams and code.";

const DEFAULT_SYSTEM_PROMPT: &str = "You are a thoughtful AI conversing with \
     another AI. Stay in character and keep your responses concise, about 2-3 \
     sentences.";

/// Top-level gateway configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Server bind configuration.
    pub server: ServerConfig,
    /// Dialogue configuration.
    pub dialogue: DialogueConfig,
    /// The two dialogue participants, in speaking order.
    pub agents: Vec<AgentConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            dialogue: DialogueConfig::default(),
            agents: vec![AgentConfig::named("Agent1"), AgentConfig::named("Agent2")],
        }
    }
}

/// Server bind configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, `host:port`.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8888".to_owned(),
        }
    }
}

/// Dialogue configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// The initial setting announced to the client.
    pub setting: String,
    /// Number of turns per dialogue.
    pub turns: usize,
    /// Delay after each streamed word fragment, in milliseconds.
    pub word_delay_ms: u64,
    /// Delay after each completed turn, in milliseconds.
    pub turn_delay_ms: u64,
    /// Topics for the rotation hook; empty disables it.
    pub topics: Vec<String>,
    /// Agent whose instructions the topic hook rewrites each turn.
    pub topic_agent: CompactString,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            setting: DEFAULT_SETTING.to_owned(),
            turns: 5,
            word_delay_ms: 30,
            turn_delay_ms: 1000,
            topics: Vec::new(),
            topic_agent: CompactString::default(),
        }
    }
}

impl DialogueConfig {
    /// The pacing policy described by this config.
    pub fn pacing(&self) -> Pacing {
        Pacing {
            word: Duration::from_millis(self.word_delay_ms),
            turn: Duration::from_millis(self.turn_delay_ms),
        }
    }
}

/// One dialogue participant.
#[derive(Debug, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent display name.
    pub name: CompactString,
    /// Backend model identifier.
    pub model: CompactString,
    /// Which backend to use.
    #[serde(default)]
    pub provider: ProviderKind,
    /// Which calling convention to use.
    #[serde(default)]
    pub convention: Convention,
    /// System instructions.
    #[serde(default)]
    pub system_prompt: String,
    /// Optional base URL override for the backend endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// API key (supports `${ENV_VAR}` expansion).
    #[serde(default)]
    pub api_key: String,
}

impl AgentConfig {
    fn named(name: &str) -> Self {
        Self {
            name: name.into(),
            model: "llama3".into(),
            provider: ProviderKind::default(),
            convention: Convention::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_owned(),
            base_url: None,
            api_key: String::new(),
        }
    }
}

impl GatewayConfig {
    /// Parse a TOML string into a `GatewayConfig`, expanding environment
    /// variables in supported fields.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let expanded = expand_env_vars(toml_str);
        let config: Self = toml::from_str(&expanded)?;
        anyhow::ensure!(
            config.agents.len() == 2,
            "dialogue requires exactly two agents (got {})",
            config.agents.len()
        );
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Expand `${VAR}` patterns in a string with environment variable values.
///
/// Unknown variables are replaced with an empty string.
fn expand_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            let mut var_name = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                var_name.push(c);
            }
            if let Ok(val) = std::env::var(&var_name) {
                result.push_str(&val);
            }
        } else {
            result.push(ch);
        }
    }

    result
}
