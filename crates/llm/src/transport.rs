//! Shared HTTP transport for streaming LLM backends.
//!
//! `Transport` wraps a `reqwest::Client` with pre-configured headers and
//! a base URL. Backends build their requests through [`Transport::post`]
//! and own the response parsing.

use anyhow::Result;
use reqwest::{
    Client, RequestBuilder,
    header::{self, HeaderMap, HeaderValue},
};
use serde::Serialize;

/// Pre-configured HTTP transport: client, headers, base URL.
#[derive(Clone)]
pub struct Transport {
    client: Client,
    headers: HeaderMap,
    base_url: String,
}

impl Transport {
    /// Create a transport with Bearer token authentication.
    pub fn bearer(client: Client, key: &str, base_url: &str) -> Result<Self> {
        let mut headers = json_headers();
        headers.insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(Self {
            client,
            headers,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Create a transport without authentication (e.g. Ollama).
    pub fn no_auth(client: Client, base_url: &str) -> Self {
        Self {
            client,
            headers: json_headers(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Build a POST request against `path` with a JSON body.
    ///
    /// The builder is fully owned — it can be driven after the
    /// transport borrow ends.
    pub fn post(&self, path: &str, body: &impl Serialize) -> RequestBuilder {
        if let Ok(body) = serde_json::to_string(body) {
            tracing::trace!("request: {}", body);
        }
        self.client
            .post(format!("{}{path}", self.base_url))
            .headers(self.headers.clone())
            .json(body)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}
