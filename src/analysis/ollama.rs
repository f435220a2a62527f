//! Ollama HTTP client.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::AnalysisClient;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisErrorKind, Result};

/// Blocking client for an Ollama-compatible server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    generate_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

/// Request body for `/api/generate`.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from `/api/generate`.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Response body from `/api/tags`.
#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaClient {
    /// Creates a client for the configured endpoint and timeout.
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AnalysisErrorKind::Http(e.to_string()))?;

        Ok(Self {
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            generate_url: config.generate_url(),
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Returns the server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, e: &reqwest::Error) -> AnalysisErrorKind {
        if e.is_connect() {
            AnalysisErrorKind::Connection {
                url: self.base_url.clone(),
            }
        } else if e.is_timeout() {
            AnalysisErrorKind::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            AnalysisErrorKind::Http(e.to_string())
        }
    }

    fn check_status(
        response: reqwest::blocking::Response,
    ) -> std::result::Result<reqwest::blocking::Response, AnalysisErrorKind> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        warn!(status = status.as_u16(), "analysis endpoint returned an error");
        Err(AnalysisErrorKind::Status {
            status: status.as_u16(),
            body: error_message(&body),
        })
    }
}

impl AnalysisClient for OllamaClient {
    fn generate(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> std::result::Result<String, AnalysisErrorKind> {
        let body = GenerateRequest {
            model,
            prompt,
            system,
            stream: false,
        };

        let response = self
            .client
            .post(&self.generate_url)
            .json(&body)
            .send()
            .map_err(|e| self.map_send_error(&e))?;

        let parsed: GenerateResponse = Self::check_status(response)?
            .json()
            .map_err(|e| AnalysisErrorKind::Response(e.to_string()))?;

        Ok(parsed.response)
    }

    fn list_models(&self) -> std::result::Result<Vec<String>, AnalysisErrorKind> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.map_send_error(&e))?;

        let parsed: TagsResponse = Self::check_status(response)?
            .json()
            .map_err(|e| AnalysisErrorKind::Response(e.to_string()))?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }
}

/// Pulls `error` out of an Ollama JSON error body, or returns the body as is.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_string())
}
