//! Reasoning service boundary: prompt text in, reply text out

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::AdvisorConfig;
use crate::error::ServiceError;

/// A text-completion backend
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Complete `prompt`; any failure is a `ServiceError`
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError>;
}

#[async_trait]
impl<T: ReasoningService + ?Sized> ReasoningService for Box<T> {
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        (**self).complete(prompt).await
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Client for an Ollama-compatible `/api/generate` endpoint
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    url: String,
    model: String,
    timeout_secs: u64,
}

impl OllamaClient {
    pub fn new(config: &AdvisorConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            url: config.generate_url(),
            model: config.model.clone(),
            timeout_secs: config.timeout.as_secs(),
        })
    }

    fn map_error(&self, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::Timeout(self.timeout_secs)
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl ReasoningService for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        debug!("POST {} (model {}, {} prompt chars)", self.url, self.model, prompt.len());

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| self.map_error(e))?;
        if body.response.trim().is_empty() {
            return Err(ServiceError::EmptyReply);
        }
        Ok(body.response)
    }
}

/// Service that is never reachable; forces rule-based analysis
#[derive(Debug, Clone, Default)]
pub struct OfflineService;

#[async_trait]
impl ReasoningService for OfflineService {
    async fn complete(&self, _prompt: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Unavailable("offline mode".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_service_always_fails() {
        let err = OfflineService.complete("anything").await.unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_transport_error() {
        let config = AdvisorConfig {
            // Port 9 (discard) on loopback refuses connections
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout: std::time::Duration::from_secs(2),
            ..AdvisorConfig::default()
        };
        let client = OllamaClient::new(&config).unwrap();
        let err = client.complete("hello").await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_) | ServiceError::Timeout(_)));
    }

    #[test]
    fn test_request_body() {
        let body = serde_json::to_value(GenerateRequest {
            model: "llama3.2",
            prompt: "hi",
            stream: false,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"model": "llama3.2", "prompt": "hi", "stream": false}));
    }
}
