//! Ollama backend implementation
//!
//! HTTP client for the Ollama generate API. The prompt pins the model to the
//! fixed taxonomy and asks for a JSON object; the response text is parsed by
//! [`super::parsing::parse_label`] since models often wrap the payload in
//! extra prose.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::taxonomy::Category;

use super::parsing::parse_label;
use super::{ClassifierBackend, RemoteLabel};

/// Ollama backend
///
/// Every call is bounded by the configured request timeout; expiry surfaces
/// as a transport error and the pipeline proceeds to the keyword fallback.
#[derive(Clone)]
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: model.to_string(),
        }
    }

    fn build_prompt(description: &str, amount: Option<f64>) -> String {
        let labels = Category::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let amount_line = match amount {
            Some(a) => format!("Amount: {:.2}\n", a),
            None => String::new(),
        };
        format!(
            "Classify this expense description into exactly one category.\n\
             Categories: {labels}\n\
             Description: \"{description}\"\n\
             {amount_line}\
             Respond with only a JSON object: {{\"label\": \"<category>\", \"confidence\": <0.0-1.0>}}"
        )
    }
}

/// Request to the Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from the Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl ClassifierBackend for OllamaBackend {
    async fn classify(&self, description: &str, amount: Option<f64>) -> Result<RemoteLabel> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: Self::build_prompt(description, amount),
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let ollama_response: OllamaResponse = response.json().await?;
        debug!("Ollama classify response: {}", ollama_response.response);

        parse_label(&ollama_response.response)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
