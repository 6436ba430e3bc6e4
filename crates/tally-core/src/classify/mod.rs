//! Layered transaction categorization
//!
//! This module provides the categorization pipeline and its layers:
//!
//! - `ClassifierBackend` trait: backend-agnostic interface to the remote
//!   text-classification capability
//! - `ClassifierClient` enum: concrete wrapper providing Clone + compile-time
//!   dispatch
//! - Backend implementations: [`OllamaBackend`], [`MockBackend`]
//! - [`RemoteClassifier`]: acceptance policy around a backend (taxonomy
//!   mapping + confidence threshold)
//! - [`KeywordClassifier`]: deterministic rule fallback, never fails
//! - [`CategorizationPipeline`]: remote → keyword → manual orchestration
//!
//! # Usage
//!
//! ```rust,ignore
//! let pipeline = CategorizationPipeline::from_config(&ClassifierConfig::load());
//! let result = pipeline.categorize("Coffee at Starbucks", Some(6.50), None).await?;
//! println!("{} ({:.2})", result.category, result.confidence);
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `TALLY_CLASSIFIER`: Backend to use (ollama, mock). Default: ollama
//! - `OLLAMA_HOST`: Classifier server URL (required for the ollama backend)
//! - `OLLAMA_MODEL`: Model name (default: llama3.2)

mod keyword;
mod mock;
mod ollama;
pub mod parsing;
mod pipeline;
mod remote;

pub use keyword::{KeywordClassifier, FALLBACK_CONFIDENCE, MATCH_CONFIDENCE};
pub use mock::MockBackend;
pub use ollama::OllamaBackend;
pub use pipeline::CategorizationPipeline;
pub use remote::RemoteClassifier;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::error::Result;

/// Raw label + confidence as returned by a remote backend, before any
/// taxonomy mapping or acceptance decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteLabel {
    pub label: String,
    /// Certainty reported by the backend, in [0,1]
    pub confidence: f64,
}

/// Trait defining the interface for remote classifier backends
///
/// Backends should be Send + Sync to allow use across async tasks. A backend
/// returns the raw label it was given; mapping onto the taxonomy and the
/// accept/reject decision belong to [`RemoteClassifier`].
#[async_trait]
pub trait ClassifierBackend: Send + Sync {
    /// Classify a transaction description into a raw label with confidence
    async fn classify(&self, description: &str, amount: Option<f64>) -> Result<RemoteLabel>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete classifier client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum ClassifierClient {
    /// Ollama backend (HTTP API)
    Ollama(OllamaBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl ClassifierClient {
    /// Create a classifier client from environment variables and the config
    /// file. Returns None when no remote classifier is configured — the
    /// pipeline then runs keyword-only.
    pub fn from_env() -> Option<Self> {
        Self::from_config(&ClassifierConfig::load())
    }

    /// Create a classifier client from a resolved config
    ///
    /// Checks `TALLY_CLASSIFIER` to determine which backend to use:
    /// - `ollama` (default): uses the configured host/model/timeout
    /// - `mock`: canned responses for testing
    pub fn from_config(config: &ClassifierConfig) -> Option<Self> {
        let backend =
            std::env::var("TALLY_CLASSIFIER").unwrap_or_else(|_| "ollama".to_string());

        match backend.to_lowercase().as_str() {
            "mock" => Some(ClassifierClient::Mock(MockBackend::new())),
            "ollama" => Self::ollama_from_config(config),
            _ => {
                tracing::warn!(backend = %backend, "Unknown TALLY_CLASSIFIER, falling back to ollama");
                Self::ollama_from_config(config)
            }
        }
    }

    fn ollama_from_config(config: &ClassifierConfig) -> Option<Self> {
        config.host.as_deref().map(|host| {
            ClassifierClient::Ollama(OllamaBackend::new(host, &config.model, config.timeout()))
        })
    }

    /// Create an Ollama backend directly
    pub fn ollama(host: &str, model: &str, timeout: std::time::Duration) -> Self {
        ClassifierClient::Ollama(OllamaBackend::new(host, model, timeout))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        ClassifierClient::Mock(MockBackend::new())
    }
}

// Implement ClassifierBackend for ClassifierClient by delegating to the
// inner backend
#[async_trait]
impl ClassifierBackend for ClassifierClient {
    async fn classify(&self, description: &str, amount: Option<f64>) -> Result<RemoteLabel> {
        match self {
            ClassifierClient::Ollama(b) => b.classify(description, amount).await,
            ClassifierClient::Mock(b) => b.classify(description, amount).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            ClassifierClient::Ollama(b) => b.health_check().await,
            ClassifierClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            ClassifierClient::Ollama(b) => b.model(),
            ClassifierClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            ClassifierClient::Ollama(b) => b.host(),
            ClassifierClient::Mock(b) => b.host(),
        }
    }
}
