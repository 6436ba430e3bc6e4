//! The categorization pipeline state machine
//!
//! START → REMOTE_ATTEMPTED → (ACCEPTED | KEYWORD_ATTEMPTED) → ACCEPTED.
//! One attempt per layer per call, no automatic retries. A manual category
//! short-circuits from START. The keyword layer cannot fail, so every call
//! terminates in ACCEPTED with a taxonomy-valid category — a transaction can
//! never leave the pipeline uncategorized.
//!
//! With no remote classifier configured (or an unavailable one) the pipeline
//! is a pure function of its inputs; the remote layer is the only source of
//! run-to-run variation.

use tracing::{debug, warn};

use crate::config::ClassifierConfig;
use crate::error::{Error, Result};
use crate::models::{Categorization, CategorizationMethod};
use crate::taxonomy::Category;

use super::{ClassifierClient, KeywordClassifier, RemoteClassifier};

/// Pipeline states. Terminal state carries the accepted result.
#[derive(Debug, Clone, PartialEq)]
enum State {
    Start,
    /// The remote layer has had its single attempt; Some on a usable result
    RemoteAttempted(Option<Categorization>),
    KeywordAttempted(Categorization),
    Accepted(Categorization),
}

/// Orchestrates remote → keyword → manual categorization
#[derive(Clone, Default)]
pub struct CategorizationPipeline {
    remote: Option<RemoteClassifier>,
    keyword: KeywordClassifier,
}

impl CategorizationPipeline {
    /// Create a pipeline with an optional remote layer
    pub fn new(remote: Option<RemoteClassifier>) -> Self {
        Self {
            remote,
            keyword: KeywordClassifier::new(),
        }
    }

    /// Keyword-only pipeline (no remote classifier configured)
    pub fn keyword_only() -> Self {
        Self::new(None)
    }

    /// Build from a resolved config: the remote layer exists only when a
    /// classifier host is configured
    pub fn from_config(config: &ClassifierConfig) -> Self {
        let remote = ClassifierClient::from_config(config)
            .map(|client| RemoteClassifier::new(client, config.accept_threshold));
        Self::new(remote)
    }

    /// Whether a remote layer is configured
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Categorize a transaction description.
    ///
    /// Errors only for invalid input (empty description, non-finite amount,
    /// unknown manual label). Categorization itself cannot fail: the keyword
    /// layer guarantees a result.
    pub async fn categorize(
        &self,
        description: &str,
        amount: Option<f64>,
        manual: Option<&str>,
    ) -> Result<Categorization> {
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::Validation(
                "description must be non-empty".to_string(),
            ));
        }
        if let Some(a) = amount {
            if !a.is_finite() {
                return Err(Error::Validation(format!("amount must be finite: {}", a)));
            }
        }

        // Manual entry bypasses both classifiers
        if let Some(label) = manual {
            let category = Category::normalize(label)
                .ok_or_else(|| Error::Validation(format!("Unknown category: {}", label)))?;
            debug!(category = %category, "Manual category accepted");
            return Ok(Categorization {
                category,
                confidence: 1.0,
                method: CategorizationMethod::Manual,
            });
        }

        let mut state = State::Start;
        let accepted = loop {
            state = match state {
                State::Start => {
                    let outcome = match &self.remote {
                        Some(remote) => match remote.classify(description, amount).await {
                            Ok(result) => Some(result),
                            Err(e) => {
                                warn!(error = %e, "Remote classification unusable, falling back");
                                None
                            }
                        },
                        None => None,
                    };
                    State::RemoteAttempted(outcome)
                }
                State::RemoteAttempted(Some(result)) => State::Accepted(result),
                State::RemoteAttempted(None) => {
                    State::KeywordAttempted(self.keyword.classify(description, amount))
                }
                State::KeywordAttempted(result) => State::Accepted(result),
                State::Accepted(result) => break result,
            };
        };

        debug!(
            category = %accepted.category,
            method = %accepted.method,
            confidence = accepted.confidence,
            "Categorization accepted"
        );
        Ok(accepted)
    }
}
