//! Acceptance policy around a classifier backend
//!
//! A backend returns whatever label the model produced. This adapter decides
//! whether that result is usable: the label must map onto the taxonomy and
//! the confidence must clear the acceptance threshold. Anything else is
//! reported as [`Error::ClassificationUnavailable`] — this layer never
//! degrades its own output into a low-quality guess; the pipeline owns the
//! fallback.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Categorization, CategorizationMethod};
use crate::taxonomy::Category;

use super::{ClassifierBackend, ClassifierClient};

/// Remote classification layer: backend + acceptance threshold
#[derive(Clone)]
pub struct RemoteClassifier {
    client: ClassifierClient,
    accept_threshold: f64,
}

impl RemoteClassifier {
    pub fn new(client: ClassifierClient, accept_threshold: f64) -> Self {
        Self {
            client,
            accept_threshold: accept_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Classify a description, returning a usable categorization or
    /// `ClassificationUnavailable`
    pub async fn classify(
        &self,
        description: &str,
        amount: Option<f64>,
    ) -> Result<Categorization> {
        let raw = self
            .client
            .classify(description, amount)
            .await
            .map_err(|e| match e {
                Error::ClassificationUnavailable(_) => e,
                other => Error::ClassificationUnavailable(other.to_string()),
            })?;

        let category = match Category::normalize(&raw.label) {
            Some(c) => c,
            None => {
                warn!(label = %raw.label, "Remote classifier returned unmapped label");
                return Err(Error::ClassificationUnavailable(format!(
                    "unmapped label: {}",
                    raw.label
                )));
            }
        };

        if raw.confidence < self.accept_threshold {
            debug!(
                category = %category,
                confidence = raw.confidence,
                threshold = self.accept_threshold,
                "Remote classification below acceptance threshold"
            );
            return Err(Error::ClassificationUnavailable(format!(
                "confidence {:.2} below threshold {:.2}",
                raw.confidence, self.accept_threshold
            )));
        }

        Ok(Categorization {
            category,
            confidence: raw.confidence,
            method: CategorizationMethod::Remote,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::MockBackend;

    fn remote(backend: MockBackend, threshold: f64) -> RemoteClassifier {
        RemoteClassifier::new(ClassifierClient::Mock(backend), threshold)
    }

    #[tokio::test]
    async fn test_accepts_valid_confident_label() {
        let r = remote(MockBackend::with_label("groceries", 0.9), 0.6);
        let result = r.classify("WHOLE FOODS", None).await.unwrap();
        assert_eq!(result.category, Category::Groceries);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.method, CategorizationMethod::Remote);
    }

    #[tokio::test]
    async fn test_rejects_unmapped_label() {
        let r = remote(MockBackend::with_label("cryptocurrency", 0.95), 0.6);
        let err = r.classify("COINBASE", None).await.unwrap_err();
        assert!(matches!(err, Error::ClassificationUnavailable(_)));
    }

    #[tokio::test]
    async fn test_rejects_low_confidence() {
        let r = remote(MockBackend::with_label("groceries", 0.4), 0.6);
        let err = r.classify("SOME STORE", None).await.unwrap_err();
        assert!(matches!(err, Error::ClassificationUnavailable(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_unavailable() {
        let r = remote(MockBackend::failing(), 0.6);
        let err = r.classify("ANYTHING", None).await.unwrap_err();
        assert!(matches!(err, Error::ClassificationUnavailable(_)));
    }

    #[tokio::test]
    async fn test_threshold_boundary_is_inclusive() {
        // Exactly at the threshold is usable
        let r = remote(MockBackend::with_label("travel", 0.6), 0.6);
        let result = r.classify("DELTA AIR", None).await.unwrap();
        assert_eq!(result.category, Category::Travel);
    }
}
