//! Orchestration of a single prediction request.

use std::cmp::Ordering;
use std::sync::Mutex;

use chrono::Utc;
use serde::Serialize;

use crate::classifier::Classifier;
use crate::error::{InferenceError, PredictError};
use crate::history::{HistoryLedger, PredictionRecord};
use crate::labels::LabelRegistry;

/// Number of top-ranked entries returned per prediction.
pub const TOP_K: usize = 5;

/// One ranked candidate disease.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDisease {
    pub disease: String,
    pub confidence: f64,
}

/// Successful prediction outcome: up to [`TOP_K`] entries, rank 1 first,
/// confidences non-increasing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub ranked: Vec<RankedDisease>,
}

/// Validates input, invokes the classifier, resolves labels, ranks the
/// distribution and records successful outcomes in the history ledger.
///
/// The classifier sits behind a mutex: the underlying inference capability is
/// not assumed to tolerate concurrent invocation, so `classify` runs in a
/// single critical section even when the surrounding server handles
/// connections concurrently.
pub struct PredictionPipeline {
    classifier: Mutex<Box<dyn Classifier>>,
    registry: LabelRegistry,
    history: HistoryLedger,
}

impl PredictionPipeline {
    pub fn new(
        classifier: Box<dyn Classifier>,
        registry: LabelRegistry,
        history: HistoryLedger,
    ) -> Self {
        Self {
            classifier: Mutex::new(classifier),
            registry,
            history,
        }
    }

    pub fn registry(&self) -> &LabelRegistry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// Run one prediction request to its terminal outcome.
    ///
    /// Empty (post-trim) input fails before the classifier is invoked. On
    /// success the ranked list carries 1–[`TOP_K`] entries and a record of
    /// the rank-1 result is appended to the history ledger; no error path
    /// writes history. Nothing is retried.
    pub fn predict(&self, raw_text: &str) -> Result<Prediction, PredictError> {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() {
            return Err(PredictError::EmptyInput);
        }

        let distribution = {
            let mut classifier =
                self.classifier
                    .lock()
                    .map_err(|e| InferenceError::new(format!("classifier lock poisoned: {}", e)))?;
            classifier.classify(trimmed)?
        };
        if distribution.is_empty() {
            return Err(PredictError::EmptyDistribution);
        }

        let mut ranked = Vec::with_capacity(distribution.len());
        for entry in distribution {
            let disease = self.registry.resolve(&entry.label)?;
            ranked.push(RankedDisease {
                disease: disease.to_string(),
                confidence: entry.score,
            });
        }

        // Stable sort: exactly equal scores keep the classifier's native
        // emission order.
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(TOP_K);

        let top = &ranked[0];
        self.history.append(PredictionRecord {
            timestamp: Utc::now(),
            symptoms: raw_text.to_string(),
            prediction: top.disease.clone(),
            confidence: top.confidence,
        })?;

        tracing::debug!(
            prediction = %top.disease,
            confidence = top.confidence,
            "prediction completed"
        );

        Ok(Prediction { ranked })
    }
}
