//! The seam between the pipeline and the external classification capability.

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// One (label identifier, probability) pair from the model's distribution.
///
/// Scores are calibrated confidences in `[0, 1]`, not true posteriors for
/// inputs the model never saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// A pretrained text-classification capability.
///
/// `classify` is blocking and may take seconds. A single invocation either
/// succeeds with the full class distribution (scores summing to ~1.0, in the
/// model's native emission order) or fails entirely; implementations perform
/// no retries and hold no request-scoped state.
///
/// Callers must not pass empty input; the pipeline short-circuits
/// empty/whitespace text before reaching this trait. Implementations are not
/// required to be safe for concurrent invocation, so the pipeline serializes
/// calls through a single critical section.
pub trait Classifier: Send {
    fn classify(&mut self, text: &str) -> Result<Vec<LabelScore>, InferenceError>;
}
