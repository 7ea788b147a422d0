//! # Mock Classifier for Testing
//!
//! A classifier double that returns predictable distributions, allowing
//! pipeline and transport tests to run without a real inference backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use triage_core::{Classifier, InferenceError, LabelRegistry, LabelScore};

/// A mock classifier that returns scripted distributions based on input text.
///
/// Call tracking lives behind shared handles, so a clone kept by the test
/// still observes calls made through the clone handed to the pipeline.
#[derive(Debug, Clone)]
pub struct MockClassifier {
    responses: HashMap<String, Result<Vec<LabelScore>, InferenceError>>,
    default_response: Option<Result<Vec<LabelScore>, InferenceError>>,
    call_count: Arc<Mutex<usize>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClassifier {
    /// Create a new mock with no scripted responses.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            default_response: None,
            call_count: Arc::new(Mutex::new(0)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script a distribution for a specific input text.
    pub fn with_distribution(
        mut self,
        input: impl Into<String>,
        distribution: Vec<(String, f64)>,
    ) -> Self {
        self.responses
            .insert(input.into(), Ok(to_scores(distribution)));
        self
    }

    /// Script a failure for a specific input text.
    pub fn with_failure(mut self, input: impl Into<String>, cause: impl Into<String>) -> Self {
        self.responses
            .insert(input.into(), Err(InferenceError::new(cause)));
        self
    }

    /// Set a distribution returned for any unmatched input.
    pub fn with_default_distribution(mut self, distribution: Vec<(String, f64)>) -> Self {
        self.default_response = Some(Ok(to_scores(distribution)));
        self
    }

    /// Set a failure returned for any unmatched input.
    pub fn with_default_failure(mut self, cause: impl Into<String>) -> Self {
        self.default_response = Some(Err(InferenceError::new(cause)));
        self
    }

    /// Number of times `classify` has been invoked.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Inputs passed to `classify`, in call order.
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().unwrap().clone()
    }

    /// Check whether `classify` was invoked with a specific input.
    pub fn was_called_with(&self, input: &str) -> bool {
        self.call_history
            .lock()
            .unwrap()
            .contains(&input.to_string())
    }

    /// Reset call count and history.
    pub fn reset(&self) {
        *self.call_count.lock().unwrap() = 0;
        self.call_history.lock().unwrap().clear();
    }
}

impl Classifier for MockClassifier {
    fn classify(&mut self, text: &str) -> Result<Vec<LabelScore>, InferenceError> {
        *self.call_count.lock().unwrap() += 1;
        self.call_history.lock().unwrap().push(text.to_string());

        if let Some(response) = self.responses.get(text) {
            response.clone()
        } else if let Some(default) = &self.default_response {
            default.clone()
        } else {
            Err(InferenceError::new(format!(
                "no scripted distribution for: {}",
                text
            )))
        }
    }
}

fn to_scores(distribution: Vec<(String, f64)>) -> Vec<LabelScore> {
    distribution
        .into_iter()
        .map(|(label, score)| LabelScore::new(label, score))
        .collect()
}

/// Build a full registry-sized distribution with the given peaks.
///
/// The residual probability mass is spread uniformly over the remaining
/// labels, so the whole distribution sums to ~1.0 like a real pipeline
/// output.
pub fn scripted_distribution(peaks: &[(&str, f64)]) -> Vec<(String, f64)> {
    let total = LabelRegistry::new().len();
    let peak_mass: f64 = peaks.iter().map(|(_, score)| score).sum();
    let residual = (1.0 - peak_mass) / (total - peaks.len()) as f64;
    (0..total)
        .map(|position| {
            let label = format!("LABEL_{}", position);
            let score = peaks
                .iter()
                .find(|(peak, _)| *peak == label)
                .map(|(_, score)| *score)
                .unwrap_or(residual);
            (label, score)
        })
        .collect()
}
