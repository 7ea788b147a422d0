//! Classifier adapter for a Hugging Face text-classification endpoint.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use triage_core::{Classifier, InferenceError, LabelScore};

/// Execute an async operation using the current runtime or creating a new one.
///
/// The classifier trait is blocking while the HTTP client is async; this
/// helper bridges the two without panicking if runtime creation fails.
///
/// Must not run on an async worker thread. The HTTP layer already moves
/// `predict` onto a blocking thread, where driving the shared handle is
/// allowed.
fn run_async<F, Fut, T>(f: F) -> Result<T, InferenceError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, InferenceError>>,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle.block_on(f()),
        Err(_) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(f()),
            Err(e) => Err(InferenceError::new(format!(
                "failed to create async runtime: {}",
                e
            ))),
        },
    }
}

/// Adapter over a text-classification inference endpoint.
///
/// Sends `{"inputs": <text>}` and expects the pipeline's full class
/// distribution back, either nested (`[[{label, score}, ...]]`, the
/// single-input pipeline shape) or flat (`[{label, score}, ...]`). One
/// invocation, no retries: any transport, status or decode fault becomes an
/// `InferenceError` carrying the cause.
pub struct RestClassifier {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl RestClassifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, text: &str) -> Result<Vec<LabelScore>, InferenceError> {
        let body = serde_json::json!({ "inputs": text });
        let response = self
            .client
            .post(self.endpoint.as_str())
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| InferenceError::new(format!("inference request failed: {}", e)))?;

        let status = response.status();
        let payload = response
            .text()
            .await
            .map_err(|e| InferenceError::new(format!("failed to read inference response: {}", e)))?;

        if !status.is_success() {
            return Err(InferenceError::new(format!(
                "inference backend returned {}: {}",
                status,
                truncate(&payload, 200)
            )));
        }

        decode_distribution(&payload)
    }
}

impl Classifier for RestClassifier {
    fn classify(&mut self, text: &str) -> Result<Vec<LabelScore>, InferenceError> {
        tracing::debug!(endpoint = %self.endpoint, "dispatching inference request");
        run_async(|| self.request(text))
    }
}

/// Decode a distribution from either the nested or the flat response shape.
fn decode_distribution(payload: &str) -> Result<Vec<LabelScore>, InferenceError> {
    if let Ok(nested) = serde_json::from_str::<Vec<Vec<LabelScore>>>(payload) {
        return nested
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::new("inference backend returned no result rows"));
    }
    serde_json::from_str::<Vec<LabelScore>>(payload)
        .map_err(|e| InferenceError::new(format!("malformed inference response: {}", e)))
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((position, _)) => &text[..position],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_nested_pipeline_shape() {
        let payload = r#"[[{"label": "LABEL_12", "score": 0.62}, {"label": "LABEL_10", "score": 0.05}]]"#;
        let distribution = decode_distribution(payload).unwrap();
        assert_eq!(distribution.len(), 2);
        assert_eq!(distribution[0].label, "LABEL_12");
        assert!((distribution[0].score - 0.62).abs() < 1e-9);
    }

    #[test]
    fn decodes_flat_shape() {
        let payload = r#"[{"label": "LABEL_5", "score": 0.9}]"#;
        let distribution = decode_distribution(payload).unwrap();
        assert_eq!(distribution.len(), 1);
        assert_eq!(distribution[0].label, "LABEL_5");
    }

    #[test]
    fn rejects_empty_nested_response() {
        let err = decode_distribution("[]").unwrap_err();
        assert!(err.cause.contains("no result rows"));
    }

    #[test]
    fn rejects_malformed_payload() {
        let err = decode_distribution(r#"{"error": "loading"}"#).unwrap_err();
        assert!(err.cause.contains("malformed inference response"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("short", 200), "short");
    }
}
