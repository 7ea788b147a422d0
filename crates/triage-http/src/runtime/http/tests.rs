//! Tests for the HTTP runtime, driving the router end to end through
//! `tower::ServiceExt::oneshot`.

use super::TriageRuntime;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use triage_core::{HistoryLedger, LabelRegistry, PredictionPipeline};
use triage_testing::{MockClassifier, scripted_distribution};

/// Helper to build a runtime around a mock classifier.
fn runtime_with(classifier: MockClassifier) -> TriageRuntime {
    let pipeline = PredictionPipeline::new(
        Box::new(classifier),
        LabelRegistry::new(),
        HistoryLedger::new(),
    );
    TriageRuntime::new(pipeline)
}

fn predict_request(symptoms: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "symptoms": symptoms }).to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let runtime = runtime_with(MockClassifier::new());
    let response = runtime.router().oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "triage-http");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn predict_returns_ranked_top_five() {
    let classifier = MockClassifier::new().with_default_distribution(scripted_distribution(&[
        ("LABEL_12", 0.62),
        ("LABEL_5", 0.10),
        ("LABEL_10", 0.05),
    ]));
    let runtime = runtime_with(classifier);

    let response = runtime
        .router()
        .oneshot(predict_request(
            "I have high fever for 3 days, severe headache, muscle pain, weakness and dry cough",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let predictions = json["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 5);
    assert_eq!(predictions[0]["disease"], "Dengue");
    assert!((predictions[0]["confidence"].as_f64().unwrap() - 0.62).abs() < 1e-9);
    assert_eq!(predictions[1]["disease"], "Asthma");

    let confidences: Vec<f64> = predictions
        .iter()
        .map(|entry| entry["confidence"].as_f64().unwrap())
        .collect();
    for pair in confidences.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}

#[tokio::test]
async fn predict_rejects_blank_symptoms_without_invoking_classifier() {
    let classifier = MockClassifier::new().with_default_distribution(scripted_distribution(&[]));
    let probe = classifier.clone();
    let runtime = runtime_with(classifier);

    let response = runtime.router().oneshot(predict_request("   ")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "empty_input");
    assert_eq!(probe.call_count(), 0);
}

#[tokio::test]
async fn predict_surfaces_inference_failure_and_skips_history() {
    let classifier = MockClassifier::new().with_default_failure("model state corrupted");
    let runtime = runtime_with(classifier);

    let response = runtime
        .clone()
        .router()
        .oneshot(predict_request("fever"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"], "inference_failed");
    assert_eq!(json["details"]["cause"], "model state corrupted");

    let history = runtime.router().oneshot(get_request("/history")).await.unwrap();
    let json = body_json(history).await;
    assert_eq!(json["history"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn predict_reports_label_mismatch_as_internal_fault() {
    let classifier = MockClassifier::new()
        .with_default_distribution(vec![("LABEL_99".to_string(), 1.0)]);
    let runtime = runtime_with(classifier);

    let response = runtime.router().oneshot(predict_request("fever")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "label_mismatch");
    assert_eq!(json["details"]["label"], "LABEL_99");
}

#[tokio::test]
async fn history_reflects_completed_predictions_oldest_first() {
    let classifier = MockClassifier::new()
        .with_distribution("fever", scripted_distribution(&[("LABEL_12", 0.62)]))
        .with_distribution("wheezing", scripted_distribution(&[("LABEL_5", 0.71)]));
    let runtime = runtime_with(classifier);

    for symptoms in ["fever", "wheezing"] {
        let response = runtime
            .clone()
            .router()
            .oneshot(predict_request(symptoms))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = runtime.clone().router().oneshot(get_request("/history")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let history = json["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["symptoms"], "fever");
    assert_eq!(history[0]["prediction"], "Dengue");
    assert_eq!(history[1]["symptoms"], "wheezing");
    assert_eq!(history[1]["prediction"], "Asthma");
    assert!(history[0]["timestamp"].is_string());
}

#[tokio::test]
async fn history_reads_are_idempotent() {
    let classifier = MockClassifier::new()
        .with_default_distribution(scripted_distribution(&[("LABEL_30", 0.8)]));
    let runtime = runtime_with(classifier);

    let response = runtime
        .clone()
        .router()
        .oneshot(predict_request("chills and sweating"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let first = body_json(
        runtime.clone().router().oneshot(get_request("/history")).await.unwrap(),
    )
    .await;
    let second = body_json(
        runtime.clone().router().oneshot(get_request("/history")).await.unwrap(),
    )
    .await;
    assert_eq!(first, second);
    assert_eq!(first["history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn diseases_endpoint_lists_the_full_registry() {
    let runtime = runtime_with(MockClassifier::new());
    let response = runtime.router().oneshot(get_request("/diseases")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 41);
    let diseases = json["diseases"].as_array().unwrap();
    assert_eq!(diseases.len(), 41);
    assert_eq!(diseases[0], "Acne");
    assert_eq!(diseases[40], "Varicose veins");
}
