//! # HTTP Runtime
//!
//! Axum transport for the prediction pipeline and history ledger. The
//! runtime exposes the two core operations (predict, history) plus the
//! read-only disease list and a liveness probe, and maps the pipeline's
//! three-way outcome (success / validation error / inference error) onto
//! unambiguous status codes and error payloads.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use triage_core::{PredictError, PredictionPipeline, PredictionRecord, RankedDisease};

use crate::runtime::config::HttpRuntimeConfig;

/// HTTP server state wrapping the shared prediction pipeline.
#[derive(Clone)]
pub struct TriageRuntime {
    pipeline: Arc<PredictionPipeline>,
}

/// Request body for a prediction.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PredictRequest {
    /// Free-text symptom description.
    #[schema(example = "high fever, severe headache and muscle pain")]
    pub symptoms: String,
}

/// One ranked candidate disease.
#[derive(Debug, Serialize, ToSchema)]
pub struct DiseaseScore {
    /// Human-readable disease name.
    #[schema(example = "Dengue")]
    pub disease: String,
    /// Confidence score in [0, 1].
    #[schema(example = 0.62)]
    pub confidence: f64,
}

impl From<RankedDisease> for DiseaseScore {
    fn from(ranked: RankedDisease) -> Self {
        Self {
            disease: ranked.disease,
            confidence: ranked.confidence,
        }
    }
}

/// Successful prediction response: up to five entries, rank 1 first.
#[derive(Debug, Serialize, ToSchema)]
pub struct PredictResponse {
    pub predictions: Vec<DiseaseScore>,
}

/// One retained history record.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryEntry {
    /// Completion time of the prediction, ISO-8601.
    pub timestamp: DateTime<Utc>,
    /// The original symptom text as submitted.
    pub symptoms: String,
    /// Top-ranked disease name.
    #[schema(example = "Dengue")]
    pub prediction: String,
    /// Confidence of the top-ranked entry.
    #[schema(example = 0.62)]
    pub confidence: f64,
}

impl From<PredictionRecord> for HistoryEntry {
    fn from(record: PredictionRecord) -> Self {
        Self {
            timestamp: record.timestamp,
            symptoms: record.symptoms,
            prediction: record.prediction,
            confidence: record.confidence,
        }
    }
}

/// History snapshot, oldest record first.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

/// The full list of diseases the classifier can report.
#[derive(Debug, Serialize, ToSchema)]
pub struct DiseaseListResponse {
    /// Display names in registry definition order.
    pub diseases: Vec<String>,
    /// Number of known classes.
    #[schema(example = 41)]
    pub total: usize,
}

/// Error response format.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code identifier.
    #[schema(example = "empty_input")]
    pub error: String,
    /// Human-readable error message.
    #[schema(example = "Please enter your symptoms.")]
    pub message: String,
    /// Additional context or details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Symptom Triage API",
        description = "Symptom-to-disease classification with a bounded prediction history"
    ),
    paths(predict, get_history, list_diseases, health_check),
    components(schemas(
        PredictRequest,
        PredictResponse,
        DiseaseScore,
        HistoryResponse,
        HistoryEntry,
        DiseaseListResponse,
        ErrorResponse
    ))
)]
struct ApiDoc;

impl TriageRuntime {
    pub fn new(pipeline: PredictionPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Create the Axum router with default configuration.
    pub fn router(self) -> Router {
        self.router_with_config(HttpRuntimeConfig::default())
    }

    /// Create the Axum router with custom configuration.
    pub fn router_with_config(self, config: HttpRuntimeConfig) -> Router {
        let mut router = Router::new()
            .route("/health", get(health_check))
            .route("/predict", post(predict))
            .route("/history", get(get_history))
            .route("/diseases", get(list_diseases))
            .with_state(self)
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(config.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_secs,
            )));

        if config.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        if config.enable_openapi {
            router = router
                .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
        }

        router
    }
}

/// POST /predict - Classify a symptom description
#[utoipa::path(
    post,
    path = "/predict",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Ranked candidate diseases", body = PredictResponse),
        (status = 400, description = "Empty or whitespace-only symptoms", body = ErrorResponse),
        (status = 502, description = "Inference backend failure", body = ErrorResponse),
        (status = 500, description = "Internal integrity fault", body = ErrorResponse)
    )
)]
async fn predict(
    State(runtime): State<TriageRuntime>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, (StatusCode, Json<ErrorResponse>)> {
    let pipeline = Arc::clone(&runtime.pipeline);
    let symptoms = request.symptoms;

    // Inference may take seconds; keep it off the async workers.
    let outcome = tokio::task::spawn_blocking(move || pipeline.predict(&symptoms))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "prediction task failed to complete");
            internal_error("The prediction task failed.")
        })?;

    let prediction = outcome.map_err(predict_error_response)?;

    Ok(Json(PredictResponse {
        predictions: prediction.ranked.into_iter().map(DiseaseScore::from).collect(),
    }))
}

/// GET /history - Snapshot of retained predictions, oldest first
#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "Retained prediction records", body = HistoryResponse),
        (status = 500, description = "History unavailable", body = ErrorResponse)
    )
)]
async fn get_history(
    State(runtime): State<TriageRuntime>,
) -> Result<Json<HistoryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let snapshot = runtime.pipeline.history().snapshot().map_err(|e| {
        tracing::error!(error = %e, "history snapshot failed");
        internal_error("The prediction history is unavailable.")
    })?;

    Ok(Json(HistoryResponse {
        history: snapshot.into_iter().map(HistoryEntry::from).collect(),
    }))
}

/// GET /diseases - All disease classes the model distinguishes
#[utoipa::path(
    get,
    path = "/diseases",
    responses(
        (status = 200, description = "Known disease classes", body = DiseaseListResponse)
    )
)]
async fn list_diseases(State(runtime): State<TriageRuntime>) -> Json<DiseaseListResponse> {
    let diseases: Vec<String> = runtime
        .pipeline
        .registry()
        .all_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    Json(DiseaseListResponse {
        total: diseases.len(),
        diseases,
    })
}

/// GET /health - Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up"))
)]
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "triage-http",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
    }))
}

/// Map a pipeline error onto a status code and payload, preserving the
/// success / validation / inference distinction in the `error` code.
fn predict_error_response(err: PredictError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        PredictError::EmptyInput => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "empty_input".to_string(),
                message: "Please enter your symptoms.".to_string(),
                details: None,
            }),
        ),
        PredictError::Inference(inference) => {
            tracing::error!(cause = %inference.cause, "inference failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "inference_failed".to_string(),
                    message: "The classification backend failed to produce a prediction."
                        .to_string(),
                    details: Some(serde_json::json!({ "cause": inference.cause })),
                }),
            )
        }
        PredictError::EmptyDistribution => {
            tracing::error!("classifier returned an empty distribution");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "inference_failed".to_string(),
                    message: "The classification backend returned no classes.".to_string(),
                    details: None,
                }),
            )
        }
        PredictError::UnknownLabel(unknown) => {
            tracing::error!(label = %unknown.label, "classifier label missing from registry");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "label_mismatch".to_string(),
                    message: "The classifier emitted a label with no registry entry.".to_string(),
                    details: Some(serde_json::json!({ "label": unknown.label })),
                }),
            )
        }
        PredictError::History(history) => {
            tracing::error!(error = %history, "failed to record prediction");
            internal_error("The prediction could not be recorded.")
        }
    }
}

fn internal_error(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: message.to_string(),
            details: None,
        }),
    )
}

#[cfg(test)]
mod tests;
