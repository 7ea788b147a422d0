//! HTTP runtime configuration.

/// Transport-level knobs for the triage runtime.
#[derive(Debug, Clone)]
pub struct HttpRuntimeConfig {
    /// Request timeout in seconds. Inference is a blocking, potentially
    /// multi-second call, so this sits well above typical API timeouts.
    pub request_timeout_secs: u64,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
    /// Enable CORS for cross-origin requests.
    pub enable_cors: bool,
    /// Enable the OpenAPI document and Swagger UI.
    pub enable_openapi: bool,
}

impl Default for HttpRuntimeConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 180,
            max_body_size: 1024 * 1024, // 1MB
            enable_cors: true,
            enable_openapi: true,
        }
    }
}
