//! # Triage HTTP
//!
//! Axum transport for the symptom triage core. Status-code mapping preserves
//! the pipeline's three-way outcome distinction: 200 success, 400 validation
//! failure, 502 inference failure (integrity faults map to 500).

pub mod runtime;

pub use runtime::{HttpRuntimeConfig, TriageRuntime};
