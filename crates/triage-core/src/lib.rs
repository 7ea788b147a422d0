//! # Triage Core
//!
//! Core types for the symptom triage service: the label registry, the
//! classifier seam, the prediction pipeline and the bounded history ledger.
//! Transport and the concrete inference backend live in sibling crates.

pub mod classifier;
pub mod error;
pub mod history;
pub mod labels;
pub mod pipeline;

pub use classifier::{Classifier, LabelScore};
pub use error::{HistoryError, InferenceError, PredictError, UnknownLabel};
pub use history::{DEFAULT_CAPACITY, HistoryLedger, PredictionRecord};
pub use labels::LabelRegistry;
pub use pipeline::{Prediction, PredictionPipeline, RankedDisease, TOP_K};
