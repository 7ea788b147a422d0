//! # Triage Testing
//!
//! Test doubles for the classifier seam. `MockClassifier` implements the
//! same contract as the production adapter, so any component taking a
//! [`triage_core::Classifier`] can run against scripted distributions and
//! faults.

pub mod mock_classifier;

pub use mock_classifier::{MockClassifier, scripted_distribution};
