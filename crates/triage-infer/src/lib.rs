//! # Triage Infer
//!
//! Concrete [`triage_core::Classifier`] implementations. The model itself is
//! an external capability; this crate only adapts it behind the core's seam.

pub mod rest;

pub use rest::RestClassifier;
