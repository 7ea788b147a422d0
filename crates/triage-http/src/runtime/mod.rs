//! HTTP runtime: router, handlers and configuration.

pub mod config;
pub mod http;

pub use config::HttpRuntimeConfig;
pub use http::TriageRuntime;
