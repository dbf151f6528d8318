//! epifund-common — Shared types, errors, and configuration used across all epifund crates.

pub mod config;
pub mod datasets;
pub mod error;

// Re-export commonly used types
pub use config::{AppConfig, DatasetEntry, ServerConfig};
pub use datasets::DatasetSource;
pub use error::{AggregationError, LoadError};
