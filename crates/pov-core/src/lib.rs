//! Shared domain types and configuration for POV.
//!
//! Holds the query model, the result envelope returned to every caller, and
//! the configuration loaders used by the pipeline and the CLI.

pub mod app_config;
pub mod config;
pub mod envelope;
pub mod providers;
pub mod query;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use envelope::{
    EnvelopeStatus, KeywordCount, KeywordFrequency, ResultEnvelope, MAX_SAMPLE_EXCERPTS,
};
pub use providers::{load_providers, PayloadShape, ProviderEntry, ProvidersFile};
pub use query::{Category, Query, QueryError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read providers file {path}: {source}")]
    ProvidersFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse providers file: {0}")]
    ProvidersFileParse(#[from] serde_yaml::Error),

    #[error("providers file validation failed: {0}")]
    Validation(String),
}
