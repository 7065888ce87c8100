use std::path::PathBuf;

/// Process-level settings, read once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub providers_path: PathBuf,
    /// Upper bound on a single provider call before it counts as transient.
    pub provider_timeout_secs: u64,
    pub positive_threshold: f32,
    pub negative_threshold: f32,
    /// At most [`crate::MAX_SAMPLE_EXCERPTS`].
    pub max_excerpts: usize,
    pub keyword_limit: usize,
    pub user_agent: String,
}
