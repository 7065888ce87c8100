//! Provider chain configuration loaded from YAML.
//!
//! Each entry describes one relay endpoint. Order within the file is the
//! fallback priority order for every category the entry declares.
//!
//! ```yaml
//! providers:
//!   - name: movie-relay
//!     categories: [movie]
//!     base_url: https://relay.example.com/imdb/rating
//!     shape: rating
//!     token_env: POV_MOVIE_RELAY_TOKEN
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::query::Category;
use crate::ConfigError;

/// JSON document layout a relay endpoint answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// `{"items": [{"text": "..."}]}`
    Posts,
    /// `{"rating": 8.5, "scale_min": 0, "scale_max": 10, "rating_count": 10}`
    Rating,
    /// `{"stars_stat": {"1": "5%", ...}, "total_reviews": 10}`
    StarHistogram,
}

impl PayloadShape {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PayloadShape::Posts => "posts",
            PayloadShape::Rating => "rating",
            PayloadShape::StarHistogram => "star_histogram",
        }
    }
}

impl std::fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Clone, Deserialize)]
pub struct ProviderEntry {
    pub name: String,
    pub categories: Vec<Category>,
    pub base_url: String,
    pub shape: PayloadShape,
    /// Name of the env var holding the bearer token, if the relay needs one.
    pub token_env: Option<String>,
    /// Resolved from `token_env` by [`ProvidersFile::resolve_tokens`].
    #[serde(skip)]
    pub bearer_token: Option<String>,
}

impl ProviderEntry {
    /// `false` when the entry names a `token_env` that did not resolve.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.token_env.is_none() || self.bearer_token.is_some()
    }
}

impl std::fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderEntry")
            .field("name", &self.name)
            .field("categories", &self.categories)
            .field("base_url", &self.base_url)
            .field("shape", &self.shape)
            .field("token_env", &self.token_env)
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersFile {
    pub providers: Vec<ProviderEntry>,
}

impl ProvidersFile {
    /// Fill in `bearer_token` for every entry that names a `token_env`.
    ///
    /// An unset or blank variable leaves the token empty; that entry then
    /// reports [`ProviderEntry::has_credentials`] as `false` and the rest of
    /// the chain is unaffected.
    pub fn resolve_tokens<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        for entry in &mut self.providers {
            let Some(var) = &entry.token_env else {
                continue;
            };
            match lookup(var) {
                Ok(token) if !token.trim().is_empty() => entry.bearer_token = Some(token),
                _ => {
                    tracing::warn!(
                        provider = %entry.name,
                        token_env = %var,
                        "bearer token variable unset; provider disabled"
                    );
                    entry.bearer_token = None;
                }
            }
        }
    }

    /// Entries serving `category`, in priority order.
    pub fn for_category(&self, category: Category) -> impl Iterator<Item = &ProviderEntry> {
        self.providers
            .iter()
            .filter(move |entry| entry.categories.contains(&category))
    }
}

/// Load, validate, and resolve credentials for the provider file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, or fails
/// validation. Unset token variables are not errors.
pub fn load_providers(path: &Path) -> Result<ProvidersFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProvidersFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut providers = parse_providers(&content)?;
    providers.resolve_tokens(|key| std::env::var(key));
    Ok(providers)
}

fn parse_providers(content: &str) -> Result<ProvidersFile, ConfigError> {
    let providers_file: ProvidersFile = serde_yaml::from_str(content)?;
    validate_providers(&providers_file)?;
    Ok(providers_file)
}

fn validate_providers(providers_file: &ProvidersFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for entry in &providers_file.providers {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "provider name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(entry.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate provider name: '{}'",
                entry.name
            )));
        }

        if entry.categories.is_empty() {
            return Err(ConfigError::Validation(format!(
                "provider '{}' must declare at least one category",
                entry.name
            )));
        }

        let base = entry.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "provider '{}' has invalid base_url '{}'; must start with http:// or https://",
                entry.name, entry.base_url
            )));
        }

        if entry
            .token_env
            .as_deref()
            .is_some_and(|var| var.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "provider '{}' has an empty token_env",
                entry.name
            )));
        }
    }

    Ok(())
}
