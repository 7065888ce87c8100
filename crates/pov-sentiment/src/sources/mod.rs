//! Concrete provider implementations.

mod relay;
mod relay_payload;

use std::sync::Arc;
use std::time::Duration;

use pov_core::ProvidersFile;

pub use relay::RelayProvider;

use crate::error::SentimentError;
use crate::provider::Provider;

/// Build one relay provider per providers-file entry, in file order.
///
/// Entries whose bearer token did not resolve are left out of every chain.
///
/// # Errors
///
/// Returns [`SentimentError`] if any entry cannot be turned into a client.
pub fn relay_providers(
    file: &ProvidersFile,
    user_agent: &str,
    timeout: Duration,
) -> Result<Vec<Arc<dyn Provider>>, SentimentError> {
    file.providers
        .iter()
        .filter(|entry| {
            if !entry.has_credentials() {
                tracing::debug!(provider = %entry.name, "skipping provider without bearer token");
            }
            entry.has_credentials()
        })
        .map(|entry| {
            RelayProvider::new(entry, user_agent, timeout)
                .map(|provider| Arc::new(provider) as Arc<dyn Provider>)
        })
        .collect()
}
