//! Capability contract every opinion source implements.

use async_trait::async_trait;
use pov_core::{Category, Query};

use crate::error::ProviderError;
use crate::types::RawItem;

/// A data source that can return evidence for a query.
///
/// The orchestrator only calls [`Provider::fetch`] for categories listed in
/// [`Provider::categories`]. Successful calls return items of a single
/// [`RawItem`] variant; an empty `Vec` is a valid (if useless) answer.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier used in logs and resolutions.
    fn name(&self) -> &str;

    fn categories(&self) -> &[Category];

    fn supports(&self, category: Category) -> bool {
        self.categories().contains(&category)
    }

    /// Fetch raw evidence for `query`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] tagged `not_found`, `transient`, or
    /// `malformed`.
    async fn fetch(&self, query: &Query) -> Result<Vec<RawItem>, ProviderError>;
}
