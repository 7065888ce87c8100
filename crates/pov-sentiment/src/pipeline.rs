//! Fallback orchestration: try providers in order until one yields usable
//! evidence, then reduce that provider's evidence to a [`ResultEnvelope`].
//!
//! Provider calls are sequential and each is bounded by
//! [`SentimentConfig::provider_timeout`]. Exactly one provider backs a
//! successful envelope; evidence is never merged across providers.

use std::sync::Arc;

use pov_core::{AppConfig, Category, ProvidersFile, Query, ResultEnvelope};

use crate::aggregate::{aggregate_scores, aggregate_text};
use crate::classifier::Classifier;
use crate::error::{AggregationError, ProviderErrorKind, SentimentError};
use crate::normalize::normalize_batch;
use crate::provider::Provider;
use crate::scorer::{LexiconScorer, PolarityScorer};
use crate::sources::relay_providers;
use crate::types::{RawItem, SentimentConfig};

/// What happened when one provider was tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Evidence was usable; the envelope was built from it.
    Succeeded { evidence: usize },
    /// The provider reported an error with this tag.
    Failed(ProviderErrorKind),
    /// The call did not finish within the per-call timeout.
    TimedOut,
    /// The call succeeded but nothing usable survived normalization.
    NoEvidence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAttempt {
    pub provider: String,
    pub outcome: AttemptOutcome,
}

/// The envelope plus how it was reached.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub envelope: ResultEnvelope,
    /// Name of the provider whose evidence backs `envelope`.
    pub provider: Option<String>,
    pub attempts: Vec<ProviderAttempt>,
}

enum ChainState {
    Trying(usize),
    Succeeded {
        provider: String,
        envelope: ResultEnvelope,
    },
    Exhausted,
}

/// Entry point for opinion lookups.
///
/// Holds no per-query state, so one instance can serve concurrent queries.
#[derive(Clone)]
pub struct OpinionService {
    providers: Vec<Arc<dyn Provider>>,
    classifier: Classifier,
    config: SentimentConfig,
}

impl std::fmt::Debug for OpinionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("OpinionService")
            .field("providers", &names)
            .field("classifier", &self.classifier)
            .field("config", &self.config)
            .finish()
    }
}

impl OpinionService {
    /// `providers` is the global priority order; each category's chain is the
    /// subsequence of providers that support it.
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn Provider>>, config: SentimentConfig) -> Self {
        let classifier = Classifier::new(Arc::new(LexiconScorer), config.thresholds);
        Self {
            providers,
            classifier,
            config,
        }
    }

    /// Replace the default lexicon scorer.
    #[must_use]
    pub fn with_scorer(mut self, scorer: Arc<dyn PolarityScorer>) -> Self {
        self.classifier = Classifier::new(scorer, self.config.thresholds);
        self
    }

    /// Build a service with one relay provider per providers-file entry.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] for inconsistent thresholds or a relay
    /// entry that cannot be turned into an HTTP client.
    pub fn from_app_config(
        config: &AppConfig,
        providers: &ProvidersFile,
    ) -> Result<Self, SentimentError> {
        let sentiment_config = SentimentConfig::from_app_config(config)?;
        let providers = relay_providers(
            providers,
            &config.user_agent,
            sentiment_config.provider_timeout,
        )?;
        Ok(Self::new(providers, sentiment_config))
    }

    /// Provider names tried for `category`, in order.
    #[must_use]
    pub fn chain_for(&self, category: Category) -> Vec<&str> {
        self.chain(category).map(|p| p.name()).collect()
    }

    fn chain(&self, category: Category) -> impl Iterator<Item = &Arc<dyn Provider>> {
        self.providers.iter().filter(move |p| p.supports(category))
    }

    /// Look up an opinion from untrusted strings.
    ///
    /// Never fails: an unknown category or blank term yields an unavailable
    /// envelope.
    pub async fn get_opinion(&self, term: &str, category: &str) -> ResultEnvelope {
        match Query::parse(term, category) {
            Ok(query) => self.resolve(&query).await.envelope,
            Err(e) => {
                tracing::warn!(term, category, error = %e, "rejected opinion query");
                ResultEnvelope::unavailable()
            }
        }
    }

    /// Run the fallback chain for `query`.
    pub async fn resolve(&self, query: &Query) -> Resolution {
        let chain: Vec<&Arc<dyn Provider>> = self.chain(query.category()).collect();
        let mut attempts = Vec::with_capacity(chain.len());
        let mut state = ChainState::Trying(0);

        loop {
            state = match state {
                ChainState::Trying(index) if index >= chain.len() => ChainState::Exhausted,
                ChainState::Trying(index) => {
                    let provider = chain[index];
                    match self.attempt(provider.as_ref(), query).await {
                        Ok(envelope) => {
                            attempts.push(ProviderAttempt {
                                provider: provider.name().to_string(),
                                outcome: AttemptOutcome::Succeeded {
                                    evidence: envelope.total_evidence_count(),
                                },
                            });
                            ChainState::Succeeded {
                                provider: provider.name().to_string(),
                                envelope,
                            }
                        }
                        Err(outcome) => {
                            attempts.push(ProviderAttempt {
                                provider: provider.name().to_string(),
                                outcome,
                            });
                            ChainState::Trying(index + 1)
                        }
                    }
                }
                ChainState::Succeeded { provider, envelope } => {
                    tracing::info!(
                        term = query.term(),
                        category = %query.category(),
                        provider = %provider,
                        rating = envelope.rating_percent(),
                        evidence = envelope.total_evidence_count(),
                        "opinion resolved"
                    );
                    return Resolution {
                        envelope,
                        provider: Some(provider),
                        attempts,
                    };
                }
                ChainState::Exhausted => {
                    tracing::info!(
                        term = query.term(),
                        category = %query.category(),
                        tried = attempts.len(),
                        "all providers exhausted; opinion unavailable"
                    );
                    return Resolution {
                        envelope: ResultEnvelope::unavailable(),
                        provider: None,
                        attempts,
                    };
                }
            };
        }
    }

    /// One bounded call to one provider, reduced to an envelope.
    async fn attempt(
        &self,
        provider: &dyn Provider,
        query: &Query,
    ) -> Result<ResultEnvelope, AttemptOutcome> {
        tracing::debug!(provider = provider.name(), term = query.term(), "trying provider");

        let fetched =
            tokio::time::timeout(self.config.provider_timeout, provider.fetch(query)).await;
        let items = match fetched {
            Ok(Ok(items)) => items,
            Ok(Err(e)) => {
                tracing::warn!(
                    provider = provider.name(),
                    term = query.term(),
                    kind = %e.kind(),
                    error = %e,
                    "provider fetch failed"
                );
                return Err(AttemptOutcome::Failed(e.kind()));
            }
            Err(_) => {
                tracing::warn!(
                    provider = provider.name(),
                    term = query.term(),
                    timeout = ?self.config.provider_timeout,
                    "provider fetch timed out"
                );
                return Err(AttemptOutcome::TimedOut);
            }
        };

        let outcome = build_envelope(items, &self.classifier, &self.config);
        if let Err(outcome) = &outcome {
            tracing::warn!(
                provider = provider.name(),
                term = query.term(),
                outcome = ?outcome,
                "provider evidence unusable"
            );
        }
        outcome
    }
}

/// Reduce one provider's raw items to an envelope.
///
/// Text batches are normalized, deduplicated, and classified; score batches
/// go straight to the numeric aggregator. A batch mixing both variants is
/// treated as a malformed response.
fn build_envelope(
    items: Vec<RawItem>,
    classifier: &Classifier,
    config: &SentimentConfig,
) -> Result<ResultEnvelope, AttemptOutcome> {
    let Some(first) = items.first() else {
        return Err(AttemptOutcome::NoEvidence);
    };

    let text_batch = first.is_text();
    if items.iter().any(|item| item.is_text() != text_batch) {
        return Err(AttemptOutcome::Failed(ProviderErrorKind::Malformed));
    }

    let aggregated = if text_batch {
        let cleaned = normalize_batch(items.iter().filter_map(|item| match item {
            RawItem::Text { body } => Some(body.as_str()),
            RawItem::Score { .. } => None,
        }));
        let classified = classifier.classify_batch(cleaned);
        aggregate_text(&classified, config)
    } else {
        aggregate_scores(&items)
    };

    aggregated.map_err(|e| match e {
        AggregationError::EmptyEvidence => AttemptOutcome::NoEvidence,
        AggregationError::InvalidScale { .. } => {
            AttemptOutcome::Failed(ProviderErrorKind::Malformed)
        }
    })
}
