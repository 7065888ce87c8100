//! Opinion aggregation for POV.
//!
//! Queries an ordered chain of providers for a term, cleans and classifies
//! the free text they return (or normalizes their numeric ratings), and
//! reduces the first usable batch to a [`pov_core::ResultEnvelope`].

pub mod aggregate;
pub mod classifier;
pub mod error;
pub mod keywords;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod scorer;
pub mod sources;
pub mod types;

pub use classifier::Classifier;
pub use error::{AggregationError, ProviderError, ProviderErrorKind, SentimentError};
pub use normalize::{normalize, normalize_batch};
pub use pipeline::{AttemptOutcome, OpinionService, ProviderAttempt, Resolution};
pub use provider::Provider;
pub use scorer::{lexicon_score, LexiconScorer, PolarityScorer};
pub use sources::{relay_providers, RelayProvider};
pub use types::{
    ClassifiedItem, Distribution, Label, RawItem, Scale, SentimentConfig, Thresholds,
};
