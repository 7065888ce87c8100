use std::time::Duration;

use pov_core::AppConfig;

use crate::error::SentimentError;

/// Closed numeric range a score item is reported on, e.g. `0..10` stars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
}

impl Scale {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Zero-based scale ending at `max`.
    #[must_use]
    pub fn up_to(max: f64) -> Self {
        Self { min: 0.0, max }
    }
}

/// One unit of evidence returned by a provider.
///
/// A single `fetch` yields items of exactly one variant.
#[derive(Debug, Clone, PartialEq)]
pub enum RawItem {
    /// Free text: a social post or a written review.
    Text { body: String },
    /// A pre-aggregated rating.
    Score {
        value: f64,
        scale: Scale,
        /// How many votes or reviews stand behind the rating, when known.
        votes: Option<u64>,
    },
}

impl RawItem {
    pub fn text(body: impl Into<String>) -> Self {
        RawItem::Text { body: body.into() }
    }

    #[must_use]
    pub fn score(value: f64, scale: Scale) -> Self {
        RawItem::Score {
            value,
            scale,
            votes: None,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, RawItem::Text { .. })
    }
}

/// Polarity bucket for one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Positive => write!(f, "positive"),
            Label::Negative => write!(f, "negative"),
            Label::Neutral => write!(f, "neutral"),
        }
    }
}

/// A normalized text with its compound score and label.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedItem {
    pub text: String,
    pub label: Label,
    /// Compound polarity in `[-1.0, 1.0]`.
    pub score: f32,
}

/// Label counts for a batch. `total == positive + negative + neutral`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Distribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub total: usize,
}

impl Distribution {
    #[must_use]
    pub fn from_items(items: &[ClassifiedItem]) -> Self {
        let mut dist = Self::default();
        for item in items {
            match item.label {
                Label::Positive => dist.positive += 1,
                Label::Negative => dist.negative += 1,
                Label::Neutral => dist.neutral += 1,
            }
        }
        dist.total = dist.positive + dist.negative + dist.neutral;
        dist
    }
}

/// Score cut-offs shared by every provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub positive: f32,
    pub negative: f32,
}

impl Thresholds {
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidThresholds`] unless
    /// `-1 <= negative < positive <= 1`.
    pub fn new(positive: f32, negative: f32) -> Result<Self, SentimentError> {
        let in_range = (-1.0..=1.0).contains(&positive) && (-1.0..=1.0).contains(&negative);
        if !in_range || negative >= positive {
            return Err(SentimentError::InvalidThresholds { positive, negative });
        }
        Ok(Self { positive, negative })
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: 0.2,
            negative: -0.2,
        }
    }
}

/// Tunables for classification, aggregation, and the fallback chain.
#[derive(Debug, Clone)]
pub struct SentimentConfig {
    pub thresholds: Thresholds,
    pub max_excerpts: usize,
    pub keyword_limit: usize,
    pub provider_timeout: Duration,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            max_excerpts: 5,
            keyword_limit: 20,
            provider_timeout: Duration::from_secs(10),
        }
    }
}

impl SentimentConfig {
    /// Derive pipeline settings from the process configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidThresholds`] for an inconsistent pair.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SentimentError> {
        Ok(Self {
            thresholds: Thresholds::new(config.positive_threshold, config.negative_threshold)?,
            max_excerpts: config.max_excerpts,
            keyword_limit: config.keyword_limit,
            provider_timeout: Duration::from_secs(config.provider_timeout_secs),
        })
    }
}
