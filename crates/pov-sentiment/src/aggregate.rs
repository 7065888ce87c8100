//! Reduction of one provider's evidence into a [`ResultEnvelope`].
//!
//! Text evidence: `rating_percent = round(100 * positive / total)`. Neutral
//! items count toward the total but not the numerator. Excerpts and keywords
//! come from the positive pool when the rating is above 50, otherwise from
//! the negative pool.
//!
//! Numeric evidence: each rating is placed on `[0, 1]` within its scale, the
//! results are averaged, and the mean is expressed as a percentage.

use pov_core::ResultEnvelope;

use crate::error::AggregationError;
use crate::keywords::keyword_frequency;
use crate::types::{ClassifiedItem, Distribution, Label, RawItem, SentimentConfig};

/// Ratings strictly above this pick positive excerpts.
const POSITIVE_POOL_CUTOFF: u8 = 50;

/// Aggregate classified text items.
///
/// # Errors
///
/// Returns [`AggregationError::EmptyEvidence`] for an empty batch.
pub fn aggregate_text(
    items: &[ClassifiedItem],
    config: &SentimentConfig,
) -> Result<ResultEnvelope, AggregationError> {
    let distribution = Distribution::from_items(items);
    if distribution.total == 0 {
        return Err(AggregationError::EmptyEvidence);
    }

    let rating_percent = percent_of(distribution.positive, distribution.total);
    let pool_label = if rating_percent > POSITIVE_POOL_CUTOFF {
        Label::Positive
    } else {
        Label::Negative
    };

    let pool: Vec<&str> = items
        .iter()
        .filter(|item| item.label == pool_label)
        .map(|item| item.text.as_str())
        .collect();

    let sample_excerpts = pool
        .iter()
        .take(config.max_excerpts)
        .map(|text| (*text).to_string())
        .collect();
    let keyword_summary = keyword_frequency(pool.iter().copied(), config.keyword_limit);

    tracing::debug!(
        positive = distribution.positive,
        negative = distribution.negative,
        neutral = distribution.neutral,
        rating_percent,
        pool = %pool_label,
        "aggregated text evidence"
    );

    Ok(ResultEnvelope::rated(
        rating_percent,
        sample_excerpts,
        Some(keyword_summary),
        distribution.total,
    ))
}

/// Aggregate pre-scored ratings. Text items in `items` are ignored.
///
/// `total_evidence_count` sums each rating's vote count, counting a rating
/// without one as a single piece of evidence.
///
/// # Errors
///
/// - [`AggregationError::EmptyEvidence`] if `items` holds no ratings.
/// - [`AggregationError::InvalidScale`] for a non-finite value or an empty
///   or inverted scale.
pub fn aggregate_scores(items: &[RawItem]) -> Result<ResultEnvelope, AggregationError> {
    let mut fraction_sum = 0.0_f64;
    let mut rated = 0usize;
    let mut evidence = 0usize;

    for item in items {
        let RawItem::Score {
            value,
            scale,
            votes,
        } = item
        else {
            continue;
        };

        let valid = value.is_finite()
            && scale.min.is_finite()
            && scale.max.is_finite()
            && scale.max > scale.min;
        if !valid {
            return Err(AggregationError::InvalidScale {
                value: *value,
                min: scale.min,
                max: scale.max,
            });
        }

        fraction_sum += ((value - scale.min) / (scale.max - scale.min)).clamp(0.0, 1.0);
        rated += 1;
        let weight = votes.map_or(1, |v| usize::try_from(v).unwrap_or(usize::MAX));
        evidence = evidence.saturating_add(weight);
    }

    if rated == 0 {
        return Err(AggregationError::EmptyEvidence);
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = fraction_sum / rated as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rating_percent = (mean * 100.0).round().clamp(0.0, 100.0) as u8;

    tracing::debug!(ratings = rated, rating_percent, "aggregated numeric evidence");

    Ok(ResultEnvelope::rated(rating_percent, Vec::new(), None, evidence))
}

fn percent_of(part: usize, total: usize) -> u8 {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let pct = (part as f64 * 100.0 / total as f64).round().clamp(0.0, 100.0) as u8;
    pct
}
