//! Relay response decoding: JSON body to [`RawItem`]s per [`PayloadShape`].

use std::collections::HashMap;

use pov_core::PayloadShape;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::types::{RawItem, Scale};

/// Scale assumed for `rating` payloads that omit `scale_max`.
const DEFAULT_RATING_MAX: f64 = 10.0;

/// Star buckets that count as positive in a histogram.
const POSITIVE_STAR_BUCKETS: [&str; 2] = ["4", "5"];

#[derive(Debug, Deserialize)]
struct PostsPayload {
    #[serde(default)]
    items: Vec<PostItem>,
}

#[derive(Debug, Deserialize)]
struct PostItem {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RatingPayload {
    rating: Lenient,
    scale_min: Option<f64>,
    scale_max: Option<f64>,
    rating_count: Option<Lenient>,
}

#[derive(Debug, Deserialize)]
struct StarHistogramPayload {
    stars_stat: HashMap<String, Lenient>,
    total_reviews: Option<Lenient>,
}

/// Relays are loose about numbers: `8.5`, `"8.5"`, and `"65%"` all occur.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(f64),
    Text(String),
}

impl Lenient {
    fn as_f64(&self, field: &str) -> Result<f64, ProviderError> {
        match self {
            Lenient::Number(n) => Ok(*n),
            Lenient::Text(raw) => raw
                .trim()
                .trim_end_matches('%')
                .trim()
                .parse::<f64>()
                .map_err(|e| ProviderError::Malformed(format!("{field}: {raw:?} ({e})"))),
        }
    }

    fn as_count(&self, field: &str) -> Result<u64, ProviderError> {
        let value = self.as_f64(field)?;
        if !value.is_finite() || value < 0.0 {
            return Err(ProviderError::Malformed(format!(
                "{field}: {value} is not a count"
            )));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = value.round() as u64;
        Ok(count)
    }
}

/// Decode a relay body according to its declared shape.
///
/// # Errors
///
/// Returns [`ProviderError::Malformed`] if the body is not valid JSON for
/// the shape or carries unparsable numbers.
pub(crate) fn parse_payload(shape: PayloadShape, body: &str) -> Result<Vec<RawItem>, ProviderError> {
    match shape {
        PayloadShape::Posts => parse_posts(body),
        PayloadShape::Rating => parse_rating(body),
        PayloadShape::StarHistogram => parse_star_histogram(body),
    }
}

fn decode<'a, T: Deserialize<'a>>(body: &'a str, shape: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body)
        .map_err(|e| ProviderError::Malformed(format!("{shape} payload parse error: {e}")))
}

fn parse_posts(body: &str) -> Result<Vec<RawItem>, ProviderError> {
    let payload: PostsPayload = decode(body, "posts")?;
    Ok(payload
        .items
        .into_iter()
        .filter_map(|item| item.text)
        .filter(|text| !text.trim().is_empty())
        .map(RawItem::text)
        .collect())
}

fn parse_rating(body: &str) -> Result<Vec<RawItem>, ProviderError> {
    let payload: RatingPayload = decode(body, "rating")?;
    let value = payload.rating.as_f64("rating")?;
    let votes = payload
        .rating_count
        .as_ref()
        .map(|c| c.as_count("rating_count"))
        .transpose()?;
    let scale = Scale::new(
        payload.scale_min.unwrap_or(0.0),
        payload.scale_max.unwrap_or(DEFAULT_RATING_MAX),
    );
    Ok(vec![RawItem::Score {
        value,
        scale,
        votes,
    }])
}

/// The positive rating of a histogram is the share of 4- and 5-star reviews.
fn parse_star_histogram(body: &str) -> Result<Vec<RawItem>, ProviderError> {
    let payload: StarHistogramPayload = decode(body, "star_histogram")?;
    if payload.stars_stat.is_empty() {
        return Ok(Vec::new());
    }

    let mut positive_share = 0.0;
    for bucket in POSITIVE_STAR_BUCKETS {
        if let Some(share) = payload.stars_stat.get(bucket) {
            positive_share += share.as_f64(&format!("stars_stat[{bucket}]"))?;
        }
    }

    let votes = payload
        .total_reviews
        .as_ref()
        .map(|c| c.as_count("total_reviews"))
        .transpose()?;

    Ok(vec![RawItem::Score {
        value: positive_share,
        scale: Scale::up_to(100.0),
        votes,
    }])
}
