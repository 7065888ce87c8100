use thiserror::Error;

/// Reason tag attached to every provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    NotFound,
    Transient,
    Malformed,
}

impl std::fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderErrorKind::NotFound => write!(f, "not_found"),
            ProviderErrorKind::Transient => write!(f, "transient"),
            ProviderErrorKind::Malformed => write!(f, "malformed"),
        }
    }
}

/// Failure reported by a provider adapter. Never escapes the orchestrator.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("transient provider failure: {0}")]
    Transient(String),

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl ProviderError {
    #[must_use]
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            ProviderError::NotFound(_) => ProviderErrorKind::NotFound,
            ProviderError::Transient(_) => ProviderErrorKind::Transient,
            ProviderError::Malformed(_) => ProviderErrorKind::Malformed,
        }
    }
}

/// Transport-level failures only. HTTP status codes are mapped by the relay
/// before the body is read.
impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Malformed(err.to_string())
        } else {
            ProviderError::Transient(err.to_string())
        }
    }
}

/// Failure inside the aggregator.
#[derive(Debug, Error, PartialEq)]
pub enum AggregationError {
    #[error("no evidence left to aggregate")]
    EmptyEvidence,

    #[error("invalid rating scale: value {value} on [{min}, {max}]")]
    InvalidScale { value: f64, min: f64, max: f64 },
}

/// Construction-time failures for the sentiment service.
#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid provider base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid thresholds: negative {negative} must be below positive {positive} within [-1, 1]")]
    InvalidThresholds { positive: f32, negative: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            ProviderError::NotFound("x".into()).kind(),
            ProviderErrorKind::NotFound
        );
        assert_eq!(
            ProviderError::Transient("x".into()).kind(),
            ProviderErrorKind::Transient
        );
        assert_eq!(
            ProviderError::Malformed("x".into()).kind(),
            ProviderErrorKind::Malformed
        );
    }

    #[test]
    fn kind_displays_as_reason_tag() {
        assert_eq!(ProviderErrorKind::NotFound.to_string(), "not_found");
        assert_eq!(ProviderErrorKind::Transient.to_string(), "transient");
        assert_eq!(ProviderErrorKind::Malformed.to_string(), "malformed");
    }

    #[tokio::test]
    async fn connection_failure_is_transient() {
        let err = reqwest::Client::new()
            .get("http://0.0.0.0:1")
            .send()
            .await
            .unwrap_err();
        assert_eq!(ProviderError::from(err).kind(), ProviderErrorKind::Transient);
    }
}
