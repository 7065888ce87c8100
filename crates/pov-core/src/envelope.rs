//! The normalized verdict returned for every query.
//!
//! Whatever provider answered, callers only ever see a [`ResultEnvelope`].
//! The JSON layout is stable:
//!
//! ```json
//! {
//!   "status": "ok",
//!   "rating_percent": 70,
//!   "sample_excerpts": ["..."],
//!   "keyword_summary": [{"token": "love", "count": 4}],
//!   "total_evidence_count": 10
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Most excerpts an envelope ever carries.
pub const MAX_SAMPLE_EXCERPTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Ok,
    Unavailable,
}

/// One token and how often it occurred in the selected excerpt pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub token: String,
    pub count: usize,
}

/// Token counts ordered by count descending, ties in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordFrequency(Vec<KeywordCount>);

impl KeywordFrequency {
    /// Wrap counts that are already ordered.
    #[must_use]
    pub fn new(counts: Vec<KeywordCount>) -> Self {
        Self(counts)
    }

    #[must_use]
    pub fn entries(&self) -> &[KeywordCount] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Count recorded for `token`, if it made the summary.
    #[must_use]
    pub fn count_of(&self, token: &str) -> Option<usize> {
        self.0.iter().find(|k| k.token == token).map(|k| k.count)
    }
}

/// Normalized opinion verdict. Immutable once built.
///
/// Invariants: `rating_percent` is present and within `0..=100` iff
/// `status` is [`EnvelopeStatus::Ok`]; an unavailable envelope carries no
/// excerpts, no keyword summary, and zero evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireEnvelope")]
pub struct ResultEnvelope {
    status: EnvelopeStatus,
    rating_percent: Option<u8>,
    sample_excerpts: Vec<String>,
    keyword_summary: Option<KeywordFrequency>,
    total_evidence_count: usize,
}

impl ResultEnvelope {
    /// The terminal "nothing usable" verdict.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            status: EnvelopeStatus::Unavailable,
            rating_percent: None,
            sample_excerpts: Vec::new(),
            keyword_summary: None,
            total_evidence_count: 0,
        }
    }

    /// A successful verdict. Ratings above 100 are clamped and excerpts
    /// beyond [`MAX_SAMPLE_EXCERPTS`] are dropped.
    #[must_use]
    pub fn rated(
        rating_percent: u8,
        mut sample_excerpts: Vec<String>,
        keyword_summary: Option<KeywordFrequency>,
        total_evidence_count: usize,
    ) -> Self {
        sample_excerpts.truncate(MAX_SAMPLE_EXCERPTS);
        Self {
            status: EnvelopeStatus::Ok,
            rating_percent: Some(rating_percent.min(100)),
            sample_excerpts,
            keyword_summary,
            total_evidence_count,
        }
    }

    #[must_use]
    pub fn status(&self) -> EnvelopeStatus {
        self.status
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == EnvelopeStatus::Ok
    }

    #[must_use]
    pub fn rating_percent(&self) -> Option<u8> {
        self.rating_percent
    }

    #[must_use]
    pub fn sample_excerpts(&self) -> &[String] {
        &self.sample_excerpts
    }

    #[must_use]
    pub fn keyword_summary(&self) -> Option<&KeywordFrequency> {
        self.keyword_summary.as_ref()
    }

    #[must_use]
    pub fn total_evidence_count(&self) -> usize {
        self.total_evidence_count
    }
}

/// Unchecked wire form; converted into [`ResultEnvelope`] with validation.
#[derive(Deserialize)]
struct WireEnvelope {
    status: EnvelopeStatus,
    rating_percent: Option<u8>,
    #[serde(default)]
    sample_excerpts: Vec<String>,
    keyword_summary: Option<KeywordFrequency>,
    #[serde(default)]
    total_evidence_count: usize,
}

impl TryFrom<WireEnvelope> for ResultEnvelope {
    type Error = String;

    fn try_from(wire: WireEnvelope) -> Result<Self, Self::Error> {
        if wire.sample_excerpts.len() > MAX_SAMPLE_EXCERPTS {
            return Err(format!(
                "{} sample_excerpts exceed the limit of {MAX_SAMPLE_EXCERPTS}",
                wire.sample_excerpts.len()
            ));
        }

        match (wire.status, wire.rating_percent) {
            (EnvelopeStatus::Ok, Some(rating)) if rating <= 100 => Ok(Self {
                status: EnvelopeStatus::Ok,
                rating_percent: Some(rating),
                sample_excerpts: wire.sample_excerpts,
                keyword_summary: wire.keyword_summary,
                total_evidence_count: wire.total_evidence_count,
            }),
            (EnvelopeStatus::Ok, Some(rating)) => {
                Err(format!("rating_percent {rating} is outside 0..=100"))
            }
            (EnvelopeStatus::Ok, None) => Err("ok envelope requires rating_percent".to_string()),
            (EnvelopeStatus::Unavailable, None) => {
                let carries_evidence = !wire.sample_excerpts.is_empty()
                    || wire.keyword_summary.is_some()
                    || wire.total_evidence_count > 0;
                if carries_evidence {
                    return Err("unavailable envelope must not carry evidence".to_string());
                }
                Ok(Self::unavailable())
            }
            (EnvelopeStatus::Unavailable, Some(_)) => {
                Err("unavailable envelope must not carry rating_percent".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> KeywordFrequency {
        KeywordFrequency::new(vec![
            KeywordCount {
                token: "love".to_string(),
                count: 3,
            },
            KeywordCount {
                token: "sound".to_string(),
                count: 1,
            },
        ])
    }

    #[test]
    fn unavailable_serializes_with_nulls_and_empty_excerpts() {
        let json = serde_json::to_value(ResultEnvelope::unavailable()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "unavailable",
                "rating_percent": null,
                "sample_excerpts": [],
                "keyword_summary": null,
                "total_evidence_count": 0
            })
        );
    }

    #[test]
    fn rated_envelope_has_stable_field_layout() {
        let envelope =
            ResultEnvelope::rated(70, vec!["love it".to_string()], Some(sample_summary()), 10);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["rating_percent"], 70);
        assert_eq!(json["sample_excerpts"][0], "love it");
        assert_eq!(json["keyword_summary"][0]["token"], "love");
        assert_eq!(json["keyword_summary"][0]["count"], 3);
        assert_eq!(json["total_evidence_count"], 10);
    }

    #[test]
    fn envelope_round_trips_through_json() {
        let envelope = ResultEnvelope::rated(
            64,
            vec!["great".to_string(), "fine".to_string()],
            Some(sample_summary()),
            42,
        );
        let text = serde_json::to_string(&envelope).unwrap();
        let back: ResultEnvelope = serde_json::from_str(&text).unwrap();
        assert_eq!(back, envelope);

        let unavailable = ResultEnvelope::unavailable();
        let text = serde_json::to_string(&unavailable).unwrap();
        let back: ResultEnvelope = serde_json::from_str(&text).unwrap();
        assert_eq!(back, unavailable);
    }

    #[test]
    fn rated_clamps_rating_to_one_hundred() {
        let envelope = ResultEnvelope::rated(250, vec![], None, 1);
        assert_eq!(envelope.rating_percent(), Some(100));
    }

    #[test]
    fn deserializing_ok_without_rating_fails() {
        let result = serde_json::from_str::<ResultEnvelope>(
            r#"{"status":"ok","rating_percent":null,"sample_excerpts":[],"keyword_summary":null,"total_evidence_count":0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn deserializing_out_of_range_rating_fails() {
        let result = serde_json::from_str::<ResultEnvelope>(
            r#"{"status":"ok","rating_percent":101,"sample_excerpts":[],"keyword_summary":null,"total_evidence_count":1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn deserializing_too_many_excerpts_fails() {
        let json = serde_json::json!({
            "status": "ok",
            "rating_percent": 50,
            "sample_excerpts": ["a", "b", "c", "d", "e", "f", "g"],
            "keyword_summary": null,
            "total_evidence_count": 7
        });
        let result = serde_json::from_value::<ResultEnvelope>(json);
        assert!(result.is_err());
    }

    #[test]
    fn rated_keeps_at_most_five_excerpts() {
        let excerpts: Vec<String> = (0..8).map(|i| format!("excerpt {i}")).collect();
        let envelope = ResultEnvelope::rated(90, excerpts, None, 8);
        assert_eq!(envelope.sample_excerpts().len(), MAX_SAMPLE_EXCERPTS);
        assert_eq!(envelope.sample_excerpts()[0], "excerpt 0");
    }

    #[test]
    fn deserializing_unavailable_with_evidence_fails() {
        let with_count = serde_json::json!({
            "status": "unavailable",
            "rating_percent": null,
            "sample_excerpts": [],
            "keyword_summary": null,
            "total_evidence_count": 7
        });
        assert!(serde_json::from_value::<ResultEnvelope>(with_count).is_err());

        let with_excerpts = serde_json::json!({
            "status": "unavailable",
            "rating_percent": null,
            "sample_excerpts": ["stale"],
            "keyword_summary": null,
            "total_evidence_count": 0
        });
        assert!(serde_json::from_value::<ResultEnvelope>(with_excerpts).is_err());

        let with_keywords = serde_json::json!({
            "status": "unavailable",
            "rating_percent": null,
            "sample_excerpts": [],
            "keyword_summary": [],
            "total_evidence_count": 0
        });
        assert!(serde_json::from_value::<ResultEnvelope>(with_keywords).is_err());
    }

    #[test]
    fn keyword_lookup_by_token() {
        let summary = sample_summary();
        assert_eq!(summary.count_of("love"), Some(3));
        assert_eq!(summary.count_of("missing"), None);
        assert_eq!(summary.len(), 2);
    }
}
