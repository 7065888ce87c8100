//! Opinion command handlers for the CLI.

use std::sync::Arc;

use anyhow::Context;
use pov_core::{AppConfig, Category, ProvidersFile, Query};
use pov_sentiment::{
    normalize, AttemptOutcome, Classifier, LexiconScorer, OpinionService, Resolution,
    SentimentConfig,
};

fn load_chain(config: &AppConfig) -> anyhow::Result<ProvidersFile> {
    pov_core::load_providers(&config.providers_path).with_context(|| {
        format!(
            "loading providers from {}",
            config.providers_path.display()
        )
    })
}

/// Run the full pipeline for one term and print the envelope.
///
/// # Errors
///
/// Returns an error if the term or category is invalid, the providers file
/// cannot be loaded, or a relay client cannot be built. Provider failures
/// are not errors; they surface as an `unavailable` envelope.
pub(crate) async fn run_query(
    config: &AppConfig,
    term: &str,
    category: &str,
    pretty: bool,
    explain: bool,
) -> anyhow::Result<()> {
    let query = Query::parse(term, category)?;
    let providers = load_chain(config)?;
    let service = OpinionService::from_app_config(config, &providers)?;

    let resolution = service.resolve(&query).await;
    if explain {
        eprint!("{}", render_attempts(&resolution));
    }

    let json = if pretty {
        serde_json::to_string_pretty(&resolution.envelope)?
    } else {
        serde_json::to_string(&resolution.envelope)?
    };
    println!("{json}");
    Ok(())
}

/// Normalize, score, and label one text with the configured thresholds.
///
/// # Errors
///
/// Returns an error if the configured thresholds are inconsistent.
pub(crate) fn run_classify(config: &AppConfig, text: &str) -> anyhow::Result<()> {
    let settings = SentimentConfig::from_app_config(config)?;
    let classifier = Classifier::new(Arc::new(LexiconScorer), settings.thresholds);

    let cleaned = normalize(text);
    if cleaned.is_empty() {
        println!("nothing left to classify after normalization");
        return Ok(());
    }

    let item = classifier.classify(cleaned);
    let out = serde_json::json!({
        "text": item.text,
        "score": item.score,
        "label": item.label.to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Print the provider chain, optionally for a single category.
///
/// # Errors
///
/// Returns an error if the category is unknown or the providers file cannot
/// be loaded.
pub(crate) fn run_providers(config: &AppConfig, category: Option<&str>) -> anyhow::Result<()> {
    let filter: Option<Category> = category.map(str::parse::<Category>).transpose()?;
    let file = load_chain(config)?;

    let categories: Vec<Category> = match filter {
        Some(c) => vec![c],
        None => Category::ALL.to_vec(),
    };

    println!("{:<15}{:<6}{:<20}{:<16}URL", "CATEGORY", "RANK", "PROVIDER", "SHAPE");
    for category in categories {
        let chain: Vec<_> = file.for_category(category).collect();
        if chain.is_empty() {
            println!("{:<15}{:<6}{:<20}{:<16}-", category, "-", "(none)", "-");
            continue;
        }
        for (rank, entry) in chain.iter().enumerate() {
            let disabled = if entry.has_credentials() {
                ""
            } else {
                "  (token unset, skipped)"
            };
            println!(
                "{:<15}{:<6}{:<20}{:<16}{}{disabled}",
                category,
                rank + 1,
                entry.name,
                entry.shape,
                entry.base_url
            );
        }
    }

    Ok(())
}

/// One line per provider attempt, e.g. `1. imdb: failed (not_found)`.
fn render_attempts(resolution: &Resolution) -> String {
    if resolution.attempts.is_empty() {
        return "no providers serve this category\n".to_string();
    }

    let mut out = String::new();
    for (i, attempt) in resolution.attempts.iter().enumerate() {
        let outcome = match &attempt.outcome {
            AttemptOutcome::Succeeded { evidence } => format!("ok ({evidence} evidence)"),
            AttemptOutcome::Failed(kind) => format!("failed ({kind})"),
            AttemptOutcome::TimedOut => "timed out".to_string(),
            AttemptOutcome::NoEvidence => "no usable evidence".to_string(),
        };
        out.push_str(&format!("{}. {}: {outcome}\n", i + 1, attempt.provider));
    }
    out
}

#[cfg(test)]
mod tests {
    use pov_core::ResultEnvelope;
    use pov_sentiment::{ProviderAttempt, ProviderErrorKind};

    use super::*;

    #[test]
    fn render_attempts_lists_each_provider_in_order() {
        let resolution = Resolution {
            envelope: ResultEnvelope::rated(85, Vec::new(), None, 1),
            provider: Some("omdb".to_string()),
            attempts: vec![
                ProviderAttempt {
                    provider: "imdb".to_string(),
                    outcome: AttemptOutcome::Failed(ProviderErrorKind::NotFound),
                },
                ProviderAttempt {
                    provider: "slow".to_string(),
                    outcome: AttemptOutcome::TimedOut,
                },
                ProviderAttempt {
                    provider: "omdb".to_string(),
                    outcome: AttemptOutcome::Succeeded { evidence: 1 },
                },
            ],
        };

        assert_eq!(
            render_attempts(&resolution),
            "1. imdb: failed (not_found)\n2. slow: timed out\n3. omdb: ok (1 evidence)\n"
        );
    }

    #[test]
    fn render_attempts_reports_empty_chain() {
        let resolution = Resolution {
            envelope: ResultEnvelope::unavailable(),
            provider: None,
            attempts: Vec::new(),
        };
        assert_eq!(
            render_attempts(&resolution),
            "no providers serve this category\n"
        );
    }
}
