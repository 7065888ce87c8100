use crate::app_config::AppConfig;
use crate::envelope::MAX_SAMPLE_EXCERPTS;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_unit_f32 = |var: &str, default: &str| -> Result<f32, ConfigError> {
        let value = or_default(var, default)
            .parse::<f32>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !(-1.0..=1.0).contains(&value) {
            return Err(invalid(var, format!("{value} is outside [-1, 1]")));
        }
        Ok(value)
    };

    let log_level = or_default("POV_LOG_LEVEL", "info");
    let providers_path = PathBuf::from(or_default("POV_PROVIDERS_PATH", "./config/providers.yaml"));

    let provider_timeout_secs = parse_u64("POV_PROVIDER_TIMEOUT_SECS", "10")?;
    if provider_timeout_secs == 0 {
        return Err(invalid(
            "POV_PROVIDER_TIMEOUT_SECS",
            "must be at least 1 second".to_string(),
        ));
    }

    let positive_threshold = parse_unit_f32("POV_POSITIVE_THRESHOLD", "0.2")?;
    let negative_threshold = parse_unit_f32("POV_NEGATIVE_THRESHOLD", "-0.2")?;
    if negative_threshold >= positive_threshold {
        return Err(invalid(
            "POV_NEGATIVE_THRESHOLD",
            format!(
                "{negative_threshold} must be below POV_POSITIVE_THRESHOLD ({positive_threshold})"
            ),
        ));
    }

    let max_excerpts = parse_usize("POV_MAX_EXCERPTS", "5")?;
    if max_excerpts > MAX_SAMPLE_EXCERPTS {
        return Err(invalid(
            "POV_MAX_EXCERPTS",
            format!("{max_excerpts} exceeds the envelope limit of {MAX_SAMPLE_EXCERPTS}"),
        ));
    }
    let keyword_limit = parse_usize("POV_KEYWORD_LIMIT", "20")?;
    let user_agent = or_default("POV_USER_AGENT", "pov/0.1 (opinion-aggregator)");

    Ok(AppConfig {
        log_level,
        providers_path,
        provider_timeout_secs,
        positive_threshold,
        negative_threshold,
        max_excerpts,
        keyword_limit,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
