use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Upper bound on `MANDI_SEED_PLACES_PER_CATEGORY`. Keeps generated vendor
/// ids well below the landmark record's id.
pub const MAX_SEED_PLACES_PER_CATEGORY: usize = 1000;

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
/// Every setting has a default; only malformed values are errors.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for a malformed value.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;
    use std::str::FromStr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    }

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        parse_as(var, &or_default(var, default))
    };
    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        parse_as(var, &or_default(var, default))
    };
    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        parse_as(var, &or_default(var, default))
    };

    let env = parse_environment(&or_default("MANDI_ENV", "development"))?;
    let log_level = or_default("MANDI_LOG_LEVEL", "info");

    let search_base_url = or_default(
        "MANDI_SEARCH_BASE_URL",
        "https://nominatim.openstreetmap.org/search",
    );
    let search_timeout_secs = parse_u64("MANDI_SEARCH_TIMEOUT_SECS", "10")?;
    let search_user_agent =
        or_default("MANDI_SEARCH_USER_AGENT", "mandi/0.1 (local-vendor-map)");
    let search_result_limit = parse_u32("MANDI_SEARCH_RESULT_LIMIT", "5")?;
    if search_result_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MANDI_SEARCH_RESULT_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let search_debounce_ms = parse_u64("MANDI_SEARCH_DEBOUNCE_MS", "500")?;

    let auth_delay_ms = parse_u64("MANDI_AUTH_DELAY_MS", "1000")?;
    let demo_auth_delay_ms = parse_u64("MANDI_DEMO_AUTH_DELAY_MS", "800")?;
    let geolocation_timeout_ms = parse_u64("MANDI_GEOLOCATION_TIMEOUT_MS", "5000")?;

    let categories_path = lookup("MANDI_CATEGORIES_PATH").ok().map(PathBuf::from);
    let seed_places_per_category = parse_usize("MANDI_SEED_PLACES_PER_CATEGORY", "10")?;
    if seed_places_per_category > MAX_SEED_PLACES_PER_CATEGORY {
        return Err(ConfigError::InvalidEnvVar {
            var: "MANDI_SEED_PLACES_PER_CATEGORY".to_string(),
            reason: format!("must be at most {MAX_SEED_PLACES_PER_CATEGORY}"),
        });
    }
    let seed_rng = lookup("MANDI_SEED_RNG")
        .ok()
        .map(|raw| parse_as::<u64>("MANDI_SEED_RNG", &raw))
        .transpose()?;
    let default_locality = or_default("MANDI_DEFAULT_LOCALITY", "Sehore");

    Ok(AppConfig {
        env,
        log_level,
        search_base_url,
        search_timeout_secs,
        search_user_agent,
        search_result_limit,
        search_debounce_ms,
        auth_delay_ms,
        demo_auth_delay_ms,
        geolocation_timeout_ms,
        categories_path,
        seed_places_per_category,
        seed_rng,
        default_locality,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MANDI_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
