use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_PROFILE_BASE_URL: &str = "https://www.instagram.com";

/// Desktop Chrome signature. Profile pages serve a degraded or blocked
/// response to obvious non-browser agents more often.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0 Safari/537.36";

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
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
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

    let env = parse_environment(&or_default("PROFILESCAN_ENV", "development"));
    let bind_addr = parse_addr("PROFILESCAN_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("PROFILESCAN_LOG_LEVEL", "info");

    let profile_base_url = or_default("PROFILESCAN_PROFILE_BASE_URL", DEFAULT_PROFILE_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    if !(profile_base_url.starts_with("http://") || profile_base_url.starts_with("https://")) {
        return Err(invalid(
            "PROFILESCAN_PROFILE_BASE_URL",
            format!("\"{profile_base_url}\" must start with http:// or https://"),
        ));
    }

    let request_timeout_secs = parse_u64("PROFILESCAN_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "PROFILESCAN_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let user_agent = or_default("PROFILESCAN_USER_AGENT", DEFAULT_USER_AGENT);
    let max_concurrent_fetches = parse_usize("PROFILESCAN_MAX_CONCURRENT_FETCHES", "25")?.max(1);
    let fetch_budget_per_minute = parse_usize("PROFILESCAN_FETCH_BUDGET_PER_MINUTE", "250")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        profile_base_url,
        request_timeout_secs,
        user_agent,
        max_concurrent_fetches,
        fetch_budget_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
