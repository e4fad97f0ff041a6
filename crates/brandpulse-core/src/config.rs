use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Keys left at their sample-env placeholders ("your_...") count as absent,
    // so the matching adapters stay no-ops instead of sending junk credentials.
    let api_key = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .filter(|key| !key.is_empty() && !key.starts_with("your_"))
    };

    let log_level = or_default("BRANDPULSE_LOG_LEVEL", "info");
    let brands_path = PathBuf::from(or_default(
        "BRANDPULSE_BRANDS_PATH",
        "./config/brands.yaml",
    ));
    let newsapi_key = api_key("NEWS_API_KEY");
    let youtube_api_key = api_key("YOUTUBE_API_KEY");
    let reddit_client_id = api_key("REDDIT_CLIENT_ID");
    let reddit_client_secret = api_key("REDDIT_CLIENT_SECRET");
    let source_timeout_secs = parse_u64("BRANDPULSE_SOURCE_TIMEOUT_SECS", "8")?;
    let source_user_agent = or_default(
        "BRANDPULSE_SOURCE_USER_AGENT",
        "brandpulse/0.1 (mention-tracking)",
    );

    Ok(AppConfig {
        log_level,
        brands_path,
        newsapi_key,
        youtube_api_key,
        reddit_client_id,
        reddit_client_secret,
        source_timeout_secs,
        source_user_agent,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.brands_path.to_string_lossy(), "./config/brands.yaml");
        assert!(cfg.newsapi_key.is_none());
        assert!(cfg.youtube_api_key.is_none());
        assert!(cfg.reddit_client_id.is_none());
        assert!(cfg.reddit_client_secret.is_none());
        assert_eq!(cfg.source_timeout_secs, 8);
        assert_eq!(cfg.source_user_agent, "brandpulse/0.1 (mention-tracking)");
    }

    #[test]
    fn build_app_config_reads_api_keys() {
        let mut map = HashMap::new();
        map.insert("NEWS_API_KEY", "abc123");
        map.insert("YOUTUBE_API_KEY", "xyz789");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.newsapi_key.as_deref(), Some("abc123"));
        assert_eq!(cfg.youtube_api_key.as_deref(), Some("xyz789"));
    }

    #[test]
    fn placeholder_api_keys_count_as_absent() {
        let mut map = HashMap::new();
        map.insert("NEWS_API_KEY", "your_newsapi_key_here");
        map.insert("YOUTUBE_API_KEY", "your_youtube_api_key");
        map.insert("REDDIT_CLIENT_ID", "your_reddit_client_id");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.newsapi_key.is_none());
        assert!(cfg.youtube_api_key.is_none());
        assert!(cfg.reddit_client_id.is_none());
    }

    #[test]
    fn empty_api_keys_count_as_absent() {
        let mut map = HashMap::new();
        map.insert("NEWS_API_KEY", "");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.newsapi_key.is_none());
    }

    #[test]
    fn source_timeout_override() {
        let mut map = HashMap::new();
        map.insert("BRANDPULSE_SOURCE_TIMEOUT_SECS", "3");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.source_timeout_secs, 3);
    }

    #[test]
    fn source_timeout_invalid() {
        let mut map = HashMap::new();
        map.insert("BRANDPULSE_SOURCE_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDPULSE_SOURCE_TIMEOUT_SECS"),
            "expected InvalidEnvVar(BRANDPULSE_SOURCE_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn user_agent_override() {
        let mut map = HashMap::new();
        map.insert("BRANDPULSE_SOURCE_USER_AGENT", "custom-agent/2.0");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.source_user_agent, "custom-agent/2.0");
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut map = HashMap::new();
        map.insert("NEWS_API_KEY", "super-secret");
        map.insert("REDDIT_CLIENT_SECRET", "hunter2");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[redacted]"));
    }
}
