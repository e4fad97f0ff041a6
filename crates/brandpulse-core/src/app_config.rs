use std::path::PathBuf;

/// Runtime configuration shared by the CLI and the ingestion pipeline.
///
/// Provider keys are optional: an absent key turns the matching source
/// adapter into a no-op rather than an error.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub brands_path: PathBuf,
    pub newsapi_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    /// Upper bound for one source adapter call, end to end.
    pub source_timeout_secs: u64,
    pub source_user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("brands_path", &self.brands_path)
            .field("newsapi_key", &self.newsapi_key.as_ref().map(|_| "[redacted]"))
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "reddit_client_id",
                &self.reddit_client_id.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "reddit_client_secret",
                &self.reddit_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("source_timeout_secs", &self.source_timeout_secs)
            .field("source_user_agent", &self.source_user_agent)
            .finish()
    }
}
