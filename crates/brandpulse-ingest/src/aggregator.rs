//! Fan-out fetcher that queries every source and merges the results.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use brandpulse_core::{AppConfig, Brand, Mention, MentionSource, RawMention};

use crate::enrich::Enricher;
use crate::error::IngestError;
use crate::sources::{
    fetch_google_news, fetch_hackernews, fetch_newsapi, fetch_youtube, synthetic_mentions,
    RedditSource, SourceEndpoints,
};

/// Connect timeout for the shared HTTP client; the per-source budget in
/// [`AppConfig::source_timeout_secs`] covers the whole call.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Collects brand mentions from every configured source.
///
/// One shared HTTP client serves all adapters. A failing or slow source never
/// fails the fetch; it just contributes nothing, and when every source
/// contributes nothing the built-in synthetic corpus stands in.
pub struct MentionFetcher {
    http: reqwest::Client,
    endpoints: SourceEndpoints,
    enricher: Enricher,
    timeout_secs: u64,
    user_agent: String,
    newsapi_key: Option<String>,
    youtube_api_key: Option<String>,
    reddit_client_id: Option<String>,
    reddit_client_secret: Option<String>,
}

impl MentionFetcher {
    /// Build a fetcher against the production endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: &AppConfig) -> Result<Self, IngestError> {
        Self::with_endpoints(config, SourceEndpoints::default())
    }

    /// Build a fetcher against custom endpoints. Tests point every source at
    /// a local mock server this way.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] when the HTTP client cannot be
    /// constructed.
    pub fn with_endpoints(
        config: &AppConfig,
        endpoints: SourceEndpoints,
    ) -> Result<Self, IngestError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.source_timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(&config.source_user_agent)
            .build()?;

        Ok(Self {
            http,
            endpoints,
            enricher: Enricher::new(),
            timeout_secs: config.source_timeout_secs,
            user_agent: config.source_user_agent.clone(),
            newsapi_key: config.newsapi_key.clone(),
            youtube_api_key: config.youtube_api_key.clone(),
            reddit_client_id: config.reddit_client_id.clone(),
            reddit_client_secret: config.reddit_client_secret.clone(),
        })
    }

    /// Fetch, merge, and enrich every current mention of `brand`.
    ///
    /// 1. Query all live sources concurrently with the brand's display name,
    ///    each under its own timeout.
    /// 2. Drop duplicates (first occurrence wins, so source order is the
    ///    priority order) and sort newest first.
    /// 3. When nothing survives, serve the synthetic corpus instead.
    /// 4. Enrich each mention with sentiment, keywords, and category.
    pub async fn fetch_all_mentions(&self, brand: &Brand) -> Vec<Mention> {
        let query = brand.display_name.as_str();

        let reddit = RedditSource {
            http: &self.http,
            auth_base: &self.endpoints.reddit_auth,
            api_base: &self.endpoints.reddit_api,
            public_base: &self.endpoints.reddit_public,
            client_id: self.reddit_client_id.as_deref(),
            client_secret: self.reddit_client_secret.as_deref(),
            user_agent: &self.user_agent,
        };

        let (google, reddit, hackernews, newsapi, youtube) = tokio::join!(
            self.bounded(
                query,
                MentionSource::GoogleNews,
                fetch_google_news(&self.http, &self.endpoints.google_news, query),
            ),
            self.bounded(query, MentionSource::Reddit, reddit.fetch(query)),
            self.bounded(
                query,
                MentionSource::HackerNews,
                fetch_hackernews(&self.http, &self.endpoints.hackernews, query),
            ),
            self.bounded(
                query,
                MentionSource::NewsApi,
                fetch_newsapi(
                    &self.http,
                    &self.endpoints.newsapi,
                    self.newsapi_key.as_deref(),
                    query,
                ),
            ),
            self.bounded(
                query,
                MentionSource::Youtube,
                fetch_youtube(
                    &self.http,
                    &self.endpoints.youtube,
                    self.youtube_api_key.as_deref(),
                    query,
                ),
            ),
        );

        let mut raw = google;
        raw.extend(reddit);
        raw.extend(hackernews);
        raw.extend(newsapi);
        raw.extend(youtube);

        let live = normalize(raw);
        let merged = if live.is_empty() {
            tracing::info!(
                brand = %brand.display_name,
                "no live mentions found, serving synthetic corpus"
            );
            normalize(synthetic_mentions(query))
        } else {
            let sources: HashSet<MentionSource> = live.iter().map(|m| m.source).collect();
            tracing::info!(
                brand = %brand.display_name,
                mentions = live.len(),
                sources = sources.len(),
                "live mentions collected"
            );
            live
        };

        merged
            .into_iter()
            .map(|raw| self.enricher.enrich(raw, brand))
            .collect()
    }

    /// Run one source fetch under the configured timeout, reducing every
    /// failure to an empty contribution.
    async fn bounded<F>(&self, brand: &str, source: MentionSource, fetch: F) -> Vec<RawMention>
    where
        F: Future<Output = Result<Vec<RawMention>, IngestError>>,
    {
        let outcome = match tokio::time::timeout(Duration::from_secs(self.timeout_secs), fetch)
            .await
        {
            Ok(result) => result,
            Err(_) => Err(IngestError::Timeout(self.timeout_secs)),
        };

        match outcome {
            Ok(mentions) => {
                tracing::debug!(brand, source = %source, count = mentions.len(), "source fetch complete");
                mentions
            }
            Err(e) => {
                tracing::warn!(brand, source = %source, error = %e, "source fetch failed");
                Vec::new()
            }
        }
    }
}

/// Deduplicate by [`RawMention::dedup_key`] (first occurrence wins) and sort
/// newest first.
fn normalize(mut mentions: Vec<RawMention>) -> Vec<RawMention> {
    let mut seen: HashSet<String> = HashSet::new();
    mentions.retain(|m| seen.insert(m.dedup_key().to_string()));
    mentions.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    mentions
}
