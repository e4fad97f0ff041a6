//! Mention source adapters.

mod google_news;
mod hackernews;
mod newsapi;
mod reddit;
mod synthetic;
mod youtube;

pub(crate) use google_news::fetch_google_news;
pub(crate) use hackernews::fetch_hackernews;
pub(crate) use newsapi::fetch_newsapi;
pub(crate) use reddit::RedditSource;
pub(crate) use synthetic::synthetic_mentions;
pub(crate) use youtube::fetch_youtube;

/// Base URLs per provider.
///
/// Defaults point at the live services; tests swap in [`SourceEndpoints::unified`]
/// to route every provider to one wiremock server.
#[derive(Debug, Clone)]
pub struct SourceEndpoints {
    pub google_news: String,
    /// Token-exchange host for Reddit OAuth.
    pub reddit_auth: String,
    /// Search host used with a bearer token.
    pub reddit_api: String,
    /// Search host for the keyless public JSON API.
    pub reddit_public: String,
    pub hackernews: String,
    pub newsapi: String,
    pub youtube: String,
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            google_news: "https://news.google.com".to_string(),
            reddit_auth: "https://www.reddit.com".to_string(),
            reddit_api: "https://oauth.reddit.com".to_string(),
            reddit_public: "https://www.reddit.com".to_string(),
            hackernews: "https://hacker-news.firebaseio.com".to_string(),
            newsapi: "https://newsapi.org".to_string(),
            youtube: "https://www.googleapis.com".to_string(),
        }
    }
}

impl SourceEndpoints {
    /// Point every provider at the same base URL.
    #[must_use]
    pub fn unified(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            google_news: base.clone(),
            reddit_auth: base.clone(),
            reddit_api: base.clone(),
            reddit_public: base.clone(),
            hackernews: base.clone(),
            newsapi: base.clone(),
            youtube: base,
        }
    }
}
