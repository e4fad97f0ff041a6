//! Reddit search adapter: OAuth when credentials exist, public JSON otherwise.

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use brandpulse_core::{MentionSource, RawMention, UNKNOWN_AUTHOR};

use crate::error::IngestError;

const SEARCH_LIMIT: usize = 15;

/// Reddit OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit search listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: Option<String>,
    selftext: Option<String>,
    permalink: Option<String>,
    author: Option<String>,
    created_utc: Option<f64>,
}

/// One Reddit fetch, borrowing the shared HTTP client and endpoints.
///
/// The authenticated path needs both credentials; any failure along it
/// (token exchange, search, parse) drops down to the public JSON API, which
/// serves the same listing shape without auth.
pub(crate) struct RedditSource<'a> {
    pub(crate) http: &'a reqwest::Client,
    pub(crate) auth_base: &'a str,
    pub(crate) api_base: &'a str,
    pub(crate) public_base: &'a str,
    pub(crate) client_id: Option<&'a str>,
    pub(crate) client_secret: Option<&'a str>,
    pub(crate) user_agent: &'a str,
}

impl RedditSource<'_> {
    /// Search Reddit for brand mentions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Reddit`] or [`IngestError::Http`] only when the
    /// public fallback itself fails.
    pub(crate) async fn fetch(&self, brand_name: &str) -> Result<Vec<RawMention>, IngestError> {
        if let (Some(id), Some(secret)) = (self.client_id, self.client_secret) {
            match self.fetch_authenticated(id, secret, brand_name).await {
                Ok(mentions) => return Ok(mentions),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Reddit OAuth search failed, falling back to public API"
                    );
                }
            }
        }
        self.fetch_public(brand_name).await
    }

    async fn fetch_authenticated(
        &self,
        client_id: &str,
        client_secret: &str,
        brand_name: &str,
    ) -> Result<Vec<RawMention>, IngestError> {
        let token = self.fetch_token(client_id, client_secret).await?;

        let url = format!(
            "{}/search.json?q={}&limit={SEARCH_LIMIT}&sort=new",
            self.api_base,
            encode(brand_name)
        );
        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header("User-Agent", self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IngestError::Reddit(format!(
                "search failed with status {}",
                response.status()
            )));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| IngestError::Reddit(format!("response parse error: {e}")))?;

        Ok(to_mentions(listing))
    }

    async fn fetch_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String, IngestError> {
        let response = self
            .http
            .post(format!("{}/api/v1/access_token", self.auth_base))
            .header("User-Agent", self.user_agent)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IngestError::Reddit(format!(
                "token exchange failed with status {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| IngestError::Reddit(format!("token parse error: {e}")))?;

        Ok(token.access_token)
    }

    async fn fetch_public(&self, brand_name: &str) -> Result<Vec<RawMention>, IngestError> {
        let url = format!(
            "{}/search.json?q={}&limit={SEARCH_LIMIT}&sort=new",
            self.public_base,
            encode(brand_name)
        );
        let response = self
            .http
            .get(&url)
            .header("User-Agent", self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IngestError::Reddit(format!(
                "public search failed with status {}",
                response.status()
            )));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| IngestError::Reddit(format!("response parse error: {e}")))?;

        Ok(to_mentions(listing))
    }
}

fn encode(brand_name: &str) -> String {
    utf8_percent_encode(brand_name, NON_ALPHANUMERIC).to_string()
}

fn to_mentions(listing: Listing) -> Vec<RawMention> {
    listing
        .data
        .children
        .into_iter()
        .map(|post| to_mention(post.data))
        .collect()
}

fn to_mention(post: PostData) -> RawMention {
    let title = post.title.unwrap_or_default();
    let content = match post.selftext {
        Some(text) if !text.is_empty() => text,
        _ => title.clone(),
    };
    let url = post
        .permalink
        .map(|p| format!("https://reddit.com{p}"))
        .unwrap_or_default();
    #[allow(clippy::cast_possible_truncation)]
    let published_at = post
        .created_utc
        .and_then(|secs| DateTime::from_timestamp(secs as i64, 0))
        .unwrap_or_else(Utc::now);

    RawMention {
        source: MentionSource::Reddit,
        title,
        content,
        url,
        author: post.author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        published_at,
    }
}
