//! NewsAPI `/v2/everything` adapter. Keyless installs skip this source.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use brandpulse_core::{MentionSource, RawMention, UNKNOWN_AUTHOR};

use crate::error::IngestError;

const PAGE_SIZE: &str = "15";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    author: Option<String>,
    source: Option<ArticleSource>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

/// Fetch recent news articles mentioning the brand.
///
/// Returns an empty set without issuing a request when no API key is
/// configured.
///
/// # Errors
///
/// Returns [`IngestError::NewsApi`] on rate limiting and [`IngestError::Http`]
/// on other transport or status failures.
pub(crate) async fn fetch_newsapi(
    http: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    brand_name: &str,
) -> Result<Vec<RawMention>, IngestError> {
    let Some(key) = api_key else {
        return Ok(Vec::new());
    };

    let response = http
        .get(format!("{base_url}/v2/everything"))
        .query(&[
            ("q", brand_name),
            ("sortBy", "publishedAt"),
            ("pageSize", PAGE_SIZE),
            ("language", "en"),
            ("apiKey", key),
        ])
        .send()
        .await?;

    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(IngestError::NewsApi("rate limit reached".to_string()));
    }

    let envelope: Envelope = response.error_for_status()?.json().await?;
    Ok(envelope.articles.into_iter().map(to_mention).collect())
}

fn to_mention(article: Article) -> RawMention {
    let title = article.title.unwrap_or_default();
    let content = match article.description {
        Some(text) if !text.is_empty() => text,
        _ => title.clone(),
    };
    let author = article
        .author
        .filter(|a| !a.is_empty())
        .or_else(|| article.source.and_then(|s| s.name))
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
    let published_at = article
        .published_at
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        .map_or_else(Utc::now, |dt| dt.with_timezone(&Utc));

    RawMention {
        source: MentionSource::NewsApi,
        title,
        content,
        url: article.url.unwrap_or_default(),
        author,
        published_at,
    }
}
