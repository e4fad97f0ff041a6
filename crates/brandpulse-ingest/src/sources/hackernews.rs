//! Hacker News mention adapter (Firebase REST API). Keyless.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Deserialize;

use brandpulse_core::{MentionSource, RawMention, UNKNOWN_AUTHOR};

use crate::error::IngestError;

/// Front-page stories scanned per fetch.
const STORY_SCAN_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
struct Item {
    id: u64,
    title: Option<String>,
    text: Option<String>,
    url: Option<String>,
    by: Option<String>,
    time: Option<i64>,
}

/// Fetch current top stories and keep the ones that mention the brand.
///
/// Story items are fetched concurrently; an item that fails to load or parse
/// is skipped rather than failing the whole source. Matching is a
/// case-insensitive substring check over title and text.
///
/// # Errors
///
/// Returns [`IngestError::Http`] if the top-stories listing cannot be
/// fetched.
pub(crate) async fn fetch_hackernews(
    http: &reqwest::Client,
    base_url: &str,
    brand_name: &str,
) -> Result<Vec<RawMention>, IngestError> {
    let top_url = format!("{base_url}/v0/topstories.json");
    let ids: Vec<u64> = http
        .get(&top_url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let item_futures = ids.iter().take(STORY_SCAN_LIMIT).map(|id| {
        let url = format!("{base_url}/v0/item/{id}.json");
        async move { http.get(&url).send().await.ok()?.json::<Item>().await.ok() }
    });
    let items = join_all(item_futures).await;

    let needle = brand_name.to_lowercase();
    Ok(items
        .into_iter()
        .flatten()
        .filter(|item| mentions_brand(item, &needle))
        .map(to_mention)
        .collect())
}

fn mentions_brand(item: &Item, needle: &str) -> bool {
    let title = item.title.as_deref().unwrap_or("").to_lowercase();
    let text = item.text.as_deref().unwrap_or("").to_lowercase();
    title.contains(needle) || text.contains(needle)
}

fn to_mention(item: Item) -> RawMention {
    let title = item.title.unwrap_or_default();
    let content = match item.text {
        Some(text) if !text.is_empty() => text,
        _ => title.clone(),
    };
    // Ask HN posts have no outbound link; point at the discussion instead.
    let url = match item.url {
        Some(url) if !url.is_empty() => url,
        _ => format!("https://news.ycombinator.com/item?id={}", item.id),
    };
    let published_at = item
        .time
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);

    RawMention {
        source: MentionSource::HackerNews,
        title,
        content,
        url,
        author: item.by.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        published_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, title: &str) -> Item {
        Item {
            id,
            title: Some(title.to_string()),
            text: None,
            url: None,
            by: None,
            time: Some(1_718_100_000),
        }
    }

    #[test]
    fn brand_match_is_case_insensitive() {
        let story = item(1, "Why Acme Cola Scaled Down");
        assert!(mentions_brand(&story, "acme cola"));
        assert!(!mentions_brand(&story, "northwind"));
    }

    #[test]
    fn brand_match_checks_text_body() {
        let mut story = item(2, "Show HN: soda tracker");
        story.text = Some("Built to follow Acme Cola chatter".to_string());
        assert!(mentions_brand(&story, "acme cola"));
    }

    #[test]
    fn discussion_link_used_when_story_has_no_url() {
        let mention = to_mention(item(42, "Acme Cola thread"));
        assert_eq!(mention.url, "https://news.ycombinator.com/item?id=42");
        assert_eq!(mention.author, UNKNOWN_AUTHOR);
        assert_eq!(mention.content, "Acme Cola thread");
        assert_eq!(mention.source, MentionSource::HackerNews);
    }

    #[test]
    fn story_timestamp_is_unix_seconds() {
        let mention = to_mention(item(7, "t"));
        assert_eq!(
            mention.published_at,
            DateTime::from_timestamp(1_718_100_000, 0).unwrap()
        );
    }
}
