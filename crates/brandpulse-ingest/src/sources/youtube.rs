//! YouTube Data API v3 search adapter.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use brandpulse_core::{MentionSource, RawMention, UNKNOWN_AUTHOR};

use crate::error::IngestError;

const MAX_RESULTS: &str = "10";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: VideoId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    description: Option<String>,
    channel_title: Option<String>,
    published_at: Option<String>,
}

/// Search YouTube for recent videos mentioning the brand.
///
/// Returns an empty set without issuing a request when no API key is
/// configured.
///
/// # Errors
///
/// Returns [`IngestError::YouTube`] when the daily quota is exhausted and
/// [`IngestError::Http`] on other transport or status failures.
pub(crate) async fn fetch_youtube(
    http: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    brand_name: &str,
) -> Result<Vec<RawMention>, IngestError> {
    let Some(key) = api_key else {
        return Ok(Vec::new());
    };

    let response = http
        .get(format!("{base_url}/youtube/v3/search"))
        .query(&[
            ("part", "snippet"),
            ("q", brand_name),
            ("type", "video"),
            ("maxResults", MAX_RESULTS),
            ("order", "date"),
            ("key", key),
        ])
        .send()
        .await?;

    if response.status() == reqwest::StatusCode::FORBIDDEN {
        return Err(IngestError::YouTube("quota exceeded".to_string()));
    }

    let envelope: Envelope = response.error_for_status()?.json().await?;
    Ok(envelope.items.into_iter().map(to_mention).collect())
}

fn to_mention(item: SearchItem) -> RawMention {
    let title = item.snippet.title.unwrap_or_default();
    let content = match item.snippet.description {
        Some(text) if !text.is_empty() => text,
        _ => title.clone(),
    };
    let url = item
        .id
        .video_id
        .map(|id| format!("https://youtube.com/watch?v={id}"))
        .unwrap_or_default();
    let published_at = item
        .snippet
        .published_at
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        .map_or_else(Utc::now, |dt| dt.with_timezone(&Utc));

    RawMention {
        source: MentionSource::Youtube,
        title,
        content,
        url,
        author: item
            .snippet
            .channel_title
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        published_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item() -> SearchItem {
        SearchItem {
            id: VideoId {
                video_id: Some("dQw4w9WgXcQ".to_string()),
            },
            snippet: Snippet {
                title: Some("Acme Cola taste test".to_string()),
                description: Some("We try the new flavor.".to_string()),
                channel_title: Some("Snack Review Lab".to_string()),
                published_at: Some("2024-06-10T17:00:00Z".to_string()),
            },
        }
    }

    #[test]
    fn video_id_builds_watch_url() {
        let mention = to_mention(item());
        assert_eq!(mention.url, "https://youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(mention.source, MentionSource::Youtube);
        assert_eq!(mention.author, "Snack Review Lab");
        assert_eq!(
            mention.published_at,
            Utc.with_ymd_and_hms(2024, 6, 10, 17, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_video_id_leaves_url_empty() {
        let mut i = item();
        i.id.video_id = None;
        assert_eq!(to_mention(i).url, "");
    }

    #[test]
    fn empty_description_falls_back_to_title() {
        let mut i = item();
        i.snippet.description = Some(String::new());
        assert_eq!(to_mention(i).content, "Acme Cola taste test");
    }
}
