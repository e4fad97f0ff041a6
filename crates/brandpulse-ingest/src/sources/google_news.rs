//! Google News RSS mention adapter. Keyless, highest priority.

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use quick_xml::events::Event;
use quick_xml::Reader;

use brandpulse_core::{MentionSource, RawMention};

use crate::error::IngestError;

const MAX_ITEMS: usize = 15;
/// Author used when the feed names neither a creator nor a publisher.
const FALLBACK_AUTHOR: &str = "Google News";

/// Fetch mentions from the Google News RSS search feed.
///
/// Returns up to [`MAX_ITEMS`] items for a plain brand-name query.
///
/// # Errors
///
/// Returns [`IngestError::Http`] on network failure or a non-2xx status, or
/// [`IngestError::Xml`] on malformed RSS.
pub(crate) async fn fetch_google_news(
    http: &reqwest::Client,
    base_url: &str,
    brand_name: &str,
) -> Result<Vec<RawMention>, IngestError> {
    let encoded = utf8_percent_encode(brand_name, NON_ALPHANUMERIC).to_string();
    let url = format!("{base_url}/rss/search?q={encoded}&hl=en-US&gl=US&ceid=US:en");

    let body = http
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let mut mentions = parse_news_rss(&body)?;
    mentions.truncate(MAX_ITEMS);
    Ok(mentions)
}

/// Fields accumulated while walking one `<item>`.
#[derive(Default)]
struct ItemFields {
    title: String,
    link: String,
    description: String,
    creator: String,
    publisher: String,
    pub_date: String,
}

impl ItemFields {
    fn assign(&mut self, tag: &str, value: String) {
        match tag {
            "title" => self.title = value,
            "link" => self.link = value,
            "description" => self.description = strip_html(&value),
            // rss-style feeds carry the byline in dc:creator; Google News
            // puts the publisher name in the <source> element instead.
            "dc:creator" | "creator" => self.creator = value,
            "source" => self.publisher = value,
            "pubDate" => self.pub_date = value,
            _ => {}
        }
    }

    fn into_mention(self) -> Option<RawMention> {
        if self.title.is_empty() && self.link.is_empty() {
            return None;
        }

        let content = if self.description.is_empty() {
            self.title.clone()
        } else {
            self.description
        };
        let author = if !self.creator.is_empty() {
            self.creator
        } else if !self.publisher.is_empty() {
            self.publisher
        } else {
            FALLBACK_AUTHOR.to_string()
        };
        let published_at = DateTime::parse_from_rfc2822(&self.pub_date)
            .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

        Some(RawMention {
            source: MentionSource::GoogleNews,
            title: self.title,
            content,
            url: self.link,
            author,
            published_at,
        })
    }
}

/// Parse an RSS feed body into raw mentions.
///
/// # Errors
///
/// Returns [`IngestError::Xml`] if the XML is malformed.
pub(crate) fn parse_news_rss(xml: &str) -> Result<Vec<RawMention>, IngestError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut mentions = Vec::new();
    let mut fields = ItemFields::default();
    let mut in_item = false;
    let mut current_tag = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                if name == "item" {
                    in_item = true;
                    fields = ItemFields::default();
                } else {
                    current_tag = name;
                }
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let name = std::str::from_utf8(raw.as_ref()).unwrap_or("");
                if name == "item" && in_item {
                    in_item = false;
                    mentions.extend(std::mem::take(&mut fields).into_mention());
                }
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    fields.assign(&current_tag, text);
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    fields.assign(&current_tag, text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(IngestError::Xml(e)),
            _ => {}
        }
    }

    Ok(mentions)
}

/// Strip HTML tags from a string, returning plain text.
fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }
    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>Google News</title>
    <item>
      <title>Acme Cola Launches New Flavor</title>
      <link>https://example.com/acme-news-1</link>
      <description>&lt;b&gt;Acme Cola&lt;/b&gt; announced a new flavor line today.</description>
      <pubDate>Tue, 11 Jun 2024 08:30:00 GMT</pubDate>
      <source url="https://dailybeverage.example">Daily Beverage</source>
    </item>
    <item>
      <title>Soda Market Keeps Growing</title>
      <link>https://example.com/soda-market</link>
      <description>The soda sector is expanding rapidly.</description>
      <dc:creator>Jordan Field</dc:creator>
      <pubDate>Mon, 10 Jun 2024 12:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_items_with_publisher_and_creator_authors() {
        let mentions = parse_news_rss(SAMPLE_RSS).expect("should parse valid RSS");
        assert_eq!(mentions.len(), 2);

        assert_eq!(mentions[0].source, MentionSource::GoogleNews);
        assert_eq!(mentions[0].title, "Acme Cola Launches New Flavor");
        assert_eq!(mentions[0].url, "https://example.com/acme-news-1");
        // No dc:creator, so the <source> publisher is the author.
        assert_eq!(mentions[0].author, "Daily Beverage");
        assert_eq!(
            mentions[0].content,
            "Acme Cola announced a new flavor line today."
        );
        assert_eq!(
            mentions[0].published_at,
            chrono::Utc.with_ymd_and_hms(2024, 6, 11, 8, 30, 0).unwrap()
        );

        assert_eq!(mentions[1].author, "Jordan Field");
    }

    #[test]
    fn item_without_description_falls_back_to_title() {
        let xml = r#"<rss><channel><item>
            <title>Acme Cola spotted</title>
            <link>https://example.com/x</link>
        </item></channel></rss>"#;
        let mentions = parse_news_rss(xml).expect("should parse");
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].content, "Acme Cola spotted");
        assert_eq!(mentions[0].author, FALLBACK_AUTHOR);
    }

    #[test]
    fn item_without_link_keeps_empty_url() {
        let xml = r#"<rss><channel><item>
            <title>Linkless note</title>
        </item></channel></rss>"#;
        let mentions = parse_news_rss(xml).expect("should parse");
        assert_eq!(mentions.len(), 1);
        assert!(mentions[0].url.is_empty());
    }

    #[test]
    fn empty_feed_returns_empty_vec() {
        let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel></channel></rss>"#;
        let mentions = parse_news_rss(xml).expect("should parse empty RSS");
        assert!(mentions.is_empty());
    }

    #[test]
    fn malformed_xml_is_handled() {
        let xml = "<rss><channel><item><title>Unclosed";
        match parse_news_rss(xml) {
            Ok(mentions) => assert!(mentions.is_empty()),
            Err(IngestError::Xml(_)) => {}
            Err(e) => panic!("unexpected error type: {e}"),
        }
    }

    #[test]
    fn strip_html_removes_tags() {
        assert_eq!(strip_html("<b>bold</b> text"), "bold text");
        assert_eq!(strip_html("plain"), "plain");
    }
}
