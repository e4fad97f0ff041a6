use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author value used when a provider supplies none.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Where a mention was collected from.
///
/// Live providers are listed in fan-out priority order. `Synthetic` marks
/// fallback content generated when no live provider returns data; it is the
/// only way callers can tell fallback output from real output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MentionSource {
    GoogleNews,
    Reddit,
    #[serde(rename = "hackernews")]
    HackerNews,
    #[serde(rename = "newsapi")]
    NewsApi,
    Youtube,
    Synthetic,
}

impl MentionSource {
    /// Stable tag used in logs and wire payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MentionSource::GoogleNews => "google-news",
            MentionSource::Reddit => "reddit",
            MentionSource::HackerNews => "hackernews",
            MentionSource::NewsApi => "newsapi",
            MentionSource::Youtube => "youtube",
            MentionSource::Synthetic => "synthetic",
        }
    }
}

impl std::fmt::Display for MentionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

/// Fixed mention taxonomy, in classification precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Complaint,
    Review,
    Product,
    Support,
    #[default]
    General,
}

impl Category {
    /// Every category, in precedence order with `General` last.
    pub const ALL: [Category; 5] = [
        Category::Complaint,
        Category::Review,
        Category::Product,
        Category::Support,
        Category::General,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Complaint => write!(f, "complaint"),
            Category::Review => write!(f, "review"),
            Category::Product => write!(f, "product"),
            Category::Support => write!(f, "support"),
            Category::General => write!(f, "general"),
        }
    }
}

/// A mention as produced by a source adapter, before enrichment.
#[derive(Debug, Clone)]
pub struct RawMention {
    pub source: MentionSource,
    pub title: String,
    /// Body text; adapters fall back to the title when the provider has no body.
    pub content: String,
    /// May be empty when the provider has no canonical link.
    pub url: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
}

impl RawMention {
    /// Dedup identity: the url when non-empty, otherwise the title.
    #[must_use]
    pub fn dedup_key(&self) -> &str {
        if self.url.is_empty() {
            &self.title
        } else {
            &self.url
        }
    }
}

/// One fully enriched unit of brand-related content.
///
/// Built from a [`RawMention`] in a single enrichment step that assigns
/// sentiment, category, and keywords together; immutable afterwards. Field
/// names serialize in camelCase to match the event and dashboard payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub id: Uuid,
    pub source: MentionSource,
    pub title: String,
    pub content: String,
    pub url: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub sentiment: Sentiment,
    /// Signed lexicon sum backing the sentiment label.
    pub sentiment_score: i32,
    pub category: Category,
    /// Up to 5 distinct terms, most frequent first.
    pub keywords: Vec<String>,
    pub brand_id: Uuid,
    /// Lowercase brand key, denormalized from the owning [`crate::brands::Brand`].
    pub brand_name: String,
}

impl Mention {
    /// Dedup identity: the url when non-empty, otherwise the title.
    #[must_use]
    pub fn dedup_key(&self) -> &str {
        if self.url.is_empty() {
            &self.title
        } else {
            &self.url
        }
    }
}
