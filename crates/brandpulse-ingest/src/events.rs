//! Ingestion planning: which fetched mentions are new, what the brand's
//! counters become, and which outbound events to emit.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use brandpulse_analytics::{detect_spike, SpikeResult};
use brandpulse_core::{Brand, Mention};

/// Which count spiked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpikeKind {
    Mentions,
    NegativeMentions,
}

/// Outbound event for a batch of newly ingested mentions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMentionsEvent {
    pub brand_id: Uuid,
    pub brand_name: String,
    pub count: usize,
    pub mentions: Vec<Mention>,
    /// Present only when this batch pushed the totals over the spike
    /// threshold.
    pub spike: Option<SpikeResult>,
}

/// Outbound alert raised when a count grows past the spike threshold.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpikeAlertEvent {
    pub brand_id: Uuid,
    pub brand_name: String,
    #[serde(rename = "type")]
    pub kind: SpikeKind,
    pub increase: f64,
    pub message: String,
}

impl SpikeAlertEvent {
    #[must_use]
    pub fn new(brand: &Brand, kind: SpikeKind, percentage: f64) -> Self {
        let message = match kind {
            SpikeKind::Mentions => format!("Mentions increased by {percentage}%"),
            SpikeKind::NegativeMentions => {
                format!("Negative mentions increased by {percentage}%")
            }
        };
        Self {
            brand_id: brand.id,
            brand_name: brand.display_name.clone(),
            kind,
            increase: percentage,
            message,
        }
    }
}

/// Everything one ingestion run decided, ready to persist and publish.
#[derive(Debug, Clone)]
pub struct IngestionPlan {
    /// Fetched mentions whose dedup key was not already stored.
    pub new_mentions: Vec<Mention>,
    /// Brand total after this run.
    pub total_mentions: u64,
    /// Brand scrape timestamp after this run.
    pub last_scraped: Option<DateTime<Utc>>,
    pub spike: SpikeResult,
    pub new_mentions_event: Option<NewMentionsEvent>,
    pub spike_alert: Option<SpikeAlertEvent>,
}

impl IngestionPlan {
    /// Write the planned counters back onto the brand.
    pub fn apply_to(&self, brand: &mut Brand) {
        brand.total_mentions = self.total_mentions;
        brand.last_scraped = self.last_scraped;
    }
}

/// Decide what one ingestion run changes for `brand`.
///
/// `existing_keys` holds the dedup keys of every already-stored mention; the
/// first run for a brand passes an empty set so the whole fetch counts as
/// new. A run with zero new mentions leaves the counters untouched and emits
/// nothing. The spike compares the would-be total against the current total,
/// so a brand starting from zero never alerts on its first batch.
#[must_use]
pub fn plan_ingestion(
    brand: &Brand,
    fetched: Vec<Mention>,
    existing_keys: &HashSet<String>,
    now: DateTime<Utc>,
) -> IngestionPlan {
    let new_mentions: Vec<Mention> = fetched
        .into_iter()
        .filter(|m| !existing_keys.contains(m.dedup_key()))
        .collect();
    let count = new_mentions.len();

    let total_before = brand.total_mentions;
    let total_after = total_before + count as u64;
    let spike = detect_spike(total_after, total_before);

    if count == 0 {
        return IngestionPlan {
            new_mentions,
            total_mentions: total_before,
            last_scraped: brand.last_scraped,
            spike,
            new_mentions_event: None,
            spike_alert: None,
        };
    }

    let spike_alert = spike
        .is_spike
        .then(|| SpikeAlertEvent::new(brand, SpikeKind::Mentions, spike.percentage));
    let new_mentions_event = NewMentionsEvent {
        brand_id: brand.id,
        brand_name: brand.display_name.clone(),
        count,
        mentions: new_mentions.clone(),
        spike: spike.is_spike.then_some(spike),
    };

    IngestionPlan {
        new_mentions,
        total_mentions: total_after,
        last_scraped: Some(now),
        spike,
        new_mentions_event: Some(new_mentions_event),
        spike_alert,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use brandpulse_core::{Category, MentionSource, Sentiment};

    use super::*;

    fn brand() -> Brand {
        Brand::new("Acme Cola").unwrap()
    }

    fn mention(brand: &Brand, title: &str, url: &str) -> Mention {
        Mention {
            id: Uuid::new_v4(),
            source: MentionSource::GoogleNews,
            title: title.to_string(),
            content: String::new(),
            url: url.to_string(),
            author: "tester".to_string(),
            published_at: Utc::now(),
            sentiment: Sentiment::Neutral,
            sentiment_score: 0,
            category: Category::General,
            keywords: Vec::new(),
            brand_id: brand.id,
            brand_name: brand.name.clone(),
        }
    }

    #[test]
    fn first_run_counts_the_whole_fetch_as_new() {
        let brand = brand();
        let fetched = vec![
            mention(&brand, "a", "https://example.com/a"),
            mention(&brand, "b", "https://example.com/b"),
            mention(&brand, "c", "https://example.com/c"),
        ];
        let now = Utc::now();

        let plan = plan_ingestion(&brand, fetched, &HashSet::new(), now);

        assert_eq!(plan.new_mentions.len(), 3);
        assert_eq!(plan.total_mentions, 3);
        assert_eq!(plan.last_scraped, Some(now));
        // Zero baseline: growth exists but no spike can be computed.
        assert!(!plan.spike.is_spike);
        let event = plan.new_mentions_event.unwrap();
        assert_eq!(event.count, 3);
        assert_eq!(event.brand_name, "Acme Cola");
        assert!(event.spike.is_none());
        assert!(plan.spike_alert.is_none());
    }

    #[test]
    fn stored_keys_filter_out_known_mentions() {
        let mut brand = brand();
        brand.total_mentions = 5;
        let fetched = vec![
            mention(&brand, "seen before", "https://example.com/seen"),
            mention(&brand, "brand new", "https://example.com/new"),
        ];
        let existing: HashSet<String> = ["https://example.com/seen".to_string()].into();

        let plan = plan_ingestion(&brand, fetched, &existing, Utc::now());

        assert_eq!(plan.new_mentions.len(), 1);
        assert_eq!(plan.new_mentions[0].title, "brand new");
        assert_eq!(plan.total_mentions, 6);
    }

    #[test]
    fn urlless_mentions_filter_by_title() {
        let brand = brand();
        let fetched = vec![mention(&brand, "same headline", "")];
        let existing: HashSet<String> = ["same headline".to_string()].into();

        let plan = plan_ingestion(&brand, fetched, &existing, Utc::now());

        assert!(plan.new_mentions.is_empty());
    }

    #[test]
    fn zero_new_mentions_change_nothing_and_emit_nothing() {
        let mut brand = brand();
        brand.total_mentions = 7;
        let earlier = Utc::now() - Duration::hours(4);
        brand.last_scraped = Some(earlier);
        let fetched = vec![mention(&brand, "seen", "https://example.com/seen")];
        let existing: HashSet<String> = ["https://example.com/seen".to_string()].into();

        let plan = plan_ingestion(&brand, fetched, &existing, Utc::now());

        assert!(plan.new_mentions.is_empty());
        assert_eq!(plan.total_mentions, 7);
        assert_eq!(plan.last_scraped, Some(earlier));
        assert!(!plan.spike.is_spike);
        assert!(plan.new_mentions_event.is_none());
        assert!(plan.spike_alert.is_none());
    }

    #[test]
    fn thirty_percent_growth_raises_the_alert() {
        let mut brand = brand();
        brand.total_mentions = 10;
        let fetched = vec![
            mention(&brand, "a", "https://example.com/a"),
            mention(&brand, "b", "https://example.com/b"),
            mention(&brand, "c", "https://example.com/c"),
        ];

        let plan = plan_ingestion(&brand, fetched, &HashSet::new(), Utc::now());

        assert_eq!(plan.total_mentions, 13);
        assert!(plan.spike.is_spike);
        assert_eq!(plan.spike.increase, 3);
        let event = plan.new_mentions_event.unwrap();
        assert_eq!(event.spike, Some(plan.spike));
        let alert = plan.spike_alert.unwrap();
        assert_eq!(alert.kind, SpikeKind::Mentions);
        assert_eq!(alert.message, "Mentions increased by 30%");
        assert!((alert.increase - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn modest_growth_raises_no_alert() {
        let mut brand = brand();
        brand.total_mentions = 10;
        let fetched = vec![
            mention(&brand, "a", "https://example.com/a"),
            mention(&brand, "b", "https://example.com/b"),
        ];

        let plan = plan_ingestion(&brand, fetched, &HashSet::new(), Utc::now());

        assert_eq!(plan.total_mentions, 12);
        assert!(!plan.spike.is_spike);
        assert!(plan.new_mentions_event.unwrap().spike.is_none());
        assert!(plan.spike_alert.is_none());
    }

    #[test]
    fn alert_messages_format_fractional_percentages() {
        let brand = brand();
        let alert = SpikeAlertEvent::new(&brand, SpikeKind::NegativeMentions, 42.86);
        assert_eq!(alert.message, "Negative mentions increased by 42.86%");
    }

    #[test]
    fn apply_to_writes_the_planned_counters() {
        let mut brand = brand();
        let fetched = vec![mention(&brand, "a", "https://example.com/a")];
        let now = Utc::now();
        let plan = plan_ingestion(&brand, fetched, &HashSet::new(), now);

        plan.apply_to(&mut brand);

        assert_eq!(brand.total_mentions, 1);
        assert_eq!(brand.last_scraped, Some(now));
    }

    #[test]
    fn events_serialize_in_camel_case() {
        let mut brand = brand();
        brand.total_mentions = 10;
        let fetched = (0..3)
            .map(|i| mention(&brand, &format!("t{i}"), &format!("https://example.com/{i}")))
            .collect();
        let plan = plan_ingestion(&brand, fetched, &HashSet::new(), Utc::now());

        let event = serde_json::to_value(plan.new_mentions_event.unwrap()).unwrap();
        assert_eq!(event["brandName"], serde_json::json!("Acme Cola"));
        assert_eq!(event["count"], serde_json::json!(3));
        assert!(event["spike"]["isSpike"].as_bool().unwrap());

        let alert = serde_json::to_value(plan.spike_alert.unwrap()).unwrap();
        assert_eq!(alert["type"], serde_json::json!("mentions"));
        assert_eq!(alert["increase"], serde_json::json!(30.0));
    }
}
