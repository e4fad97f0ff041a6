//! Mention ingestion pipeline for BrandPulse.
//!
//! Fans out to Google News RSS, Reddit, Hacker News, NewsAPI, and YouTube,
//! merges the results into one deduplicated newest-first set (with a synthetic
//! fallback corpus when every live source is empty), enriches each mention
//! with lexicon sentiment, keywords, and a category, and plans what an
//! ingestion run changes: new mentions, brand counters, and outbound events.

pub mod aggregator;
pub mod enrich;
pub mod error;
pub mod events;

mod sources;

pub use aggregator::MentionFetcher;
pub use enrich::Enricher;
pub use error::IngestError;
pub use events::{plan_ingestion, IngestionPlan, NewMentionsEvent, SpikeAlertEvent, SpikeKind};
pub use sources::SourceEndpoints;
