//! Dashboard aggregation over a brand's mention set.
//!
//! All functions take the full mention set plus an explicit `now` anchor so
//! window boundaries are deterministic under test. Nothing here fetches or
//! stores anything; callers hand the mention set in and serialize the
//! [`Dashboard`] payload straight out.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use brandpulse_core::{Brand, Category, Mention, Sentiment};

use crate::spike::{detect_spike, SpikeResult};

/// Days covered by the trend window; the comparison window of the same
/// length immediately precedes it.
const WINDOW_DAYS: i64 = 30;
/// Number of ranked keywords surfaced in the payload.
const TOP_KEYWORDS: usize = 5;

// ---------- payload types ----------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentTotals {
    pub total: u64,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

/// Summary-level sentiment counts, without the redundant total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentBreakdown {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: u64,
}

/// One calendar day's aggregate counts inside the trailing 30-day window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendBucket {
    /// UTC date in `YYYY-MM-DD` form.
    pub date: String,
    pub mentions: u64,
    pub positive: u64,
    pub negative: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Upward,
    Downward,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Upward => write!(f, "upward"),
            TrendDirection::Downward => write!(f, "downward"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Totals for the window immediately before the trend window. Kept only as
/// spike-detection input, never surfaced directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PreviousWindowTotals {
    pub total: u64,
    pub negative: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpikeReport {
    pub mentions: SpikeResult,
    pub negative: SpikeResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub positive_percentage: u32,
    /// Ranked keyword words only; counts live in [`Dashboard::top_keywords`].
    pub top_keywords: Vec<String>,
    pub trend_direction: TrendDirection,
    pub has_spike: bool,
    pub has_negative_spike: bool,
    pub total_mentions: u64,
    pub sentiment_breakdown: SentimentBreakdown,
}

/// Full dashboard payload for one brand.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub brand: Brand,
    pub stats: SentimentTotals,
    pub category_stats: Vec<CategoryCount>,
    pub trend: Vec<TrendBucket>,
    pub spikes: SpikeReport,
    pub top_keywords: Vec<KeywordCount>,
    pub summary: DashboardSummary,
}

// ---------- aggregation ----------

#[must_use]
pub fn sentiment_totals(mentions: &[Mention]) -> SentimentTotals {
    let mut totals = SentimentTotals::default();
    for mention in mentions {
        totals.total += 1;
        match mention.sentiment {
            Sentiment::Positive => totals.positive += 1,
            Sentiment::Negative => totals.negative += 1,
            Sentiment::Neutral => totals.neutral += 1,
        }
    }
    totals
}

/// Count mentions per category, emitted in taxonomy order with zero-count
/// categories omitted.
#[must_use]
pub fn category_totals(mentions: &[Mention]) -> Vec<CategoryCount> {
    let mut counts = vec![0_u64; Category::ALL.len()];
    for mention in mentions {
        if let Some(slot) = Category::ALL.iter().position(|&c| c == mention.category) {
            counts[slot] += 1;
        }
    }

    Category::ALL
        .iter()
        .zip(counts)
        .filter(|&(_, count)| count > 0)
        .map(|(&category, count)| CategoryCount { category, count })
        .collect()
}

/// Group mentions published within the last [`WINDOW_DAYS`] days by UTC
/// calendar date, ascending.
///
/// The series is sparse: days with zero mentions produce no bucket, so
/// consumers must key by date rather than by position.
#[must_use]
pub fn trend_series(mentions: &[Mention], now: DateTime<Utc>) -> Vec<TrendBucket> {
    let window_start = now - Duration::days(WINDOW_DAYS);

    let mut buckets: BTreeMap<String, TrendBucket> = BTreeMap::new();
    for mention in mentions {
        if mention.published_at < window_start {
            continue;
        }
        let date = mention.published_at.format("%Y-%m-%d").to_string();
        let bucket = buckets.entry(date.clone()).or_insert_with(|| TrendBucket {
            date,
            mentions: 0,
            positive: 0,
            negative: 0,
        });
        bucket.mentions += 1;
        match mention.sentiment {
            Sentiment::Positive => bucket.positive += 1,
            Sentiment::Negative => bucket.negative += 1,
            Sentiment::Neutral => {}
        }
    }

    buckets.into_values().collect()
}

/// Aggregate the `[now-60d, now-30d)` window used as the spike baseline.
#[must_use]
pub fn previous_window_totals(mentions: &[Mention], now: DateTime<Utc>) -> PreviousWindowTotals {
    let start = now - Duration::days(2 * WINDOW_DAYS);
    let end = now - Duration::days(WINDOW_DAYS);

    let mut totals = PreviousWindowTotals::default();
    for mention in mentions {
        if mention.published_at >= start && mention.published_at < end {
            totals.total += 1;
            if mention.sentiment == Sentiment::Negative {
                totals.negative += 1;
            }
        }
    }
    totals
}

/// Rank keywords by frequency across every mention's keyword list.
///
/// Ties keep first-seen order from the counting scan.
#[must_use]
pub fn top_keywords(mentions: &[Mention]) -> Vec<KeywordCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for word in mentions.iter().flat_map(|m| m.keywords.iter()) {
        let entry = counts.entry(word.as_str()).or_insert(0);
        if *entry == 0 {
            order.push(word.as_str());
        }
        *entry += 1;
    }

    // sort_by is stable, so equal counts preserve first-seen order.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));

    order
        .into_iter()
        .take(TOP_KEYWORDS)
        .map(|word| KeywordCount {
            word: word.to_string(),
            count: counts[word],
        })
        .collect()
}

/// Percentage of positive mentions, rounded to the nearest integer.
/// Zero when the set is empty.
#[must_use]
pub fn positive_percentage(totals: SentimentTotals) -> u32 {
    if totals.total == 0 {
        return 0;
    }
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let pct = (totals.positive as f64 / totals.total as f64 * 100.0).round() as u32;
    pct
}

/// Crude two-point direction: compare the last bucket's count against the
/// first. Fewer than 2 buckets is `Stable`; equal counts report `Downward`.
#[must_use]
pub fn trend_direction(trend: &[TrendBucket]) -> TrendDirection {
    if trend.len() < 2 {
        return TrendDirection::Stable;
    }
    match (trend.first(), trend.last()) {
        (Some(first), Some(last)) if last.mentions > first.mentions => TrendDirection::Upward,
        _ => TrendDirection::Downward,
    }
}

// ---------- assembly ----------

/// Assemble the full dashboard payload for one brand.
///
/// 1. All-time sentiment and category totals.
/// 2. Sparse trend series over the trailing 30 days.
/// 3. Previous-window totals as the spike baseline.
/// 4. Spike checks for total and negative mentions.
/// 5. Keyword ranking and the summary composition.
#[must_use]
pub fn compute_dashboard(brand: &Brand, mentions: &[Mention], now: DateTime<Utc>) -> Dashboard {
    let stats = sentiment_totals(mentions);
    let category_stats = category_totals(mentions);
    let trend = trend_series(mentions, now);
    let previous = previous_window_totals(mentions, now);

    let mention_spike = detect_spike(stats.total, previous.total);
    let negative_spike = detect_spike(stats.negative, previous.negative);

    let ranked_keywords = top_keywords(mentions);

    let summary = DashboardSummary {
        positive_percentage: positive_percentage(stats),
        top_keywords: ranked_keywords.iter().map(|k| k.word.clone()).collect(),
        trend_direction: trend_direction(&trend),
        has_spike: mention_spike.is_spike,
        has_negative_spike: negative_spike.is_spike,
        total_mentions: stats.total,
        sentiment_breakdown: SentimentBreakdown {
            positive: stats.positive,
            negative: stats.negative,
            neutral: stats.neutral,
        },
    };

    Dashboard {
        brand: brand.clone(),
        stats,
        category_stats,
        trend,
        spikes: SpikeReport {
            mentions: mention_spike,
            negative: negative_spike,
        },
        top_keywords: ranked_keywords,
        summary,
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
