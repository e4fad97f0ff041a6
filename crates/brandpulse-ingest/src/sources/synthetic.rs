//! Built-in demo mentions served when every live source comes back empty.

use chrono::{Duration, Utc};

use brandpulse_core::{MentionSource, RawMention};

/// Hours between consecutive synthetic mentions, newest first.
const SPREAD_HOURS: i64 = 6;

const MAX_SYNTHETIC: usize = 20;

/// (title, content, author, url) templates; `[Brand]` is replaced with the
/// brand's display name. Every url is distinct so deduplication keeps all of
/// them, and the texts cover the full sentiment and category range.
const CORPUS: &[(&str, &str, &str, &str)] = &[
    (
        "Just tried [Brand] for the first time",
        "Honestly impressed, the quality is great and the experience was smooth.",
        "caffeine_fiend",
        "https://forum.example.com/t/first-try/101",
    ),
    (
        "[Brand] launches a new product line",
        "The launch announcement highlights an innovative feature set and a new design.",
        "Market Watch Desk",
        "https://news.example.com/articles/launch-2291",
    ),
    (
        "My [Brand] order arrived broken",
        "Asking for a refund, the packaging was damaged and support has not replied yet.",
        "unhappy_customer_77",
        "https://forum.example.com/t/order-issue/102",
    ),
    (
        "Three month review of [Brand]",
        "Sharing my experience and rating after daily use. Solid overall, worth the price.",
        "longform_reviews",
        "https://blog.example.com/reviews/three-months",
    ),
    (
        "How do I contact [Brand] customer service?",
        "I have a question about my account and cannot find the support page.",
        "confused_user",
        "https://forum.example.com/t/support-question/103",
    ),
    (
        "[Brand] trending after viral video",
        "A clip featuring the product passed a million views overnight.",
        "trend_tracker",
        "https://social.example.com/posts/884213",
    ),
    (
        "Is [Brand] worth it?",
        "Curious what everyone thinks, looking for honest opinions before I buy.",
        "deal_hunter",
        "https://forum.example.com/t/worth-it/104",
    ),
    (
        "[Brand] app keeps crashing on my phone",
        "The latest version is buggy, it crashed three times today. Terrible update.",
        "mobile_power_user",
        "https://forum.example.com/t/app-crash/105",
    ),
    (
        "Love the new [Brand] packaging",
        "The redesign looks amazing and feels premium. Happy with the change.",
        "design_spotter",
        "https://social.example.com/posts/884290",
    ),
    (
        "[Brand] announces quarterly results",
        "Revenue grew year over year, with the new release cited as the main driver.",
        "Business Wire Desk",
        "https://news.example.com/articles/results-q2",
    ),
    (
        "Comparing [Brand] with its biggest competitor",
        "Side by side rating across price, quality, and support response times.",
        "versus_channel",
        "https://video.example.com/watch/cmp-55",
    ),
    (
        "[Brand] support resolved my ticket in a day",
        "Filed a help ticket on Monday, fixed by Tuesday. Nice and reliable service.",
        "grateful_user",
        "https://forum.example.com/t/support-praise/106",
    ),
    (
        "Spotted [Brand] at the airport",
        "They seem to be everywhere lately.",
        "frequent_flyer",
        "https://social.example.com/posts/884377",
    ),
    (
        "Why I stopped using [Brand]",
        "The pricing change felt wrong and the alternatives caught up. Disappointed.",
        "churned_customer",
        "https://blog.example.com/posts/why-i-left",
    ),
];

/// Deterministic demo corpus for a brand, newest first.
///
/// Item `i` is timestamped `SPREAD_HOURS * i` hours in the past so the set
/// spans a few days of activity instead of a single instant.
pub(crate) fn synthetic_mentions(brand_name: &str) -> Vec<RawMention> {
    let now = Utc::now();
    CORPUS
        .iter()
        .take(MAX_SYNTHETIC)
        .enumerate()
        .map(|(i, &(title, content, author, url))| {
            #[allow(clippy::cast_possible_wrap)]
            let age = Duration::hours(SPREAD_HOURS * i as i64);
            RawMention {
                source: MentionSource::Synthetic,
                title: title.replace("[Brand]", brand_name),
                content: content.replace("[Brand]", brand_name),
                url: url.to_string(),
                author: author.to_string(),
                published_at: now - age,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn templates_substitute_the_brand_name() {
        let mentions = synthetic_mentions("Acme Cola");
        assert!(mentions[0].title.contains("Acme Cola"));
        assert!(!mentions.iter().any(|m| m.title.contains("[Brand]")));
        assert!(!mentions.iter().any(|m| m.content.contains("[Brand]")));
    }

    #[test]
    fn mentions_step_back_in_six_hour_increments() {
        let mentions = synthetic_mentions("Acme Cola");
        let gap = mentions[0].published_at - mentions[1].published_at;
        assert_eq!(gap, Duration::hours(SPREAD_HOURS));
        assert!(mentions[0].published_at > mentions.last().unwrap().published_at);
    }

    #[test]
    fn every_mention_is_marked_synthetic() {
        assert!(synthetic_mentions("Acme Cola")
            .iter()
            .all(|m| m.source == MentionSource::Synthetic));
    }

    #[test]
    fn urls_are_distinct_so_dedup_keeps_them() {
        let mentions = synthetic_mentions("Acme Cola");
        let keys: HashSet<_> = mentions.iter().map(|m| m.dedup_key().to_string()).collect();
        assert_eq!(keys.len(), mentions.len());
    }
}
