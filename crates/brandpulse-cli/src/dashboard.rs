//! Dashboard command: fetch current mentions and print the aggregates.

use chrono::Utc;

use brandpulse_analytics::{compute_dashboard, Dashboard};
use brandpulse_core::{load_registry, AppConfig, Brand};
use brandpulse_ingest::{MentionFetcher, SpikeAlertEvent, SpikeKind};

/// Fetch one brand's current mentions and print its dashboard.
///
/// # Errors
///
/// Returns an error when the registry cannot be loaded or the brand key is
/// unknown.
pub(crate) async fn run_dashboard(
    config: &AppConfig,
    brand_key: &str,
    json: bool,
) -> anyhow::Result<()> {
    let brand = find_brand(config, brand_key)?;
    let fetcher = MentionFetcher::new(config)?;
    let mentions = fetcher.fetch_all_mentions(&brand).await;
    let dashboard = compute_dashboard(&brand, &mentions, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    print_dashboard(&dashboard);
    Ok(())
}

fn print_dashboard(dashboard: &Dashboard) {
    let stats = &dashboard.stats;
    println!("{:<16}{}", "BRAND", dashboard.brand.display_name);
    println!(
        "{:<16}{} total, {} positive, {} negative, {} neutral",
        "MENTIONS", stats.total, stats.positive, stats.negative, stats.neutral
    );
    println!(
        "{:<16}{}%",
        "POSITIVE SHARE", dashboard.summary.positive_percentage
    );
    println!("{:<16}{}", "TREND", dashboard.summary.trend_direction);

    if !dashboard.category_stats.is_empty() {
        let categories: Vec<String> = dashboard
            .category_stats
            .iter()
            .map(|c| format!("{} {}", c.category, c.count))
            .collect();
        println!("{:<16}{}", "CATEGORIES", categories.join(", "));
    }
    if !dashboard.summary.top_keywords.is_empty() {
        println!(
            "{:<16}{}",
            "TOP KEYWORDS",
            dashboard.summary.top_keywords.join(", ")
        );
    }

    for bucket in &dashboard.trend {
        println!(
            "  {}  {:>4} mentions  {:>3} positive  {:>3} negative",
            bucket.date, bucket.mentions, bucket.positive, bucket.negative
        );
    }

    if dashboard.summary.has_spike {
        let alert = SpikeAlertEvent::new(
            &dashboard.brand,
            SpikeKind::Mentions,
            dashboard.spikes.mentions.percentage,
        );
        println!("ALERT: {}", alert.message);
    }
    if dashboard.summary.has_negative_spike {
        let alert = SpikeAlertEvent::new(
            &dashboard.brand,
            SpikeKind::NegativeMentions,
            dashboard.spikes.negative.percentage,
        );
        println!("ALERT: {}", alert.message);
    }
}

fn find_brand(config: &AppConfig, key: &str) -> anyhow::Result<Brand> {
    let registry = load_registry(&config.brands_path)?;
    let wanted = key.trim().to_lowercase();

    registry
        .brands
        .iter()
        .find(|entry| entry.key() == wanted)
        .map(|entry| Brand::new(&entry.name))
        .transpose()?
        .ok_or_else(|| {
            anyhow::anyhow!("brand '{key}' not found in {}", config.brands_path.display())
        })
}
