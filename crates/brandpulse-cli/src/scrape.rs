//! Scrape command: fetch, enrich, and plan ingestion per brand.

use std::collections::HashSet;

use chrono::Utc;

use brandpulse_core::{load_registry, AppConfig, Brand};
use brandpulse_ingest::{plan_ingestion, IngestionPlan, MentionFetcher};

/// Fetch current mentions for one brand or every registry brand.
///
/// Brands run in isolation: one failing brand is logged and the batch keeps
/// going, with a nonzero exit at the end when anything failed.
///
/// # Errors
///
/// Returns an error when the registry cannot be loaded, the brand filter
/// matches nothing, or any brand in the batch failed.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    brand_filter: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let brands = resolve_brands(config, brand_filter)?;
    let fetcher = MentionFetcher::new(config)?;

    if !json {
        println!("{:<25}{:<8}{:<8}ALERT", "BRAND", "NEW", "TOTAL");
    }

    let mut failures = 0usize;
    for mut brand in brands {
        let fetched = fetcher.fetch_all_mentions(&brand).await;
        // No store is wired into the CLI, so every run is a first ingestion
        // with an empty known-key set.
        let plan = plan_ingestion(&brand, fetched, &HashSet::new(), Utc::now());
        plan.apply_to(&mut brand);

        if let Err(e) = report_brand(&brand, &plan, json) {
            failures += 1;
            tracing::error!(brand = %brand.name, error = %e, "scrape report failed");
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} brand(s) failed to scrape");
    }
    Ok(())
}

fn report_brand(brand: &Brand, plan: &IngestionPlan, json: bool) -> anyhow::Result<()> {
    tracing::info!(
        brand = %brand.name,
        new = plan.new_mentions.len(),
        total = plan.total_mentions,
        spike = plan.spike.is_spike,
        "scrape complete"
    );

    if json {
        if let Some(event) = &plan.new_mentions_event {
            println!("{}", serde_json::to_string(event)?);
        }
        if let Some(alert) = &plan.spike_alert {
            println!("{}", serde_json::to_string(alert)?);
        }
        return Ok(());
    }

    println!(
        "{:<25}{:<8}{:<8}{}",
        brand.display_name,
        plan.new_mentions.len(),
        plan.total_mentions,
        plan.spike_alert.as_ref().map_or("-", |a| a.message.as_str())
    );
    Ok(())
}

fn resolve_brands(config: &AppConfig, filter: Option<&str>) -> anyhow::Result<Vec<Brand>> {
    let registry = load_registry(&config.brands_path)?;
    let wanted = filter.map(str::to_lowercase);

    let mut brands = Vec::new();
    for entry in &registry.brands {
        let brand = Brand::new(&entry.name)?;
        if let Some(key) = &wanted {
            if &brand.name != key {
                continue;
            }
        }
        brands.push(brand);
    }

    if brands.is_empty() {
        match filter {
            Some(key) => anyhow::bail!(
                "brand '{key}' not found in {}",
                config.brands_path.display()
            ),
            None => anyhow::bail!("registry {} lists no brands", config.brands_path.display()),
        }
    }
    Ok(brands)
}
