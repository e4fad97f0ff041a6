use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ConfigError;

/// A tracked brand and its ingestion counters.
///
/// The `name` key is the lowercase form of the display name and is what
/// mentions are stamped with. Counters are updated only by the ingestion
/// step, never by dashboard reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: Uuid,
    /// Lowercase unique key.
    pub name: String,
    pub display_name: String,
    /// Lifetime mention count; non-decreasing except on reset.
    pub total_mentions: u64,
    pub last_scraped: Option<DateTime<Utc>>,
    /// Soft-delete marker; inactive brands are skipped by batch runs.
    pub is_active: bool,
}

impl Brand {
    /// Create a brand from its display name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when the name is empty after
    /// trimming.
    pub fn new(display_name: &str) -> Result<Self, ConfigError> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: display_name.to_lowercase(),
            display_name: display_name.to_string(),
            total_mentions: 0,
            last_scraped: None,
            is_active: true,
        })
    }

    /// Mark the brand deleted without discarding its history.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

/// One entry in the tracked-brands registry file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub name: String,
    pub notes: Option<String>,
}

impl RegistryEntry {
    /// Lowercase key this entry resolves to.
    #[must_use]
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

#[derive(Debug, Deserialize)]
pub struct BrandRegistry {
    pub brands: Vec<RegistryEntry>,
}

/// Load and validate the tracked-brands registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_registry(path: &Path) -> Result<BrandRegistry, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegistryIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let registry: BrandRegistry = serde_yaml::from_str(&content)?;

    validate_registry(&registry)?;

    Ok(registry)
}

fn validate_registry(registry: &BrandRegistry) -> Result<(), ConfigError> {
    let mut seen_keys = HashSet::new();

    for entry in &registry.brands {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }

        let key = entry.key();
        if !seen_keys.insert(key.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand key: '{key}' (from brand '{}')",
                entry.name
            )));
        }
    }

    Ok(())
}
