//! Shared domain model for brandpulse.
//!
//! Defines the `Mention` and `Brand` types used by ingestion and analytics,
//! the closed source/sentiment/category enums, environment configuration,
//! and the YAML registry of tracked brands.

pub mod app_config;
pub mod brands;
pub mod config;
pub mod mentions;

mod error;

pub use app_config::AppConfig;
pub use brands::{load_registry, Brand, BrandRegistry, RegistryEntry};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use mentions::{Category, Mention, MentionSource, RawMention, Sentiment, UNKNOWN_AUTHOR};
