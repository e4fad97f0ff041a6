//! Brand registry commands.

use brandpulse_core::{load_registry, AppConfig};

/// Print every registry entry.
///
/// # Errors
///
/// Returns an error when the registry cannot be loaded.
pub(crate) fn run_list(config: &AppConfig) -> anyhow::Result<()> {
    let registry = load_registry(&config.brands_path)?;

    println!("{:<25}NOTES", "BRAND");
    for entry in &registry.brands {
        println!(
            "{:<25}{}",
            entry.key(),
            entry.notes.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

/// Load the registry and report that it passed validation.
///
/// # Errors
///
/// Returns an error when the file is unreadable, malformed, or contains
/// empty or duplicate brand keys.
pub(crate) fn run_validate(config: &AppConfig) -> anyhow::Result<()> {
    let registry = load_registry(&config.brands_path)?;

    println!(
        "{} brand(s) OK in {}",
        registry.brands.len(),
        config.brands_path.display()
    );
    Ok(())
}
