//! Read-only views over the seeded store.

use mandi_core::{default_categories, load_categories, AppConfig, CategoryCatalog};
use mandi_store::{seeded_store, SeedConfig};

/// The catalog from `MANDI_CATEGORIES_PATH`, or the built-in one.
///
/// # Errors
///
/// Returns an error if the configured file cannot be read or is invalid.
pub(crate) fn load_catalog(config: &AppConfig) -> anyhow::Result<CategoryCatalog> {
    match &config.categories_path {
        Some(path) => Ok(load_categories(path)?),
        None => Ok(default_categories()),
    }
}

/// Print the seeded places, optionally filtered to one category.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or JSON encoding fails.
pub(crate) fn run_seed(
    config: &AppConfig,
    category: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    if let Some(id) = category {
        if !catalog.contains(id) {
            tracing::warn!(category = id, "category is not in the catalog");
        }
    }

    let store = seeded_store(&SeedConfig::from_config(config))?;
    let places = store.filter_by_category(category);

    if json {
        println!("{}", serde_json::to_string_pretty(&places)?);
        return Ok(());
    }

    if places.is_empty() {
        println!("no places found");
        return Ok(());
    }

    println!("{:<10}{:<14}{:<28}IN STOCK", "ID", "CATEGORY", "NAME");
    for place in &places {
        println!(
            "{:<10}{:<14}{:<28}{}",
            place.place_id,
            catalog.label_for(&place.category),
            place.short_name(),
            place.in_stock_names().join(", ")
        );
    }
    Ok(())
}

/// Print the effective category catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub(crate) fn run_categories(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    println!("{:<14}{:<16}MARKER", "ID", "LABEL");
    for category in &catalog.categories {
        println!(
            "{:<14}{:<16}{}",
            category.id, category.label, category.marker_color
        );
    }
    Ok(())
}
