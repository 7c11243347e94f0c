use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Marker colour for places whose category is not in the catalog.
pub const FALLBACK_MARKER_COLOR: &str = "blue";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    #[serde(default = "default_marker_color")]
    pub marker_color: String,
}

fn default_marker_color() -> String {
    FALLBACK_MARKER_COLOR.to_string()
}

/// Ordered list of browsable categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    pub categories: Vec<Category>,
}

impl CategoryCatalog {
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Human label for `id`, or `id` itself when uncatalogued.
    #[must_use]
    pub fn label_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map_or(id, |c| c.label.as_str())
    }

    #[must_use]
    pub fn marker_color_for(&self, id: &str) -> &str {
        self.get(id)
            .map_or(FALLBACK_MARKER_COLOR, |c| c.marker_color.as_str())
    }
}

/// The built-in produce categories.
#[must_use]
pub fn default_categories() -> CategoryCatalog {
    let category = |id: &str, label: &str, marker_color: &str| Category {
        id: id.to_string(),
        label: label.to_string(),
        marker_color: marker_color.to_string(),
    };
    CategoryCatalog {
        categories: vec![
            category("vegetables", "Vegetables", "green"),
            category("fruits", "Fruits", "red"),
            category("grains", "Grains", "gold"),
        ],
    }
}

/// Load and validate a category catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoryCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_categories(&content)
}

/// Parse and validate a category catalog from YAML text.
///
/// # Errors
///
/// Returns [`ConfigError::CategoriesFileParse`] on malformed YAML and
/// [`ConfigError::Validation`] on blank or duplicate ids.
pub fn parse_categories(yaml: &str) -> Result<CategoryCatalog, ConfigError> {
    let catalog: CategoryCatalog = serde_yaml::from_str(yaml)?;
    validate_categories(&catalog)?;
    Ok(catalog)
}

fn validate_categories(catalog: &CategoryCatalog) -> Result<(), ConfigError> {
    if catalog.categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one category is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in &catalog.categories {
        if category.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category id must be non-empty".to_string(),
            ));
        }
        if category.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has an empty label",
                category.id
            )));
        }
        if !seen.insert(category.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category id: '{}'",
                category.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
