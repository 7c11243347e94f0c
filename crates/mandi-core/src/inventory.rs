//! Inventory items and the normalization boundary for stored inventories.
//!
//! Older place records list stock as bare names. Everything past
//! [`normalize_inventory`] sees only [`InventoryItem`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an item, unique within its owning place only.
pub type ItemId = String;

/// One stocked good belonging to a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub in_stock: bool,
    /// Free-text price such as `"₹20/kg"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl InventoryItem {
    /// A new in-stock item with a freshly generated identifier.
    ///
    /// The name is trimmed; a blank price is treated as no price.
    #[must_use]
    pub fn new(name: &str, price: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            in_stock: true,
            price: clean_price(price),
        }
    }
}

/// Trim a user-entered price, mapping blank input to `None`.
#[must_use]
pub fn clean_price(price: Option<&str>) -> Option<String> {
    price
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

/// An inventory entry as it appears in a stored place record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredItem {
    /// Legacy form: just the product name, implicitly in stock.
    Named(String),
    Structured(InventoryItem),
}

impl StoredItem {
    fn normalize(&self, index: usize) -> InventoryItem {
        match self {
            StoredItem::Named(name) => InventoryItem {
                id: legacy_item_id(index),
                name: name.clone(),
                in_stock: true,
                price: None,
            },
            StoredItem::Structured(item) => item.clone(),
        }
    }
}

impl From<InventoryItem> for StoredItem {
    fn from(item: InventoryItem) -> Self {
        StoredItem::Structured(item)
    }
}

/// Identifier assigned to the legacy entry at `index`.
///
/// Deterministic so that repeated normalization of the same record yields the
/// same ids.
#[must_use]
pub fn legacy_item_id(index: usize) -> ItemId {
    format!("legacy-{index}")
}

/// Convert any stored inventory into the canonical item shape, preserving order.
#[must_use]
pub fn normalize_inventory(items: &[StoredItem]) -> Vec<InventoryItem> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| item.normalize(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_names_normalize_to_in_stock_items() {
        let stored = vec![
            StoredItem::Named("Tomatoes".to_string()),
            StoredItem::Named("Onions".to_string()),
        ];
        let items = normalize_inventory(&stored);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "legacy-0");
        assert_eq!(items[0].name, "Tomatoes");
        assert!(items[0].in_stock);
        assert_eq!(items[0].price, None);
        assert_eq!(items[1].id, "legacy-1");
    }

    #[test]
    fn structured_items_pass_through_unchanged() {
        let item = InventoryItem {
            id: "abc".to_string(),
            name: "Onion".to_string(),
            in_stock: false,
            price: Some("₹30/kg".to_string()),
        };
        let items = normalize_inventory(&[StoredItem::from(item.clone())]);
        assert_eq!(items, vec![item]);
    }

    #[test]
    fn normalization_is_stable_across_calls() {
        let stored = vec![StoredItem::Named("Rice".to_string())];
        assert_eq!(normalize_inventory(&stored), normalize_inventory(&stored));
    }

    #[test]
    fn deserializes_mixed_representations() {
        let json = r#"["Spinach", {"id": "i-1", "name": "Carrots", "inStock": false, "price": "₹40/kg"}]"#;
        let stored: Vec<StoredItem> = serde_json::from_str(json).unwrap();
        let items = normalize_inventory(&stored);
        assert_eq!(items[0].name, "Spinach");
        assert!(items[0].in_stock);
        assert_eq!(items[1].id, "i-1");
        assert!(!items[1].in_stock);
        assert_eq!(items[1].price.as_deref(), Some("₹40/kg"));
    }

    #[test]
    fn new_item_trims_and_drops_blank_price() {
        let item = InventoryItem::new("  Onion ", Some("   "));
        assert_eq!(item.name, "Onion");
        assert!(item.in_stock);
        assert_eq!(item.price, None);
        assert!(!item.id.is_empty());
    }

    #[test]
    fn new_items_get_distinct_ids() {
        let a = InventoryItem::new("Onion", None);
        let b = InventoryItem::new("Onion", None);
        assert_ne!(a.id, b.id);
    }
}
