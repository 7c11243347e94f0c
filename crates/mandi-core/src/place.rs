//! The place record: a vendor outlet or generic point of interest.
//!
//! Field names follow the search service's JSON so that search results and
//! stored outlets share one type.

use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::Coordinate;
use crate::inventory::{normalize_inventory, InventoryItem, StoredItem};
use crate::user::User;

pub type PlaceId = i64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub place_id: PlaceId,
    /// Latitude as text; see [`Place::position`].
    #[serde(default, deserialize_with = "text_or_number")]
    pub lat: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
    /// Broad classification from the search service, e.g. `"shop"`.
    #[serde(default)]
    pub class: String,
    /// Category tag used for filtering and marker icons.
    #[serde(rename = "type", default)]
    pub category: String,
    #[serde(default)]
    pub importance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default)]
    pub items: Vec<StoredItem>,
    #[serde(rename = "ownerId", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Place {
    /// Parsed position, or `None` when either coordinate is missing or invalid.
    #[must_use]
    pub fn position(&self) -> Option<Coordinate> {
        Coordinate::parse_pair(&self.lat, &self.lon)
    }

    /// The inventory in canonical form.
    #[must_use]
    pub fn inventory(&self) -> Vec<InventoryItem> {
        normalize_inventory(&self.items)
    }

    /// Replace the inventory, storing it in canonical form.
    pub fn set_inventory(&mut self, items: Vec<InventoryItem>) {
        self.items = items.into_iter().map(StoredItem::from).collect();
    }

    /// Rewrite legacy inventory entries in canonical form. Item ids and
    /// stock flags come out exactly as [`Place::inventory`] reports them.
    pub fn canonicalize_inventory(&mut self) {
        let items = self.inventory();
        self.set_inventory(items);
    }

    /// Names of the items currently in stock, in inventory order.
    #[must_use]
    pub fn in_stock_names(&self) -> Vec<String> {
        self.inventory()
            .into_iter()
            .filter(|item| item.in_stock)
            .map(|item| item.name)
            .collect()
    }

    /// Headline name: the road fragment when present, else the first segment
    /// of the display name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.address
            .as_ref()
            .and_then(|a| a.road.as_deref())
            .unwrap_or_else(|| {
                self.display_name
                    .split(',')
                    .next()
                    .unwrap_or_default()
                    .trim()
            })
    }

    /// Suburb, else city, else `fallback`.
    #[must_use]
    pub fn locality<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.address
            .as_ref()
            .and_then(|a| a.suburb.as_deref().or(a.city.as_deref()))
            .unwrap_or(fallback)
    }

    /// Delivery availability; records without the flag are treated as delivering.
    #[must_use]
    pub fn delivery_available(&self) -> bool {
        self.delivery.unwrap_or(true)
    }

    /// Contact number to show, synthesizing one from the id when absent.
    #[must_use]
    pub fn contact_display(&self) -> String {
        if let Some(contact) = self.contact.as_deref().filter(|c| !c.trim().is_empty()) {
            return contact.to_string();
        }
        let digits = self.place_id.unsigned_abs().to_string();
        let tail = &digits[digits.len().saturating_sub(5)..];
        format!("+91 98765 {tail}")
    }

    /// Display rating between 4.0 and 4.9, derived from the id.
    #[must_use]
    pub fn rating(&self) -> String {
        let tenths = self.place_id.rem_euclid(10);
        format!("4.{tenths}")
    }

    /// Whether `user` may manage this place: they own it and are a vendor.
    #[must_use]
    pub fn is_editable_by(&self, user: &User) -> bool {
        user.is_vendor() && self.owner_id.as_deref() == Some(user.id.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(f64),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        Some(TextOrNumber::Text(text)) => text,
        Some(TextOrNumber::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
#[path = "place_test.rs"]
mod tests;
