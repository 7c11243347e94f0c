//! The "register outlet" form and the place it publishes.

use mandi_core::{Address, Coordinate, InventoryItem, Place, PlaceId, User};
use thiserror::Error;

/// Category tag used when the vendor leaves the category blank.
pub const DEFAULT_OUTLET_CATEGORY: &str = "greengrocer";
/// Class used when the vendor leaves the category blank.
pub const DEFAULT_OUTLET_CLASS: &str = "shop";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("outlet name is required")]
    MissingName,

    #[error("pick the outlet location on the map first")]
    MissingLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub category: String,
    pub description: String,
    pub contact: String,
    pub delivery: bool,
    draft_items: Vec<String>,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            description: String::new(),
            contact: String::new(),
            delivery: true,
            draft_items: Vec::new(),
        }
    }
}

impl RegistrationForm {
    /// Queue an item name; blank input is ignored. Returns whether it was added.
    pub fn add_draft_item(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.draft_items.push(name.to_string());
        true
    }

    pub fn remove_draft_item(&mut self, index: usize) -> Option<String> {
        (index < self.draft_items.len()).then(|| self.draft_items.remove(index))
    }

    #[must_use]
    pub fn draft_items(&self) -> &[String] {
        &self.draft_items
    }

    /// Publishing needs a non-blank name and a picked coordinate.
    #[must_use]
    pub fn is_publish_enabled(&self, pending: Option<Coordinate>) -> bool {
        self.check(pending).is_ok()
    }

    /// # Errors
    ///
    /// [`RegistrationError::MissingName`] for a blank name, then
    /// [`RegistrationError::MissingLocation`] when nothing was picked.
    pub fn check(&self, pending: Option<Coordinate>) -> Result<Coordinate, RegistrationError> {
        if self.name.trim().is_empty() {
            return Err(RegistrationError::MissingName);
        }
        pending
            .filter(Coordinate::is_finite)
            .ok_or(RegistrationError::MissingLocation)
    }

    /// The place this form describes, owned by `owner`.
    #[must_use]
    pub fn build_place(&self, place_id: PlaceId, position: Coordinate, owner: &User) -> Place {
        let name = self.name.trim().to_string();
        let category = self.category.trim();

        let mut place = Place {
            place_id,
            lat: position.lat_text(),
            lon: position.lon_text(),
            display_name: name.clone(),
            class: non_blank(category).unwrap_or(DEFAULT_OUTLET_CLASS).to_string(),
            category: non_blank(category)
                .unwrap_or(DEFAULT_OUTLET_CATEGORY)
                .to_string(),
            importance: 0.0,
            address: Some(Address {
                road: Some(name),
                city: Some("Local Vendor".to_string()),
                country: Some("India".to_string()),
                ..Address::default()
            }),
            items: Vec::new(),
            owner_id: Some(owner.id.clone()),
            contact: non_blank(&self.contact).map(str::to_string),
            delivery: Some(self.delivery),
            description: non_blank(&self.description).map(str::to_string),
        };
        place.set_inventory(
            self.draft_items
                .iter()
                .map(|name| InventoryItem::new(name, None))
                .collect(),
        );
        place
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use mandi_core::Role;

    use super::*;

    fn vendor() -> User {
        User {
            id: "v1".to_string(),
            name: "Ramu".to_string(),
            email: "ramu@mandi.in".to_string(),
            role: Role::Vendor,
        }
    }

    #[test]
    fn publish_needs_name_and_location() {
        let mut form = RegistrationForm::default();
        let here = Coordinate::new(12.0, 77.0);
        assert!(!form.is_publish_enabled(Some(here)));

        form.name = "Ramu Mart".to_string();
        assert!(!form.is_publish_enabled(None));
        assert_eq!(form.check(None), Err(RegistrationError::MissingLocation));
        assert!(form.is_publish_enabled(Some(here)));

        form.name = "   ".to_string();
        assert_eq!(form.check(Some(here)), Err(RegistrationError::MissingName));
    }

    #[test]
    fn draft_items_skip_blanks() {
        let mut form = RegistrationForm::default();
        assert!(form.add_draft_item(" Tomato "));
        assert!(!form.add_draft_item("   "));
        assert!(form.add_draft_item("Onion"));
        assert_eq!(form.draft_items(), ["Tomato", "Onion"]);
        assert_eq!(form.remove_draft_item(0).as_deref(), Some("Tomato"));
        assert_eq!(form.remove_draft_item(5), None);
        assert_eq!(form.draft_items(), ["Onion"]);
    }

    #[test]
    fn delivery_defaults_on() {
        assert!(RegistrationForm::default().delivery);
    }

    #[test]
    fn built_place_defaults_category_and_class() {
        let mut form = RegistrationForm {
            name: "Ramu Mart".to_string(),
            ..RegistrationForm::default()
        };
        form.add_draft_item("Tomato");
        let place = form.build_place(42, Coordinate::new(12.0, 77.0), &vendor());

        assert_eq!(place.place_id, 42);
        assert_eq!(place.category, DEFAULT_OUTLET_CATEGORY);
        assert_eq!(place.class, DEFAULT_OUTLET_CLASS);
        assert_eq!(place.lat, "12");
        assert_eq!(place.lon, "77");
        assert_eq!(place.owner_id.as_deref(), Some("v1"));
        assert_eq!(place.short_name(), "Ramu Mart");
        assert_eq!(place.delivery, Some(true));
        assert_eq!(place.contact, None);

        let items = place.inventory();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Tomato");
        assert!(items[0].in_stock);
        assert!(!items[0].id.starts_with("legacy-"));
    }

    #[test]
    fn built_place_uses_category_for_class() {
        let form = RegistrationForm {
            name: "Fresh Fruits".to_string(),
            category: "fruits".to_string(),
            contact: "+91 90000 11111".to_string(),
            delivery: false,
            ..RegistrationForm::default()
        };
        let place = form.build_place(7, Coordinate::new(23.1, 76.9), &vendor());
        assert_eq!(place.category, "fruits");
        assert_eq!(place.class, "fruits");
        assert_eq!(place.contact.as_deref(), Some("+91 90000 11111"));
        assert!(!place.delivery_available());
        let address = place.address.unwrap();
        assert_eq!(address.city.as_deref(), Some("Local Vendor"));
        assert_eq!(address.country.as_deref(), Some("India"));
    }
}
