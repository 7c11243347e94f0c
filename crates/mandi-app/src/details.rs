use mandi_core::{CategoryCatalog, InventoryItem, Place, PlaceId};

/// Everything the details panel shows for one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceDetails {
    pub place_id: PlaceId,
    pub name: String,
    pub category_label: String,
    pub locality: String,
    pub contact: String,
    pub rating: String,
    pub delivery: bool,
    pub description: Option<String>,
    pub items: Vec<InventoryItem>,
}

impl PlaceDetails {
    #[must_use]
    pub fn new(place: &Place, catalog: &CategoryCatalog, default_locality: &str) -> Self {
        Self {
            place_id: place.place_id,
            name: place.short_name().to_string(),
            category_label: catalog.label_for(&place.category).to_string(),
            locality: place.locality(default_locality).to_string(),
            contact: place.contact_display(),
            rating: place.rating(),
            delivery: place.delivery_available(),
            description: place.description.clone(),
            items: place.inventory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use mandi_core::{default_categories, Address, StoredItem};

    use super::*;

    #[test]
    fn legacy_seed_record_gets_defaults() {
        let place = Place {
            place_id: 1_234_567,
            display_name: "Sharma Sabzi, Near Kothri Kalan, Sehore".to_string(),
            category: "vegetables".to_string(),
            items: vec![StoredItem::Named("Tomato".to_string())],
            ..Place::default()
        };
        let details = PlaceDetails::new(&place, &default_categories(), "Sehore");

        assert_eq!(details.name, "Sharma Sabzi");
        assert_eq!(details.category_label, "Vegetables");
        assert_eq!(details.locality, "Sehore");
        assert_eq!(details.contact, "+91 98765 34567");
        assert_eq!(details.rating, "4.7");
        assert!(details.delivery);
        assert_eq!(details.items[0].id, "legacy-0");
    }

    #[test]
    fn explicit_fields_win() {
        let place = Place {
            place_id: 3,
            category: "spices".to_string(),
            address: Some(Address {
                road: Some("Ramu Mart".to_string()),
                suburb: Some("Kothri Kalan".to_string()),
                ..Address::default()
            }),
            contact: Some("+91 90000 11111".to_string()),
            delivery: Some(false),
            description: Some("Fresh every morning".to_string()),
            ..Place::default()
        };
        let details = PlaceDetails::new(&place, &default_categories(), "Sehore");

        assert_eq!(details.name, "Ramu Mart");
        assert_eq!(details.category_label, "spices");
        assert_eq!(details.locality, "Kothri Kalan");
        assert_eq!(details.contact, "+91 90000 11111");
        assert!(!details.delivery);
        assert_eq!(details.description.as_deref(), Some("Fresh every morning"));
    }
}
