//! Mock dataset generation for the in-memory store.
//!
//! Produces a landmark plus a ring of produce vendors scattered around the
//! map centre. Generated inventories use the legacy name-only
//! representation; [`seeded_store`] stores them in canonical form.

use mandi_core::{
    Address, AppConfig, Coordinate, Place, PlaceId, StoredItem, DEFAULT_CENTER, DEMO_VENDOR_ID,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::{LocationStore, StoreError};

/// Id of the landmark record that anchors the dataset.
pub const LANDMARK_PLACE_ID: PlaceId = 9_999_992;

const LANDMARK_NAME: &str =
    "VIT Bhopal University, Bhopal-Indore Highway, Kothri Kalan, Sehore, Madhya Pradesh";

/// First id handed to generated vendors.
const FIRST_VENDOR_ID: PlaceId = 1000;

const MIN_ITEMS: usize = 3;
const MAX_ITEMS: usize = 6;

/// Produce and vendor names per seeded category.
const PRODUCE: &[(&str, &[&str], &[&str])] = &[
    (
        "vegetables",
        &[
            "Tomatoes",
            "Potatoes",
            "Onions",
            "Spinach",
            "Cauliflower",
            "Lady Finger",
            "Brinjal",
            "Carrots",
            "Green Chilies",
            "Coriander",
        ],
        &[
            "Ramu Fresh Veggies",
            "Green Farm",
            "Daily Sabzi",
            "Kothri Vegetable Mart",
            "Highway Greens",
            "Fresh Pick",
            "Village Veggies",
            "Garden Direct",
            "Nature's Basket",
            "Farm Fresh",
        ],
    ),
    (
        "fruits",
        &[
            "Apples",
            "Bananas",
            "Mangoes",
            "Grapes",
            "Oranges",
            "Papaya",
            "Pomegranate",
            "Watermelon",
            "Guava",
            "Pineapple",
        ],
        &[
            "Juicy Fruits",
            "Apple Orchard",
            "Mango Mania",
            "Banana Republic",
            "Citrus Corner",
            "Berry Blast",
            "Melon Market",
            "The Fruit Stall",
            "Tropical Treats",
            "Fresh Fruits Cart",
        ],
    ),
    (
        "grains",
        &[
            "Basmati Rice",
            "Wheat Flour",
            "Toor Dal",
            "Moong Dal",
            "Chana",
            "Soybean",
            "Mustard Seeds",
            "Barley",
        ],
        &[
            "Annapurna Grains",
            "Wheat House",
            "Rice Bowl",
            "Dal Mill Outlet",
            "Cereal World",
            "Golden Grains",
            "Pantry Essentials",
            "Pulse Point",
            "Flour Power",
            "Staple Store",
        ],
    ),
];

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub center: Coordinate,
    /// Width of the square, in degrees, that vendors are scattered across.
    pub spread_degrees: f64,
    pub places_per_category: usize,
    /// Fixed seed for reproducible datasets; `None` draws from the OS.
    pub rng_seed: Option<u64>,
    /// Owner assigned to the first generated vendor, so a vendor session has
    /// an outlet to manage.
    pub first_vendor_owner: Option<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            spread_degrees: 0.02,
            places_per_category: 10,
            rng_seed: None,
            first_vendor_owner: None,
        }
    }
}

impl SeedConfig {
    /// Seed settings from `MANDI_SEED_*`. The first vendor goes to the demo
    /// vendor account.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            places_per_category: config.seed_places_per_category,
            rng_seed: config.seed_rng,
            first_vendor_owner: Some(DEMO_VENDOR_ID.to_string()),
            ..Self::default()
        }
    }
}

/// Generate the mock dataset: the landmark first, then vendors grouped by
/// category with ids counting up from 1000.
#[must_use]
pub fn generate_seed_places(config: &SeedConfig) -> Vec<Place> {
    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut places = Vec::with_capacity(1 + PRODUCE.len() * config.places_per_category);
    places.push(landmark(config.center));

    let mut next_id = FIRST_VENDOR_ID;
    for (category, produce, names) in PRODUCE {
        for index in 0..config.places_per_category {
            let name = names.get(index).copied().unwrap_or("Local Vendor");
            let mut place = vendor(&mut rng, config, next_id, category, produce, name);
            if next_id == FIRST_VENDOR_ID {
                place.owner_id.clone_from(&config.first_vendor_owner);
            }
            places.push(place);
            next_id += 1;
        }
    }

    tracing::debug!(count = places.len(), "generated seed places");
    places
}

/// A store holding [`generate_seed_places`].
///
/// # Errors
///
/// Returns [`StoreError::DuplicatePlaceId`] when so many vendors are
/// requested that their ids run into the landmark's.
pub fn seeded_store(config: &SeedConfig) -> Result<LocationStore, StoreError> {
    LocationStore::from_places(generate_seed_places(config))
}

fn landmark(center: Coordinate) -> Place {
    Place {
        place_id: LANDMARK_PLACE_ID,
        lat: center.lat_text(),
        lon: center.lon_text(),
        display_name: LANDMARK_NAME.to_string(),
        class: "education".to_string(),
        category: "university".to_string(),
        importance: 0.9,
        address: Some(Address {
            road: Some("Bhopal-Indore Highway".to_string()),
            city: Some("Sehore".to_string()),
            state: Some("Madhya Pradesh".to_string()),
            country: Some("India".to_string()),
            ..Address::default()
        }),
        ..Place::default()
    }
}

fn vendor(
    rng: &mut StdRng,
    config: &SeedConfig,
    place_id: PlaceId,
    category: &str,
    produce: &[&str],
    name: &str,
) -> Place {
    let lat = scatter(rng, config.center.lat, config.spread_degrees);
    let lon = scatter(rng, config.center.lon, config.spread_degrees);

    let mut stock = produce.to_vec();
    stock.shuffle(rng);
    let count = rng.random_range(MIN_ITEMS..=MAX_ITEMS).min(stock.len());
    let items = stock
        .into_iter()
        .take(count)
        .map(|item| StoredItem::Named(item.to_string()))
        .collect();

    let lane = rng.random_range(1..=10);

    Place {
        place_id,
        lat,
        lon,
        display_name: format!("{name}, Near Kothri Kalan, Sehore"),
        class: "shop".to_string(),
        category: category.to_string(),
        importance: 0.5,
        items,
        address: Some(Address {
            road: Some(format!("Lane {lane}")),
            suburb: Some("Kothri Kalan".to_string()),
            city: Some("Sehore".to_string()),
            state: Some("Madhya Pradesh".to_string()),
            country: Some("India".to_string()),
            ..Address::default()
        }),
        ..Place::default()
    }
}

/// `center` offset by up to half of `spread` either way, as five-decimal text.
fn scatter(rng: &mut StdRng, center: f64, spread: f64) -> String {
    let offset = (rng.random::<f64>() - 0.5) * spread;
    format!("{:.5}", center + offset)
}
