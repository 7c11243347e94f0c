//! In-memory location store for the vendor map.
//!
//! The store is an ordered collection of [`Place`](mandi_core::Place) records.
//! It only grows by append and changes by whole-record replace keyed on the
//! place id; nothing is ever removed.

pub mod locations;
pub mod seed;

pub use locations::LocationStore;
pub use seed::{generate_seed_places, seeded_store, SeedConfig};

use mandi_core::PlaceId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("place {0} already exists")]
    DuplicatePlaceId(PlaceId),
    #[error("place {0} not found")]
    NotFound(PlaceId),
}
