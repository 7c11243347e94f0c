//! The ordered place collection and its read/write operations.

mod read;
mod write;

use mandi_core::Place;

/// Ordered, id-unique collection of places.
#[derive(Debug, Clone, Default)]
pub struct LocationStore {
    pub(crate) places: Vec<Place>,
}

impl LocationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
