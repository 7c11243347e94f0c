use chrono::Utc;
use mandi_core::{Place, PlaceId};

use super::LocationStore;
use crate::StoreError;

impl LocationStore {
    /// Build a store from `places`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicatePlaceId`] if two places share an id.
    pub fn from_places(places: Vec<Place>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for place in places {
            store.append(place)?;
        }
        Ok(store)
    }

    /// Append a new place at the end of the collection. Legacy inventory
    /// entries are stored in canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicatePlaceId`] if the id is already taken;
    /// the store is left unchanged.
    pub fn append(&mut self, mut place: Place) -> Result<PlaceId, StoreError> {
        let place_id = place.place_id;
        if self.contains(place_id) {
            return Err(StoreError::DuplicatePlaceId(place_id));
        }
        place.canonicalize_inventory();
        self.places.push(place);
        tracing::debug!(place_id, total = self.places.len(), "place appended");
        Ok(place_id)
    }

    /// Replace the stored place that has the same id as `place`, in position.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no stored place has that id.
    pub fn replace(&mut self, mut place: Place) -> Result<(), StoreError> {
        let place_id = place.place_id;
        let slot = self
            .places
            .iter_mut()
            .find(|p| p.place_id == place_id)
            .ok_or(StoreError::NotFound(place_id))?;
        place.canonicalize_inventory();
        *slot = place;
        tracing::debug!(place_id, "place replaced");
        Ok(())
    }

    /// A place id not used by any stored place.
    ///
    /// Based on the current time in milliseconds, bumped past the largest
    /// existing id so ids handed out in the same millisecond stay distinct.
    #[must_use]
    pub fn next_place_id(&self) -> PlaceId {
        let now = Utc::now().timestamp_millis();
        match self.max_place_id() {
            Some(max) if max >= now => max + 1,
            _ => now,
        }
    }
}
