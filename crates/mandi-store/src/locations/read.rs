use mandi_core::{Place, PlaceId, User};

use super::LocationStore;

impl LocationStore {
    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    #[must_use]
    pub fn contains(&self, place_id: PlaceId) -> bool {
        self.get(place_id).is_some()
    }

    #[must_use]
    pub fn get(&self, place_id: PlaceId) -> Option<&Place> {
        self.places.iter().find(|p| p.place_id == place_id)
    }

    /// All places in insertion order.
    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }

    /// Places whose category equals `category` exactly, in store order.
    ///
    /// `None` means no filter: every place is returned.
    #[must_use]
    pub fn filter_by_category(&self, category: Option<&str>) -> Vec<&Place> {
        match category {
            None => self.places.iter().collect(),
            Some(category) => self
                .places
                .iter()
                .filter(|p| p.category == category)
                .collect(),
        }
    }

    /// Places `user` is allowed to manage, in store order.
    #[must_use]
    pub fn owned_by(&self, user: &User) -> Vec<&Place> {
        self.places
            .iter()
            .filter(|p| p.is_editable_by(user))
            .collect()
    }

    pub(crate) fn max_place_id(&self) -> Option<PlaceId> {
        self.places.iter().map(|p| p.place_id).max()
    }
}

impl<'a> IntoIterator for &'a LocationStore {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.iter()
    }
}
