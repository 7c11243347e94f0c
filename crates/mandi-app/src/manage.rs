//! Owner dashboard: stock and delivery edits on one managed outlet.
//!
//! Every operation starts from the store's current copy of the outlet, applies
//! the change to a clone, writes it back by id, and only then updates the
//! local copy. A failed operation leaves both untouched.

use mandi_core::inventory::clean_price;
use mandi_core::{InventoryItem, ItemId, Place, PlaceId, User};
use mandi_store::{LocationStore, StoreError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManageError {
    #[error("place {0} is not managed by the current user")]
    NotOwner(PlaceId),

    #[error("item {0} not found")]
    ItemNotFound(ItemId),

    #[error("item name is required")]
    EmptyItemName,

    #[error("no item is being edited")]
    NotEditing,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The in-progress edit of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub item_id: ItemId,
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManagementSession {
    session_id: u64,
    place: Place,
    editing: Option<EditDraft>,
}

impl ManagementSession {
    /// Start managing `place` on behalf of `user`.
    ///
    /// # Errors
    ///
    /// [`ManageError::NotOwner`] unless `user` is the vendor who owns `place`.
    pub fn open(session_id: u64, place: &Place, user: &User) -> Result<Self, ManageError> {
        if !place.is_editable_by(user) {
            return Err(ManageError::NotOwner(place.place_id));
        }
        tracing::debug!(session_id, place_id = place.place_id, "management session opened");
        Ok(Self {
            session_id,
            place: place.clone(),
            editing: None,
        })
    }

    #[must_use]
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// The managed outlet as last written to the store.
    #[must_use]
    pub fn place(&self) -> &Place {
        &self.place
    }

    #[must_use]
    pub fn items(&self) -> Vec<InventoryItem> {
        self.place.inventory()
    }

    #[must_use]
    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut EditDraft> {
        self.editing.as_mut()
    }

    /// Flip an item's stock flag. Returns the new flag.
    ///
    /// # Errors
    ///
    /// [`ManageError::ItemNotFound`], or a store error if the outlet vanished.
    pub fn toggle_stock(
        &mut self,
        store: &mut LocationStore,
        item_id: &str,
    ) -> Result<bool, ManageError> {
        self.apply(store, |items, _| {
            let item = find_item(items, item_id)?;
            item.in_stock = !item.in_stock;
            Ok(item.in_stock)
        })
    }

    /// Add an in-stock item with a fresh id.
    ///
    /// # Errors
    ///
    /// [`ManageError::EmptyItemName`] for a blank name.
    pub fn add_item(
        &mut self,
        store: &mut LocationStore,
        name: &str,
        price: Option<&str>,
    ) -> Result<ItemId, ManageError> {
        if name.trim().is_empty() {
            return Err(ManageError::EmptyItemName);
        }
        self.apply(store, |items, _| {
            let item = InventoryItem::new(name, price);
            let id = item.id.clone();
            items.push(item);
            Ok(id)
        })
    }

    /// Open the edit form for an item, prefilled with its current values.
    ///
    /// # Errors
    ///
    /// [`ManageError::ItemNotFound`].
    pub fn begin_edit(&mut self, item_id: &str) -> Result<&EditDraft, ManageError> {
        let item = self
            .items()
            .into_iter()
            .find(|item| item.id == item_id)
            .ok_or_else(|| ManageError::ItemNotFound(item_id.to_string()))?;
        Ok(self.editing.insert(EditDraft {
            item_id: item.id,
            name: item.name,
            price: item.price.unwrap_or_default(),
        }))
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Rename and reprice an item in place. The id and stock flag are kept.
    ///
    /// # Errors
    ///
    /// [`ManageError::EmptyItemName`] or [`ManageError::ItemNotFound`].
    pub fn edit_item(
        &mut self,
        store: &mut LocationStore,
        item_id: &str,
        name: &str,
        price: Option<&str>,
    ) -> Result<(), ManageError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ManageError::EmptyItemName);
        }
        self.apply(store, |items, _| {
            let item = find_item(items, item_id)?;
            item.name = name.to_string();
            item.price = clean_price(price);
            Ok(())
        })?;
        if self.editing.as_ref().is_some_and(|d| d.item_id == item_id) {
            self.editing = None;
        }
        Ok(())
    }

    /// Commit the open edit form.
    ///
    /// # Errors
    ///
    /// [`ManageError::NotEditing`], or anything [`ManagementSession::edit_item`] returns.
    pub fn save_edit(&mut self, store: &mut LocationStore) -> Result<(), ManageError> {
        let draft = self.editing.clone().ok_or(ManageError::NotEditing)?;
        self.edit_item(store, &draft.item_id, &draft.name, Some(&draft.price))
    }

    /// Remove an item. An open edit of that item is discarded.
    ///
    /// # Errors
    ///
    /// [`ManageError::ItemNotFound`].
    pub fn delete_item(
        &mut self,
        store: &mut LocationStore,
        item_id: &str,
    ) -> Result<InventoryItem, ManageError> {
        let removed = self.apply(store, |items, _| {
            let index = items
                .iter()
                .position(|item| item.id == item_id)
                .ok_or_else(|| ManageError::ItemNotFound(item_id.to_string()))?;
            Ok(items.remove(index))
        })?;
        if self.editing.as_ref().is_some_and(|d| d.item_id == item_id) {
            self.editing = None;
        }
        Ok(removed)
    }

    /// Flip home delivery. Returns the new flag.
    ///
    /// # Errors
    ///
    /// A store error if the outlet vanished.
    pub fn toggle_delivery(&mut self, store: &mut LocationStore) -> Result<bool, ManageError> {
        self.apply(store, |_, place| {
            let delivery = !place.delivery_available();
            place.delivery = Some(delivery);
            Ok(delivery)
        })
    }

    fn apply<T>(
        &mut self,
        store: &mut LocationStore,
        change: impl FnOnce(&mut Vec<InventoryItem>, &mut Place) -> Result<T, ManageError>,
    ) -> Result<T, ManageError> {
        let place_id = self.place.place_id;
        let mut updated = store
            .get(place_id)
            .cloned()
            .ok_or(StoreError::NotFound(place_id))?;
        let mut items = updated.inventory();

        let outcome = change(&mut items, &mut updated)?;
        updated.set_inventory(items);

        store.replace(updated.clone())?;
        self.place = updated;
        Ok(outcome)
    }
}

fn find_item<'a>(
    items: &'a mut [InventoryItem],
    item_id: &str,
) -> Result<&'a mut InventoryItem, ManageError> {
    items
        .iter_mut()
        .find(|item| item.id == item_id)
        .ok_or_else(|| ManageError::ItemNotFound(item_id.to_string()))
}

#[cfg(test)]
#[path = "manage_test.rs"]
mod tests;
