//! Shared handle to the single in-memory store.
//!
//! The [`Store`] itself is a plain struct; this handle owns it behind one
//! mutex so the workflow and the front end can share it across tasks. Every
//! operation takes the lock exactly once and never awaits while holding it,
//! which makes each operation atomic with respect to every other one.
//! Selectors hand out owned snapshots.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pawcart_core::{CartItem, CartItemId, Pet, PetId, Store};
use tracing::debug;

/// Cloneable handle to the process-wide store.
#[derive(Debug, Clone, Default)]
pub struct StoreHandle {
    inner: Arc<Mutex<Store>>,
}

impl StoreHandle {
    /// Create a handle around an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // Store operations cannot panic midway, so a poisoned lock still
        // guards a consistent store.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the store under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        f(&self.lock())
    }

    /// Run a compound mutation under a single lock acquisition.
    pub fn update<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        f(&mut self.lock())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn add_pet(&self, pet: Pet) {
        debug!(pet_id = %pet.id, "add_pet");
        self.lock().add_pet(pet);
    }

    pub fn remove_pet(&self, id: &PetId) -> bool {
        let removed = self.lock().remove_pet(id);
        debug!(pet_id = %id, removed, "remove_pet");
        removed
    }

    pub fn update_pet_image(&self, id: &PetId, image_url: impl Into<String>) -> bool {
        let updated = self.lock().update_pet_image(id, image_url);
        debug!(pet_id = %id, updated, "update_pet_image");
        updated
    }

    pub fn next_pet(&self) -> bool {
        self.lock().next_pet()
    }

    pub fn previous_pet(&self) -> bool {
        self.lock().previous_pet()
    }

    pub fn set_current_index(&self, index: i64) -> bool {
        let moved = self.lock().set_current_index(index);
        if !moved {
            debug!(index, "set_current_index ignored: out of range");
        }
        moved
    }

    pub fn add_to_cart(&self, item: CartItem) {
        debug!(cart_item_id = %item.id, "add_to_cart");
        self.lock().add_to_cart(item);
    }

    pub fn remove_from_cart(&self, id: &CartItemId) -> bool {
        let removed = self.lock().remove_from_cart(id);
        debug!(cart_item_id = %id, removed, "remove_from_cart");
        removed
    }

    pub fn clear_cart(&self) {
        debug!("clear_cart");
        self.lock().clear_cart();
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    #[must_use]
    pub fn pets(&self) -> Vec<Pet> {
        self.lock().pets().to_vec()
    }

    #[must_use]
    pub fn cart_items(&self) -> Vec<CartItem> {
        self.lock().cart_items().to_vec()
    }

    #[must_use]
    pub fn total_items(&self) -> usize {
        self.lock().total_items()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.lock().current_index()
    }

    /// The pet under the cursor; `None` when the pet list is empty.
    #[must_use]
    pub fn current_pet(&self) -> Option<Pet> {
        self.lock().current_pet().cloned()
    }

    /// A full copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Store {
        self.lock().clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn pet(id: &str) -> Pet {
        Pet {
            id: PetId::new(id),
            pet_name: format!("Pet {id}"),
            breed: "Mixed".to_string(),
            age: 1,
            price: "10".parse().unwrap(),
            image_url: String::new(),
            created_at: DateTime::from_timestamp_millis(0).unwrap(),
        }
    }

    #[test]
    fn test_clones_share_state() {
        let a = StoreHandle::new();
        let b = a.clone();

        a.add_pet(pet("1"));
        assert_eq!(b.pets().len(), 1);
        assert_eq!(b.current_pet().unwrap().id.as_str(), "1");
    }

    #[test]
    fn test_update_is_single_transition() {
        let store = StoreHandle::new();
        store.add_pet(pet("1"));
        store.add_pet(pet("2"));

        let removed = store.update(|s| {
            s.set_current_index(1);
            s.remove_pet(&PetId::new("2"))
        });

        assert!(removed);
        assert_eq!(store.current_index(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_cart_mutations_keep_total_in_sync() {
        let store = StoreHandle::new();
        let mut tasks = Vec::new();
        for n in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let item = CartItem {
                    id: CartItemId::new(n.to_string()),
                    image_url: String::new(),
                    added_at: DateTime::from_timestamp_millis(n).unwrap(),
                    pet_name: None,
                    breed: None,
                    age: None,
                    price: None,
                };
                store.add_to_cart(item);
                if n % 2 == 0 {
                    store.remove_from_cart(&CartItemId::new(n.to_string()));
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.total_items(), 8);
        assert_eq!(snapshot.total_items(), snapshot.cart_items().len());
    }
}
