//! The pet list, the cart and the cursor over the pet list.
//!
//! [`Store`] is a plain owned struct: every operation is a synchronous
//! `&mut self` transition that either fully applies or leaves the state
//! untouched. Callers that share a store between tasks wrap it in a single
//! lock (see `pawcart_app::store::StoreHandle`).
//!
//! No operation fails. Mutations return `true` when state changed and
//! `false` for the documented no-op cases (unknown id, empty list, index out
//! of range), which lets callers log ignored requests.
//!
//! # Invariants
//!
//! - `0 <= current_index < pets.len()` whenever `pets` is non-empty, and
//!   `current_index == 0` when it is empty.
//! - `total_items()` is always `cart_items.len()`; it is computed, never
//!   stored.
//! - Pet ids are unique within `pets` and cart item ids within the cart, as
//!   long as callers use fresh ids from an `IdGenerator`.

use crate::types::{CartItem, CartItemId, Pet, PetId};

/// In-memory catalog and cart state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    pets: Vec<Pet>,
    cart_items: Vec<CartItem>,
    current_index: usize,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pets: Vec::new(),
            cart_items: Vec::new(),
            current_index: 0,
        }
    }

    // =========================================================================
    // Pets
    // =========================================================================

    /// Append a pet. The cursor does not move.
    pub fn add_pet(&mut self, pet: Pet) {
        self.pets.push(pet);
    }

    /// Remove the pet with `id`, clamping the cursor if the list shrank
    /// below it.
    pub fn remove_pet(&mut self, id: &PetId) -> bool {
        let before = self.pets.len();
        self.pets.retain(|pet| &pet.id != id);
        if self.pets.len() == before {
            return false;
        }

        if self.current_index >= self.pets.len() {
            self.current_index = self.pets.len().saturating_sub(1);
        }
        true
    }

    /// Replace the image URL of the pet with `id`.
    pub fn update_pet_image(&mut self, id: &PetId, image_url: impl Into<String>) -> bool {
        match self.pets.iter_mut().find(|pet| &pet.id == id) {
            Some(pet) => {
                pet.image_url = image_url.into();
                true
            }
            None => false,
        }
    }

    /// Advance the cursor, wrapping from the last pet to the first.
    pub fn next_pet(&mut self) -> bool {
        if self.pets.is_empty() {
            return false;
        }
        self.current_index = (self.current_index + 1) % self.pets.len();
        true
    }

    /// Move the cursor back, wrapping from the first pet to the last.
    pub fn previous_pet(&mut self) -> bool {
        if self.pets.is_empty() {
            return false;
        }
        self.current_index = if self.current_index == 0 {
            self.pets.len() - 1
        } else {
            self.current_index - 1
        };
        true
    }

    /// Point the cursor at `index`.
    ///
    /// Indices outside `[0, pets.len() - 1]`, including negative ones, are
    /// ignored.
    pub fn set_current_index(&mut self, index: i64) -> bool {
        match usize::try_from(index) {
            Ok(index) if index < self.pets.len() => {
                self.current_index = index;
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Append a cart item.
    pub fn add_to_cart(&mut self, item: CartItem) {
        self.cart_items.push(item);
    }

    /// Remove the cart item with `id`.
    pub fn remove_from_cart(&mut self, id: &CartItemId) -> bool {
        let before = self.cart_items.len();
        self.cart_items.retain(|item| &item.id != id);
        self.cart_items.len() != before
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart_items.clear();
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    /// All pets in insertion order.
    #[must_use]
    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// All cart items in insertion order.
    #[must_use]
    pub fn cart_items(&self) -> &[CartItem] {
        &self.cart_items
    }

    /// Number of items in the cart.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.cart_items.len()
    }

    /// Position of the cursor in the pet list.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    /// The pet under the cursor, or `None` when there are no pets.
    #[must_use]
    pub fn current_pet(&self) -> Option<&Pet> {
        self.pets.get(self.current_index)
    }

    /// Look up a pet by id.
    #[must_use]
    pub fn pet(&self, id: &PetId) -> Option<&Pet> {
        self.pets.iter().find(|pet| &pet.id == id)
    }
}
