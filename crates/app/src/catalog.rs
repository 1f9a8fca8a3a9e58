//! Browser and cart logic shared by every front end.
//!
//! [`Catalog`] turns store state into what the pet browser and the cart
//! show, and performs the compound actions those screens offer.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use pawcart_core::{CartItem, CartItemId, IdGenerator, Pet};
use tracing::info;

use crate::navigation::{Alert, AlertAction, Destination};
use crate::store::StoreHandle;

/// Shown in place of a missing cart item name.
pub const DEFAULT_ITEM_NAME: &str = "Cute Pet";

/// Shown in place of a missing cart item breed.
pub const DEFAULT_ITEM_BREED: &str = "Mixed Breed";

/// Notice shown when the user asks to check out.
pub const CHECKOUT_NOTICE: &str = "Checkout feature coming soon!";

/// What a screen shows instead of its list when there is nothing to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub message: &'static str,
    pub action: AlertAction,
}

/// Empty pet browser.
pub const NO_PETS: EmptyState = EmptyState {
    title: "No Pets Found",
    message: "Add your first pet to get started!",
    action: AlertAction::AddPet,
};

/// Empty cart.
pub const EMPTY_CART: EmptyState = EmptyState {
    title: "Your cart is empty",
    message: "Add some pets to get started!",
    action: AlertAction::BrowsePets,
};

impl EmptyState {
    /// Where the single action leads.
    #[must_use]
    pub const fn destination(&self) -> Option<Destination> {
        self.action.destination()
    }
}

/// Result of deleting the pet under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionSummary {
    pub pet: Pet,
    /// Cart items removed because they were taken from this pet.
    pub removed_items: usize,
}

impl DeletionSummary {
    #[must_use]
    pub fn message(&self) -> String {
        if self.removed_items == 0 {
            format!("{} has been removed.", self.pet.pet_name)
        } else {
            format!(
                "{} has been removed and {} item(s) from cart.",
                self.pet.pet_name, self.removed_items
            )
        }
    }

    #[must_use]
    pub fn alert(&self) -> Alert {
        Alert::new("Deleted", self.message(), [AlertAction::Ok])
    }
}

/// One cart row, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub id: CartItemId,
    pub name: String,
    pub breed: String,
    /// `None` when the item carries no price.
    pub price: Option<String>,
    pub image_url: String,
    /// Local date and time the item was added.
    pub added: String,
}

impl CartLine {
    fn from_item(item: &CartItem) -> Self {
        Self {
            id: item.id.clone(),
            name: non_empty_or(item.pet_name.as_deref(), DEFAULT_ITEM_NAME),
            breed: non_empty_or(item.breed.as_deref(), DEFAULT_ITEM_BREED),
            price: item.price.map(|p| p.display()),
            image_url: item.image_url.clone(),
            added: format_local(item.added_at),
        }
    }
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn format_local(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%Y-%m-%d at %H:%M:%S")
        .to_string()
}

/// The cart screen at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total_items: usize,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `"1 item"` or `"<n> items"`.
    #[must_use]
    pub fn subtitle(&self) -> String {
        if self.total_items == 1 {
            "1 item".to_string()
        } else {
            format!("{} items", self.total_items)
        }
    }

    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.lines.is_empty() {
            Some(EMPTY_CART)
        } else {
            None
        }
    }

    #[must_use]
    pub fn checkout_label(&self) -> String {
        format!("Checkout ({})", self.total_items)
    }
}

/// Screen logic over a shared store.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: StoreHandle,
    ids: Arc<IdGenerator>,
}

impl Catalog {
    #[must_use]
    pub const fn new(store: StoreHandle, ids: Arc<IdGenerator>) -> Self {
        Self { store, ids }
    }

    #[must_use]
    pub const fn store(&self) -> &StoreHandle {
        &self.store
    }

    // =========================================================================
    // Pet browser
    // =========================================================================

    /// The empty-state prompt, when there are no pets.
    #[must_use]
    pub fn landing(&self) -> Option<EmptyState> {
        self.store
            .read(|s| s.pets().is_empty())
            .then_some(NO_PETS)
    }

    /// `"Pet 2 of 5"`; `None` when there are no pets.
    #[must_use]
    pub fn counter_label(&self) -> Option<String> {
        self.store.read(|s| {
            (!s.pets().is_empty())
                .then(|| format!("Pet {} of {}", s.current_index() + 1, s.pets().len()))
        })
    }

    /// Previous/next only make sense with more than one pet.
    #[must_use]
    pub fn can_navigate(&self) -> bool {
        self.store.read(|s| s.pets().len() > 1)
    }

    #[must_use]
    pub fn current_pet(&self) -> Option<Pet> {
        self.store.current_pet()
    }

    pub fn next(&self) -> bool {
        self.store.next_pet()
    }

    pub fn previous(&self) -> bool {
        self.store.previous_pet()
    }

    /// Put a snapshot of the current pet in the cart.
    ///
    /// Returns the new item, or `None` when there is no current pet.
    pub fn add_current_to_cart(&self) -> Option<CartItem> {
        let item = self.store.update(|s| {
            let pet = s.current_pet()?;
            let item = CartItem::from_pet(self.ids.cart_item_id(), pet, Utc::now());
            s.add_to_cart(item.clone());
            Some(item)
        })?;

        info!(cart_item_id = %item.id, "Added current pet to cart");
        Some(item)
    }

    /// Acknowledgement for [`Self::add_current_to_cart`].
    #[must_use]
    pub fn added_to_cart_alert(item: &CartItem) -> Alert {
        Alert::new(
            "Success! 🎉",
            format!(
                "{} added to cart!",
                item.pet_name.as_deref().unwrap_or(DEFAULT_ITEM_NAME)
            ),
            [AlertAction::ContinueShopping, AlertAction::ViewCart],
        )
    }

    /// Delete the current pet and every cart item taken from a pet with the
    /// same name, in one store transition.
    pub fn delete_current_pet(&self) -> Option<DeletionSummary> {
        let summary = self.store.update(|s| {
            let pet = s.current_pet()?.clone();
            let related: Vec<CartItemId> = s
                .cart_items()
                .iter()
                .filter(|item| item.is_snapshot_of(&pet.pet_name))
                .map(|item| item.id.clone())
                .collect();

            for id in &related {
                s.remove_from_cart(id);
            }
            s.remove_pet(&pet.id);

            Some(DeletionSummary {
                pet,
                removed_items: related.len(),
            })
        })?;

        info!(
            pet_id = %summary.pet.id,
            removed_items = summary.removed_items,
            "Deleted pet"
        );
        Some(summary)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    #[must_use]
    pub fn cart(&self) -> CartView {
        self.store.read(|s| CartView {
            lines: s.cart_items().iter().map(CartLine::from_item).collect(),
            total_items: s.total_items(),
        })
    }

    pub fn remove_item(&self, id: &CartItemId) -> bool {
        self.store.remove_from_cart(id)
    }

    pub fn clear(&self) {
        self.store.clear_cart();
    }

    #[must_use]
    pub fn checkout_alert() -> Alert {
        Alert::new("Checkout", CHECKOUT_NOTICE, [AlertAction::Ok])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pet(id: &str, name: &str) -> Pet {
        Pet {
            id: pawcart_core::PetId::new(id),
            pet_name: name.to_string(),
            breed: "Beagle".to_string(),
            age: 3,
            price: "500".parse().unwrap(),
            image_url: format!("https://img/{id}.jpg"),
            created_at: DateTime::from_timestamp_millis(0).unwrap(),
        }
    }

    fn catalog_with(pets: &[Pet]) -> Catalog {
        let store = StoreHandle::new();
        for p in pets {
            store.add_pet(p.clone());
        }
        Catalog::new(store, Arc::new(IdGenerator::new()))
    }

    #[test]
    fn test_empty_catalog_landing() {
        let catalog = catalog_with(&[]);
        let landing = catalog.landing().unwrap();
        assert_eq!(landing.title, "No Pets Found");
        assert_eq!(landing.destination(), Some(Destination::AddNewPet));
        assert_eq!(catalog.counter_label(), None);
        assert!(catalog.add_current_to_cart().is_none());
        assert!(catalog.delete_current_pet().is_none());
    }

    #[test]
    fn test_counter_and_navigation() {
        let catalog = catalog_with(&[pet("1", "Buddy"), pet("2", "Max")]);
        assert!(catalog.landing().is_none());
        assert!(catalog.can_navigate());
        assert_eq!(catalog.counter_label().as_deref(), Some("Pet 1 of 2"));

        catalog.previous();
        assert_eq!(catalog.counter_label().as_deref(), Some("Pet 2 of 2"));

        let single = catalog_with(&[pet("1", "Buddy")]);
        assert!(!single.can_navigate());
    }

    #[test]
    fn test_add_current_to_cart_snapshots_pet() {
        let catalog = catalog_with(&[pet("1", "Buddy")]);

        let item = catalog.add_current_to_cart().unwrap();

        assert_eq!(item.pet_name.as_deref(), Some("Buddy"));
        assert_eq!(item.image_url, "https://img/1.jpg");
        assert_ne!(item.id.as_str(), "1");
        assert_eq!(catalog.store().total_items(), 1);

        let alert = Catalog::added_to_cart_alert(&item);
        assert_eq!(alert.message, "Buddy added to cart!");
        assert_eq!(
            alert.actions,
            vec![AlertAction::ContinueShopping, AlertAction::ViewCart]
        );
    }

    #[test]
    fn test_delete_current_pet_removes_matching_cart_items() {
        let catalog = catalog_with(&[pet("1", "Buddy"), pet("2", "Max")]);
        catalog.add_current_to_cart();
        catalog.add_current_to_cart();
        catalog.next();
        catalog.add_current_to_cart();

        catalog.previous();
        let summary = catalog.delete_current_pet().unwrap();

        assert_eq!(summary.removed_items, 2);
        assert_eq!(
            summary.message(),
            "Buddy has been removed and 2 item(s) from cart."
        );
        let store = catalog.store();
        assert_eq!(store.pets().len(), 1);
        assert_eq!(store.total_items(), 1);
        assert_eq!(store.cart_items()[0].pet_name.as_deref(), Some("Max"));
        assert_eq!(store.current_index(), 0);
    }

    #[test]
    fn test_delete_without_cart_items() {
        let catalog = catalog_with(&[pet("1", "Buddy")]);
        let summary = catalog.delete_current_pet().unwrap();
        assert_eq!(summary.message(), "Buddy has been removed.");
        assert!(catalog.landing().is_some());
    }

    #[test]
    fn test_cart_view_defaults_and_subtitle() {
        let catalog = catalog_with(&[pet("1", "Buddy")]);
        catalog.store().add_to_cart(CartItem {
            id: CartItemId::new("bare"),
            image_url: String::new(),
            added_at: DateTime::from_timestamp_millis(0).unwrap(),
            pet_name: None,
            breed: Some(String::new()),
            age: None,
            price: None,
        });

        let view = catalog.cart();
        assert_eq!(view.subtitle(), "1 item");
        assert_eq!(view.lines[0].name, DEFAULT_ITEM_NAME);
        assert_eq!(view.lines[0].breed, DEFAULT_ITEM_BREED);
        assert_eq!(view.lines[0].price, None);
        assert!(view.empty_state().is_none());

        catalog.add_current_to_cart();
        let view = catalog.cart();
        assert_eq!(view.subtitle(), "2 items");
        assert_eq!(view.lines[1].price.as_deref(), Some("$500.00"));
        assert_eq!(view.checkout_label(), "Checkout (2)");
    }

    #[test]
    fn test_remove_and_clear() {
        let catalog = catalog_with(&[pet("1", "Buddy")]);
        let item = catalog.add_current_to_cart().unwrap();
        catalog.add_current_to_cart();

        assert!(catalog.remove_item(&item.id));
        assert!(!catalog.remove_item(&item.id));
        assert_eq!(catalog.cart().total_items, 1);

        catalog.clear();
        let view = catalog.cart();
        assert!(view.is_empty());
        assert_eq!(view.subtitle(), "0 items");
        assert_eq!(view.empty_state(), Some(EMPTY_CART));
    }
}
