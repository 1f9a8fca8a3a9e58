//! Catalog records: pets and the cart snapshots taken from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CartItemId, PetId};
use super::price::Price;

/// A catalog entry created locally through the add-pet form.
///
/// Field names serialize in camelCase because the remote echo receives this
/// exact JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Unique within the store for its whole lifetime.
    pub id: PetId,
    pub pet_name: String,
    pub breed: String,
    /// Age in whole years (0-30).
    pub age: u8,
    pub price: Price,
    /// Empty when the image service could not be reached.
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl Pet {
    /// Whether an image was attached when the pet was created.
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}

/// A value snapshot of a pet taken when it was put in the cart.
///
/// The item does not reference the pet by id; deleting the pet leaves the
/// item intact unless the caller removes it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique within the cart; independent of the source pet's id.
    pub id: CartItemId,
    pub image_url: String,
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
}

impl CartItem {
    /// Snapshot `pet` into a new cart item.
    #[must_use]
    pub fn from_pet(id: CartItemId, pet: &Pet, added_at: DateTime<Utc>) -> Self {
        Self {
            id,
            image_url: pet.image_url.clone(),
            added_at,
            pet_name: Some(pet.pet_name.clone()),
            breed: Some(pet.breed.clone()),
            age: Some(pet.age),
            price: Some(pet.price),
        }
    }

    /// Whether this item was taken from a pet with the given name.
    #[must_use]
    pub fn is_snapshot_of(&self, pet_name: &str) -> bool {
        self.pet_name.as_deref() == Some(pet_name)
    }
}
