//! Core types for PawCart.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod form;
pub mod id;
pub mod pet;
pub mod price;

pub use form::{FormField, PetForm, PetFormError, ValidationErrors};
pub use id::*;
pub use pet::{CartItem, Pet};
pub use price::Price;
