//! PawCart Core - Shared types and the in-memory store.
//!
//! This crate provides the types used across all PawCart components:
//! - `app` - HTTP client, submission workflow and screen logic
//! - `cli` - Interactive terminal front end
//!
//! # Architecture
//!
//! The core crate contains only types and the [`Store`] state machine - no
//! I/O, no HTTP clients, no locking. This keeps it lightweight and lets every
//! store invariant be tested synchronously.
//!
//! # Modules
//!
//! - [`types`] - Pets, cart items, IDs, prices and the add-pet form
//! - [`store`] - The pet list, cart list and cursor with their mutation rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod store;
pub mod types;

pub use store::Store;
pub use types::*;
