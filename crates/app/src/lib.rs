//! PawCart client library.
//!
//! Everything a front end needs on top of [`pawcart_core`]:
//!
//! - [`store::StoreHandle`] - the shared in-memory store
//! - [`submission::PetSubmission`] - the add-pet workflow
//! - [`http::HttpClient`] - JSON HTTP client with per-request timeouts
//! - [`catalog::Catalog`] - pet browser and cart logic
//! - [`config::AppConfig`] - environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod navigation;
pub mod services;
pub mod state;
pub mod store;
pub mod submission;

pub use error::{AppError, Result};
pub use state::AppState;
