//! Upstream services used by the submission workflow.
//!
//! # Services
//!
//! - `images` - Random image service used to decorate new pets
//! - `echo` - Best-effort remote echo of every newly added pet
//!
//! Both sit behind traits ([`ImageSource`], [`PetEcho`]) so the workflow can
//! be driven by stubs in tests.

pub mod echo;
pub mod images;

pub use echo::{HttpEcho, PetEcho};
pub use images::{DogImageClient, ImageError, ImageSource};
