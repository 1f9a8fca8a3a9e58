//! CLI command implementations.

pub mod fetch_image;
pub mod shell;
