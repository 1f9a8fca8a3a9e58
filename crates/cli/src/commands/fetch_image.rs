//! One-off image service request.

use std::io::Write;

use pawcart_app::AppState;
use pawcart_app::services::ImageSource;

/// Fetch one image URL and write it to `out`.
///
/// # Errors
///
/// Returns error if the request fails or the output cannot be written.
pub async fn run<W: Write>(state: &AppState, out: &mut W) -> pawcart_app::Result<()> {
    let url = state.images().random_image_url().await?;
    tracing::info!(%url, "Fetched image");
    writeln!(out, "{url}")?;
    Ok(())
}
