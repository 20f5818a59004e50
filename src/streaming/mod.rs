//! Media streaming module.
//!
//! # Routes
//!
//! - `GET /video/{base_name}` - Video bytes with range support
//! - `GET /poster/{base_name}` - Poster bytes with range support
//!
//! Both answer `404` with an empty body when the base name is unknown or has
//! no file of the requested kind.

mod direct;

pub use direct::{serve_file, stream_poster, stream_video};

use axum::{routing::get, Router};
use reelshelf_common::MediaKind;

use crate::server::AppContext;

/// Create the media router (nested under `/api`).
pub fn media_router() -> Router<AppContext> {
    Router::new()
        .route("/video/:base_name", get(stream_video))
        .route("/poster/:base_name", get(stream_poster))
}

/// API path a client uses to fetch `kind` for `base_name`.
///
/// # Examples
///
/// ```
/// use reelshelf::streaming::resource_locator;
/// use reelshelf_common::MediaKind;
///
/// assert_eq!(resource_locator(MediaKind::Video, "movie"), "/api/video/movie");
/// assert_eq!(
///     resource_locator(MediaKind::Poster, "My Movie"),
///     "/api/poster/My%20Movie"
/// );
/// ```
pub fn resource_locator(kind: MediaKind, base_name: &str) -> String {
    format!(
        "/api/{}/{}",
        kind.route_segment(),
        urlencoding::encode(base_name)
    )
}
