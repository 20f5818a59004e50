use crate::library::{MediaEntry, ScanSummary};
use crate::server::AppContext;
use crate::streaming::resource_locator;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use reelshelf_common::MediaKind;
use serde::{Deserialize, Serialize};

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/health", get(health))
        .route("/videos", get(list_videos))
        .route("/summary", get(summary))
}

async fn health(State(ctx): State<AppContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "complete_pairs": ctx.library.complete_count(),
        "directories": ctx.config.library.directories.len(),
    }))
}

#[derive(Deserialize)]
struct ListVideosQuery {
    q: Option<String>,
}

/// Search result. The paths are API locators, never filesystem paths.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoSummary {
    pub title: String,
    pub video_path: String,
    pub poster_path: String,
}

impl From<&MediaEntry> for VideoSummary {
    fn from(entry: &MediaEntry) -> Self {
        Self {
            title: entry.base_name.clone(),
            video_path: resource_locator(MediaKind::Video, &entry.base_name),
            poster_path: resource_locator(MediaKind::Poster, &entry.base_name),
        }
    }
}

async fn list_videos(
    State(ctx): State<AppContext>,
    Query(params): Query<ListVideosQuery>,
) -> Json<Vec<VideoSummary>> {
    let query = params.q.unwrap_or_default();
    let videos = ctx
        .library
        .search(&query)
        .into_iter()
        .map(VideoSummary::from)
        .collect();
    Json(videos)
}

async fn summary(State(ctx): State<AppContext>) -> Json<ScanSummary> {
    Json(ctx.library.summary())
}
