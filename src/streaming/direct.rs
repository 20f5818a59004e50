//! Direct streaming with HTTP range requests.
//!
//! Serves indexed videos and posters straight from disk.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use reelshelf_common::MediaKind;
use std::io::SeekFrom;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::server::AppContext;

/// Stream the video indexed under `base_name`.
pub async fn stream_video(
    State(ctx): State<AppContext>,
    Path(base_name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    stream_resource(&ctx, &base_name, MediaKind::Video, &headers).await
}

/// Stream the poster indexed under `base_name`.
pub async fn stream_poster(
    State(ctx): State<AppContext>,
    Path(base_name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    stream_resource(&ctx, &base_name, MediaKind::Poster, &headers).await
}

async fn stream_resource(
    ctx: &AppContext,
    base_name: &str,
    kind: MediaKind,
    headers: &HeaderMap,
) -> Result<Response, StatusCode> {
    let file_path = ctx.library.resolve(base_name, kind).map_err(|e| {
        tracing::debug!("No {} to serve: {}", kind, e);
        StatusCode::NOT_FOUND
    })?;

    serve_file(file_path, kind, headers).await
}

/// Serve a file with range request support.
///
/// A file that vanished since the scan is reported as `404`.
pub async fn serve_file(
    file_path: &std::path::Path,
    kind: MediaKind,
    headers: &HeaderMap,
) -> Result<Response, StatusCode> {
    let metadata = tokio::fs::metadata(file_path).await.map_err(|e| {
        tracing::warn!("Indexed file unavailable {:?}: {}", file_path, e);
        StatusCode::NOT_FOUND
    })?;

    let file_size = metadata.len();

    let range = headers
        .get(header::RANGE)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| parse_range_header(s, file_size));

    let content_type = determine_content_type(file_path, kind);

    let mut file = File::open(file_path)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;

    match range {
        Some((start, end)) => {
            let length = end - start + 1;

            file.seek(SeekFrom::Start(start))
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

            let stream = ReaderStream::new(file.take(length));
            let body = Body::from_stream(stream);

            Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, length.to_string())
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", start, end, file_size),
                )
                .header(header::ACCEPT_RANGES, "bytes")
                .body(body)
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
        }
        None => {
            let stream = ReaderStream::new(file);
            let body = Body::from_stream(stream);

            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, file_size.to_string())
                .header(header::ACCEPT_RANGES, "bytes")
                .body(body)
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Parse HTTP Range header.
///
/// Supports formats:
/// - bytes=0-499
/// - bytes=500-999
/// - bytes=500-
/// - bytes=-500 (last 500 bytes)
///
/// Anything else, including ranges on an empty file, yields `None` and the
/// whole file is served.
fn parse_range_header(header: &str, file_size: u64) -> Option<(u64, u64)> {
    if file_size == 0 {
        return None;
    }

    let header = header.strip_prefix("bytes=")?;

    let parts: Vec<&str> = header.split('-').collect();
    if parts.len() != 2 {
        return None;
    }

    let start = parts[0].trim();
    let end = parts[1].trim();

    match (start.is_empty(), end.is_empty()) {
        // bytes=-500 (last 500 bytes)
        (true, false) => {
            let suffix_len: u64 = end.parse().ok()?;
            if suffix_len == 0 {
                return None;
            }
            let start = file_size.saturating_sub(suffix_len);
            Some((start, file_size - 1))
        }
        // bytes=500- (from 500 to end)
        (false, true) => {
            let start: u64 = start.parse().ok()?;
            if start >= file_size {
                return None;
            }
            Some((start, file_size - 1))
        }
        // bytes=0-499
        (false, false) => {
            let start: u64 = start.parse().ok()?;
            let end: u64 = end.parse().ok()?;
            if start >= file_size {
                return None;
            }
            let end = end.min(file_size - 1);
            if start > end {
                return None;
            }
            Some((start, end))
        }
        // bytes=- (invalid)
        (true, true) => None,
    }
}

/// Content type from the file extension, or the kind's generic default.
fn determine_content_type(file_path: &std::path::Path, kind: MediaKind) -> String {
    mime_guess::from_path(file_path)
        .first_raw()
        .unwrap_or_else(|| kind.fallback_content_type())
        .to_string()
}
