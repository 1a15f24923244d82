//! Static file serving module
//!
//! Maps URL paths onto the served directory and builds file, redirect,
//! index and listing responses.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::http::ResponseBody;
use crate::logger;
use futures_util::TryStreamExt;
use http_body_util::{BodyExt, StreamBody};
use hyper::body::Frame;
use hyper::{Response, StatusCode};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio_util::io::ReaderStream;

/// Read size for streamed file bodies
const CHUNK_SIZE: usize = 64 * 1024;

/// Resolve a request and build the response for it (GET and HEAD)
pub async fn send_head(ctx: &RequestContext<'_>, state: &AppState) -> Response<ResponseBody> {
    let path = translate_path(&state.root, ctx.path);

    if fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
        if !ctx.path.ends_with('/') {
            let location = match ctx.query {
                Some(query) => format!("{}/?{query}", ctx.path),
                None => format!("{}/", ctx.path),
            };
            return http::build_redirect_response(&location);
        }

        for index_file in &state.config.http.index_files {
            let index_path = path.join(index_file);
            if fs::metadata(&index_path).await.is_ok_and(|m| m.is_file()) {
                return serve_file(ctx, &index_path).await;
            }
        }

        return listing::list_directory(ctx, &path).await;
    }

    // A trailing slash names a directory; a plain file never matches it
    if ctx.path.trim_end().ends_with('/') {
        return ctx.error(StatusCode::NOT_FOUND, "File not found");
    }

    serve_file(ctx, &path).await
}

/// Serve one regular file, honoring `If-Modified-Since`
///
/// The body is streamed from disk in chunks, so file size is bounded
/// only by what the client is willing to read.
async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<ResponseBody> {
    let Ok(file) = fs::File::open(path).await else {
        return ctx.error(StatusCode::NOT_FOUND, "File not found");
    };
    let metadata = match file.metadata().await {
        Ok(m) if m.is_file() => m,
        Ok(_) => return ctx.error(StatusCode::NOT_FOUND, "File not found"),
        Err(e) => {
            logger::log_error(&format!("Failed to stat file '{}': {e}", path.display()));
            return ctx.error(StatusCode::NOT_FOUND, "File not found");
        }
    };

    let modified = metadata.modified().ok();
    if let Some(modified) = modified {
        if cache::is_not_modified(
            ctx.if_modified_since.as_deref(),
            ctx.has_if_none_match,
            modified,
        ) {
            return http::build_304_response();
        }
    }

    let body = if ctx.is_head {
        http::empty()
    } else {
        let chunks = ReaderStream::with_capacity(file, CHUNK_SIZE).map_ok(Frame::data);
        StreamBody::new(chunks).boxed_unsync()
    };
    let last_modified = modified.map(cache::format_http_date);

    http::build_file_response(
        body,
        metadata.len(),
        mime::content_type_for(path),
        last_modified.as_deref(),
    )
}

/// Map a URL path onto a filesystem path under `root`
///
/// The path is percent-decoded and normalized as an absolute path first,
/// so `..` can never climb above `/`. Words that are not a single plain
/// path component (`.`, `..`, drive prefixes, embedded separators) are
/// dropped, which keeps the result inside `root`.
pub fn translate_path(root: &Path, url_path: &str) -> PathBuf {
    let url_path = url_path.split(['?', '#']).next().unwrap_or_default();
    let decoded = urlencoding::decode_binary(url_path.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded);

    let mut resolved = root.to_path_buf();
    for word in normalize(&decoded) {
        if is_plain_component(word) {
            resolved.push(word);
        }
    }
    resolved
}

/// Lexically normalize an absolute URL path into its segments
fn normalize(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments
}

fn is_plain_component(word: &str) -> bool {
    let mut components = Path::new(word).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
