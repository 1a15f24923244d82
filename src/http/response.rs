//! HTTP response building module
//!
//! Provides builders for the responses a static file server sends,
//! decoupled from path resolution and filesystem access.

use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::io;

/// Body type shared by every response: in-memory pages or streamed files
pub type ResponseBody = UnsyncBoxBody<Bytes, io::Error>;

/// Wrap in-memory bytes as a response body
pub fn full<T: Into<Bytes>>(data: T) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Empty response body
pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Build 200 response for a file
///
/// `body` carries the file contents (or nothing for `HEAD`) and
/// `content_length` is the file size announced either way.
pub fn build_file_response(
    body: ResponseBody,
    content_length: u64,
    content_type: &str,
    last_modified: Option<&str>,
) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length);
    if let Some(last_modified) = last_modified {
        builder = builder.header("Last-Modified", last_modified);
    }

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(empty())
    })
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<ResponseBody> {
    let content_length = content.len();
    let body = if is_head { empty() } else { full(content) };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(empty())
        })
}

/// Build 301 redirect to the slash-terminated form of a directory URL
pub fn build_redirect_response(location: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(empty())
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(empty())
        })
}

/// Build 304 Not Modified response
pub fn build_304_response() -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .body(empty())
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(empty())
        })
}

/// Build an HTML error page
///
/// Statuses that must not carry a body (1xx, 204, 304) get headers only.
/// For `HEAD` the headers describe the page but the body is left out.
pub fn build_error_response(
    status: StatusCode,
    message: &str,
    is_head: bool,
) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(status)
        .header("Connection", "close");

    let allows_body = !status.is_informational()
        && status != StatusCode::NO_CONTENT
        && status != StatusCode::NOT_MODIFIED;

    let mut body = empty();
    if allows_body {
        let page = error_page(status, message);
        builder = builder
            .header("Content-Type", "text/html;charset=utf-8")
            .header("Content-Length", page.len());
        if !is_head {
            body = full(page);
        }
    }

    builder.body(body).unwrap_or_else(|e| {
        log_build_error(status.as_str(), &e);
        Response::new(empty())
    })
}

/// Render the error page body
fn error_page(status: StatusCode, message: &str) -> String {
    let code = status.as_u16();
    format!(
        r#"<!DOCTYPE HTML>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <title>Error response</title>
    </head>
    <body>
        <h1>Error response</h1>
        <p>Error code: {code}</p>
        <p>Message: {}.</p>
        <p>Error code explanation: {code} - {}.</p>
    </body>
</html>
"#,
        escape_html(message),
        explain(status),
    )
}

/// Long-form description shown under the error message
fn explain(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "Bad request syntax or unsupported method",
        403 => "Request forbidden -- authorization will not help",
        404 => "Nothing matches the given URI",
        405 => "Specified method is invalid for this resource",
        500 => "Server got itself in trouble",
        501 => "Server does not support this operation",
        _ => status.canonical_reason().unwrap_or("Unknown error"),
    }
}

/// Escape text for inclusion in HTML element content
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
