//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, dispatch to
//! static file serving, and response finalization.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use hyper::header::{HeaderValue, CONTENT_LENGTH, SERVER};
use hyper::{Method, Request, Response, StatusCode, Version};
use std::convert::Infallible;
use std::net::SocketAddr;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// URL path with leading slashes collapsed, query excluded
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    pub has_if_none_match: bool,
    pub peer_addr: Option<SocketAddr>,
    pub access_log: bool,
}

impl RequestContext<'_> {
    /// Build an error page, reporting it to the log first
    pub fn error(&self, status: StatusCode, message: &str) -> Response<ResponseBody> {
        if self.access_log {
            if let Some(peer_addr) = self.peer_addr {
                logger::log_request_error(&peer_addr, status.as_u16(), message);
            }
        }
        http::build_error_response(status, message, self.is_head)
    }
}

/// Main entry point for HTTP request handling
///
/// Every response leaves through here, so this is where the `Server`
/// header and the response hook are applied.
pub async fn handle_request<B>(
    req: Request<B>,
    state: &AppState,
    peer_addr: Option<SocketAddr>,
) -> Result<Response<ResponseBody>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let path = collapse_leading_slashes(uri.path());

    let ctx = RequestContext {
        path,
        query: uri.query(),
        is_head: *method == Method::HEAD,
        if_modified_since: req
            .headers()
            .get("if-modified-since")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
        has_if_none_match: req.headers().contains_key("if-none-match"),
        peer_addr,
        access_log: state.config.logging.access_log,
    };

    let mut response = match *method {
        Method::GET | Method::HEAD => static_files::send_head(&ctx, state).await,
        _ => ctx.error(
            StatusCode::NOT_IMPLEMENTED,
            &format!("Unsupported method ('{method}')"),
        ),
    };

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }
    let response = http::finalize_response(state.hook.as_ref(), response);

    if ctx.access_log {
        if let Some(peer_addr) = peer_addr {
            let mut entry = AccessLogEntry::new(
                peer_addr.ip().to_string(),
                method.to_string(),
                uri.path_and_query()
                    .map_or_else(|| uri.path().to_string(), ToString::to_string),
            );
            entry.http_version = version_label(req.version()).to_string();
            entry.status = response.status().as_u16();
            if !ctx.is_head {
                entry.body_bytes = response
                    .headers()
                    .get(CONTENT_LENGTH)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .filter(|n: &usize| *n > 0);
            }
            logger::log_access(&entry);
        }
    }

    Ok(response)
}

/// Reduce `//host/x`-style paths to a single leading slash so they can
/// never be echoed back as a protocol-relative redirect target
fn collapse_leading_slashes(path: &str) -> &str {
    if path.starts_with("//") {
        &path[path.len() - path.trim_start_matches('/').len() - 1..]
    } else {
        path
    }
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
