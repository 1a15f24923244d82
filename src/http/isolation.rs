//! Response finalization hooks
//!
//! A hook runs on every response right before its headers are written,
//! regardless of which handler produced it. `CrossOriginIsolation` adds the
//! two headers browsers require before exposing `SharedArrayBuffer` and
//! high-resolution timers to a page.

use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::Response;

pub const CROSS_ORIGIN_OPENER_POLICY: &str = "cross-origin-opener-policy";
pub const CROSS_ORIGIN_EMBEDDER_POLICY: &str = "cross-origin-embedder-policy";

/// Last chance to adjust response headers before they are sent
pub trait ResponseHook: Send + Sync {
    fn finalize(&self, headers: &mut HeaderMap);
}

/// Marks every response as cross-origin isolated
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossOriginIsolation;

impl ResponseHook for CrossOriginIsolation {
    fn finalize(&self, headers: &mut HeaderMap) {
        // insert, not append: each header must appear exactly once
        headers.insert(
            HeaderName::from_static(CROSS_ORIGIN_OPENER_POLICY),
            HeaderValue::from_static("same-origin"),
        );
        headers.insert(
            HeaderName::from_static(CROSS_ORIGIN_EMBEDDER_POLICY),
            HeaderValue::from_static("require-corp"),
        );
    }
}

/// Run `hook` over a finished response
pub fn finalize_response<B>(hook: &dyn ResponseHook, mut response: Response<B>) -> Response<B> {
    hook.finalize(response.headers_mut());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_added() {
        let resp = finalize_response(&CrossOriginIsolation, Response::new(()));
        assert_eq!(resp.headers()["cross-origin-opener-policy"], "same-origin");
        assert_eq!(resp.headers()["cross-origin-embedder-policy"], "require-corp");
    }

    #[test]
    fn test_existing_headers_kept() {
        let resp = Response::builder()
            .status(404)
            .header("Content-Type", "text/html")
            .body(())
            .unwrap();
        let resp = finalize_response(&CrossOriginIsolation, resp);
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["content-type"], "text/html");
        assert_eq!(resp.headers().len(), 3);
    }

    #[test]
    fn test_exactly_once() {
        let resp = Response::builder()
            .header("Cross-Origin-Opener-Policy", "unsafe-none")
            .header("Cross-Origin-Opener-Policy", "same-origin-allow-popups")
            .body(())
            .unwrap();
        let resp = finalize_response(&CrossOriginIsolation, resp);
        let resp = finalize_response(&CrossOriginIsolation, resp);
        let coop: Vec<_> = resp
            .headers()
            .get_all(CROSS_ORIGIN_OPENER_POLICY)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(coop, vec!["same-origin"]);
        assert_eq!(
            resp.headers()
                .get_all(CROSS_ORIGIN_EMBEDDER_POLICY)
                .iter()
                .count(),
            1
        );
    }
}
