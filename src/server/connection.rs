// Connection handling module
// Serves one accepted TCP connection to completion

use std::net::SocketAddr;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve a single connection and return once it is closed.
///
/// The caller awaits this before accepting again, which is what keeps
/// request handling strictly sequential. Keep-alive is off, so each
/// connection carries exactly one request and is closed after the response.
///
/// Only reading the request head is bounded by `http.header_read_timeout`.
/// Writing the body has no deadline, so slow readers still get whole files.
///
/// # Arguments
///
/// * `stream` - The accepted TCP stream
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
pub async fn serve_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &AppState,
) {
    let io = TokioIo::new(stream);
    let header_timeout = Duration::from_secs(state.config.http.header_read_timeout);

    let mut builder = http1::Builder::new();
    builder
        .keep_alive(false)
        .title_case_headers(true)
        .timer(TokioTimer::new())
        .header_read_timeout(header_timeout);

    let conn = builder.serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, state, Some(peer_addr))),
    );

    if let Err(err) = conn.await {
        logger::log_connection_error(&peer_addr, &err);
    }
}
