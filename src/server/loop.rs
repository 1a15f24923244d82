// Server loop module
// Accepts connections one at a time and serves each before the next

use std::convert::Infallible;
use tokio::net::TcpListener;

use super::connection::serve_connection;
use crate::config::AppState;
use crate::logger;

/// Accept and serve connections until the future is dropped.
///
/// Accept errors (aborted handshakes, descriptor exhaustion) are logged and
/// the loop keeps going; they never end the server.
pub async fn serve_forever(listener: &TcpListener, state: &AppState) -> Infallible {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                serve_connection(stream, peer_addr, state).await;
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
