// Server module entry point
// Binds the listener and runs the sequential serve loop until shutdown

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is exposed as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub use listener::create_listener;
pub use server_loop::serve_forever;
pub use signal::Interrupt;

use crate::config::AppState;
use crate::error::ServerError;

/// Static file server bound to its listening socket
pub struct Server {
    listener: TcpListener,
    state: AppState,
}

impl Server {
    /// Bind the address configured in `state.config`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn bind(state: AppState) -> Result<Self, ServerError> {
        let addr = state.config.get_socket_addr()?;
        let listener = create_listener(addr, state.config.server.backlog)
            .map_err(|source| ServerError::Bind { addr, source })?;

        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve until `shutdown` resolves.
    ///
    /// Whatever connection is in flight at that moment is dropped, and the
    /// listener is closed when this returns.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            never = serve_forever(&self.listener, &self.state) => match never {},
            () = shutdown => {}
        }
    }
}
