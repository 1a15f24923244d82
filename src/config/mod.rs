// Configuration module entry point
// Holds the compiled-in server configuration and per-process state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, ServerConfig};

use crate::error::ServerError;

/// Port the server listens on. Not configurable at runtime.
pub const PORT: u16 = 8000;

impl Config {
    /// Build the configuration from compiled-in defaults.
    ///
    /// No file or environment source is layered on top: the listening
    /// address and served directory are fixed for this server.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(PORT))?
            .set_default("server.backlog", 5)?
            .set_default("server.root", ".")?
            .set_default(
                "http.server_name",
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("http.index_files", vec!["index.html", "index.htm"])?
            .set_default("http.header_read_timeout", 30)?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| {
                ServerError::Address(format!("{}:{}: {e}", self.server.host, self.server.port))
            })
    }

    /// URL printed in the startup banner
    pub fn public_url(&self) -> String {
        format!("http://localhost:{}", self.server.port)
    }
}
