//! Static file server for cross-origin isolated pages.
//!
//! Serves the current directory over HTTP/1.x and adds
//! `Cross-Origin-Opener-Policy: same-origin` and
//! `Cross-Origin-Embedder-Policy: require-corp` to every response, which
//! browsers require before enabling `SharedArrayBuffer`.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use crate::config::{AppState, Config};
pub use crate::error::ServerError;
pub use crate::server::Server;
