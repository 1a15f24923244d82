//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Startup banner and shutdown messages (stdout)
//! - Access logging, one line per request (stderr)
//! - Error and warning logging (stderr)

mod format;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Write to info log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(config: &Config) {
    write_info(&format!("Servidor iniciado en {}", config.public_url()));
    write_info("Presiona Ctrl+C para detener el servidor");
}

pub fn log_shutdown() {
    write_info("\nDeteniendo el servidor...");
}

pub fn log_server_error(err: &impl std::fmt::Display) {
    write_info(&format!("Error en el servidor: {err}"));
}

pub fn log_connection_error(peer_addr: &SocketAddr, err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Failed to serve connection from {peer_addr}: {err}"));
}

/// Log an error response the way the access log reports failed requests
pub fn log_request_error(peer_addr: &SocketAddr, status: u16, message: &str) {
    write_error(&format!(
        "{} - - [{}] code {status}, message {message}",
        peer_addr.ip(),
        chrono::Local::now().format("%d/%b/%Y %H:%M:%S"),
    ));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry) {
    write_error(&entry.format());
}
