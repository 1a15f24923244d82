//! Process-level error type
//!
//! Anything that reaches `main` as a `ServerError` ends the process with
//! exit status 1. Per-request failures never become a `ServerError`; they are
//! answered with an HTTP error response instead.

use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address {0}")]
    Address(String),

    #[error("cannot serve directory '{path}': {source}")]
    Root {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_bind_error_display() {
        let err = ServerError::Bind {
            addr: "0.0.0.0:8000".parse().unwrap(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "Address already in use"),
        };
        assert_eq!(
            err.to_string(),
            "failed to bind 0.0.0.0:8000: Address already in use"
        );
    }

    #[test]
    fn test_root_error_display() {
        let err = ServerError::Root {
            path: "/missing".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert!(err.to_string().contains("/missing"));
    }
}
