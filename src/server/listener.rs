// Listener module
// Creates the single TCP listener the server accepts on

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a `TcpListener` with an explicit listen backlog.
///
/// On Unix `SO_REUSEADDR` is enabled so a restarted server can bind while
/// old connections sit in `TIME_WAIT`. `SO_REUSEPORT` is not: a second
/// process must not be able to bind the same port.
///
/// # Arguments
///
/// * `addr` - The socket address to bind to
/// * `backlog` - Maximum length of the pending connection queue
pub fn create_listener(addr: std::net::SocketAddr, backlog: i32) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    #[cfg(unix)]
    socket.set_reuse_address(true)?;

    // Set non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(backlog)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ephemeral_port() {
        let listener = create_listener("127.0.0.1:0".parse().unwrap(), 5).unwrap();
        let addr = listener.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
        assert!(addr.ip().is_loopback());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_port_taken() {
        let first = create_listener("127.0.0.1:0".parse().unwrap(), 5).unwrap();
        let addr = first.local_addr().unwrap();
        assert!(create_listener(addr, 5).is_err());
    }
}
