// Listener module
// Creates the TCP listener the server accepts connections on

use crate::error::ServeError;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Pending-connection queue length
const BACKLOG: i32 = 128;

/// Create a `TcpListener` bound to `addr` with `SO_REUSEADDR` enabled.
///
/// `SO_REUSEADDR` lets a restarted server rebind while old sockets sit in
/// `TIME_WAIT`. `SO_REUSEPORT` is left off, so binding a port another
/// process is listening on fails with [`ServeError::Bind`].
///
/// Must be called from inside a Tokio runtime.
pub fn create_listener(addr: SocketAddr) -> Result<TcpListener, ServeError> {
    bind(addr).map_err(|source| ServeError::Bind { addr, source })
}

fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;

    // Set non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    // Convert socket2::Socket to std::net::TcpListener, then to tokio::net::TcpListener
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
