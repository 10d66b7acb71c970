//! Host port checks.
//!
//! Both checks query the host afresh on every call. Another process can bind
//! the port between the check and the container start; the engine reports
//! that case itself.

use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};

/// Timeout for the listener probe used by `open`
const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Whether another process has bound `port` on the host.
pub async fn port_in_use(port: u16) -> bool {
    match TcpListener::bind(("0.0.0.0", port)).await {
        Ok(_listener) => false,
        Err(e) => {
            log::debug!("Port {} bind check failed: {}", port, e);
            e.kind() == std::io::ErrorKind::AddrInUse
        }
    }
}

/// Whether something accepts connections on `127.0.0.1:port`.
pub async fn has_listener(port: u16) -> bool {
    matches!(
        tokio::time::timeout(CONNECT_TIMEOUT, TcpStream::connect(("127.0.0.1", port))).await,
        Ok(Ok(_))
    )
}
