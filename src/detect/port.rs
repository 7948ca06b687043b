use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Try one TCP connection to `ip:port`.
///
/// Only an established connection counts as open; refusal, timeout and a
/// missing address are all reported as closed.
pub async fn check_port(ip: Option<IpAddr>, port: u16, connect_timeout: Duration) -> bool {
    let Some(ip) = ip else {
        return false;
    };
    let addr = SocketAddr::new(ip, port);
    match timeout(connect_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(_stream)) => {
            debug!(%addr, "port open");
            true
        }
        Ok(Err(e)) => {
            debug!(%addr, "port closed: {e}");
            false
        }
        Err(_elapsed) => {
            debug!(%addr, "connect timed out");
            false
        }
    }
}
