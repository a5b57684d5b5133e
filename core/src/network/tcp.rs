use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use sweepr_common::network::probe::ProbeResult;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Opens (and immediately releases) a connection to a socket address.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, addr: SocketAddr) -> io::Result<()>;
}

/// Plain TCP three-way handshake through the OS socket API.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, addr: SocketAddr) -> io::Result<()> {
        let stream: TcpStream = TcpStream::connect(addr).await?;
        drop(stream);
        Ok(())
    }
}

/// Tries `ports` one after the other and stops at the first handshake that
/// completes within `probe_timeout`.
///
/// Refusals, timeouts and routing errors all count as "closed".
pub async fn scan_host<C>(
    connector: &C,
    addr: Ipv4Addr,
    ports: &[u16],
    probe_timeout: Duration,
) -> ProbeResult
where
    C: Connector + ?Sized,
{
    for &port in ports {
        let socket_addr: SocketAddr = SocketAddr::new(IpAddr::V4(addr), port);

        match timeout(probe_timeout, connector.connect(socket_addr)).await {
            Ok(Ok(())) => return ProbeResult::open(addr, port),
            Ok(Err(e)) => trace!("{socket_addr} closed: {e}"),
            Err(_elapsed) => trace!("{socket_addr} timed out"),
        }
    }

    ProbeResult::none_open(addr)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
