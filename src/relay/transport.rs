//! Outbound datagram transport
//!
//! The dispatcher sends through a [`Transport`] rather than a socket
//! directly, so dispatch policy can be exercised without the network.
//! Production use goes through [`UdpTransport`]: one long-lived socket,
//! bound once at startup and shared by every outbound send for the
//! lifetime of the process.

use std::future::Future;
use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use tokio::net::UdpSocket;

use crate::error::{Error, Result};

/// Sink for outbound command datagrams
///
/// UDP sends are independent and stateless per packet, so implementations
/// only need `&self`; concurrent sends from different inbound events may
/// interleave freely.
pub trait Transport: Send + Sync {
    /// Send one datagram to `addr`
    fn send_to(
        &self,
        payload: &[u8],
        addr: SocketAddr,
    ) -> impl Future<Output = io::Result<usize>> + Send;
}

/// Long-lived outbound UDP socket
///
/// A send error is transient and does not close the socket; its lifecycle
/// is process-scoped.
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Bind the outbound socket
    ///
    /// The source port is fixed for the life of the socket once bound
    /// (port 0 asks the OS to pick it). Bind failure is fatal at startup.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;

        if let Ok(local) = socket.local_addr() {
            tracing::debug!(addr = %local, "outbound command socket bound");
        }

        Ok(Self { socket })
    }

    /// Bind on an unspecified address with an OS-assigned source port
    pub async fn bind_ephemeral() -> Result<Self> {
        Self::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))).await
    }
}

impl Transport for UdpTransport {
    async fn send_to(&self, payload: &[u8], addr: SocketAddr) -> io::Result<usize> {
        self.socket.send_to(payload, addr).await
    }
}
