//! Discovery handshake
//!
//! Asymmetric UDP broadcast discovery, a presence probe rather than a
//! managed protocol:
//!
//! ```text
//!  relay                                    controllers
//!    │ bind response listener (fatal on failure)
//!    │
//!    │── "hello" ──► 255.255.255.255:request_port  (once, ephemeral socket)
//!    │
//!    │◄── response ── controller A
//!    │◄── response ── controller B     (0..N, unordered, forever)
//! ```
//!
//! No correlation ID, no retry schedule, no convergence criterion: every
//! datagram arriving on the response port is trimmed and logged with the
//! sender's address. Discovery never touches the device registry.

use std::net::{Ipv4Addr, SocketAddr};

use tokio::net::UdpSocket;
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::server::config::RelayConfig;

/// One discovery response as received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryResponse {
    /// Sender of the response datagram
    pub remote_addr: SocketAddr,
    /// Response payload, trimmed; format is controller-defined
    pub payload: String,
}

/// UDP broadcast discovery service
pub struct DiscoveryService {
    listener: UdpSocket,
    probe_addr: SocketAddr,
    payload: String,
}

impl DiscoveryService {
    /// Bind the response listener
    ///
    /// Binding happens before the hello is sent so responses racing the
    /// probe are not lost. A bind failure is fatal; no fallback port.
    pub async fn bind(config: &RelayConfig) -> Result<Self> {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.discovery_response_port));
        let listener = UdpSocket::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;

        tracing::info!(addr = %addr, "discovery response listener bound");

        Ok(Self {
            listener,
            probe_addr: SocketAddr::from((config.discovery_addr, config.discovery_request_port)),
            payload: config.discovery_payload.clone(),
        })
    }

    /// Address the response listener actually bound to
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the discovery round: one hello broadcast, then listen forever
    pub async fn run(self) -> Result<()> {
        self.run_inner(None).await
    }

    /// Run the discovery round, forwarding each response on `events`
    ///
    /// Responses are still logged; the channel is for observers (tests,
    /// future reconciliation). A full or closed channel drops the event.
    pub async fn run_with_events(self, events: mpsc::Sender<DiscoveryResponse>) -> Result<()> {
        self.run_inner(Some(events)).await
    }

    async fn run_inner(self, events: Option<mpsc::Sender<DiscoveryResponse>>) -> Result<()> {
        self.send_hello().await;
        self.listen(events).await
    }

    /// Send the fixed hello literal, exactly once per service start
    ///
    /// Uses a second, ephemeral-port socket with broadcast enabled. A send
    /// failure is logged but does not stop the listener: responses from a
    /// previous probe may still arrive.
    async fn send_hello(&self) {
        let probe = async {
            let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
            socket.set_broadcast(true)?;
            socket.send_to(self.payload.as_bytes(), self.probe_addr).await
        };

        match probe.await {
            Ok(bytes) => {
                tracing::info!(dest = %self.probe_addr, bytes, "discovery hello sent");
            }
            Err(e) => {
                tracing::warn!(dest = %self.probe_addr, error = %e, "discovery hello failed");
            }
        }
    }

    /// Receive and log responses until the task is dropped
    async fn listen(&self, events: Option<mpsc::Sender<DiscoveryResponse>>) -> Result<()> {
        let mut buf = vec![0u8; 1024];

        loop {
            let (len, remote_addr) = match self.listener.recv_from(&mut buf).await {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(error = %e, "discovery recv_from failed");
                    continue;
                }
            };

            let payload = String::from_utf8_lossy(&buf[..len]).trim().to_string();
            tracing::info!(remote = %remote_addr, payload = %payload, "discovery response");

            if let Some(ref tx) = events {
                let _ = tx.try_send(DiscoveryResponse {
                    remote_addr,
                    payload,
                });
            }
        }
    }
}
