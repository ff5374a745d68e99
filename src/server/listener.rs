//! UDP command ingress
//!
//! Binds the command port and feeds every inbound datagram through the
//! codec into the dispatcher. One listener port serves both broadcast
//! (`<color>`) and targeted (`<id>.<zone>:<color>`) commands; malformed
//! datagrams are logged and dropped without affecting the loop.

use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::protocol::decode_datagram;
use crate::registry::DeviceRegistry;
use crate::relay::{RelayDispatcher, UdpTransport};
use crate::server::config::RelayConfig;
use crate::server::push::{push_ingress_loop, PushEvent};

/// UDP command relay server
pub struct RelayServer {
    config: RelayConfig,
    dispatcher: Arc<RelayDispatcher<UdpTransport>>,
}

impl RelayServer {
    /// Create a new server, binding the long-lived outbound socket
    ///
    /// A bind failure here is fatal, as is any listener bind failure later
    /// in [`run`](Self::run); there is no fallback port.
    pub async fn new(config: RelayConfig, registry: Arc<DeviceRegistry>) -> Result<Self> {
        let transport = UdpTransport::bind(config.outbound_addr).await?;
        let dispatcher = Arc::new(RelayDispatcher::new(
            transport,
            registry,
            config.controller_port,
        ));

        Ok(Self { config, dispatcher })
    }

    /// The dispatcher shared by both ingress paths
    pub fn dispatcher(&self) -> &Arc<RelayDispatcher<UdpTransport>> {
        &self.dispatcher
    }

    /// The registry backing this server
    pub fn registry(&self) -> &Arc<DeviceRegistry> {
        self.dispatcher.registry()
    }

    /// Run the command listener
    ///
    /// This method blocks until the server is shut down.
    pub async fn run(&self) -> Result<()> {
        let socket = self.bind_listener().await?;
        self.recv_loop(&socket).await
    }

    /// Run the command listener with graceful shutdown
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()>,
    {
        let socket = self.bind_listener().await?;

        tokio::select! {
            _ = shutdown => {
                tracing::info!("Shutdown signal received");
                Ok(())
            }
            result = self.recv_loop(&socket) => result,
        }
    }

    /// Spawn the push-channel ingress task
    ///
    /// Returns the sender half the external transport feeds `{device, color}`
    /// events into. The task runs until every sender is dropped.
    pub fn spawn_push_ingress(&self) -> mpsc::Sender<PushEvent> {
        let (tx, rx) = mpsc::channel(self.config.push_queue_depth);
        let dispatcher = Arc::clone(&self.dispatcher);

        tokio::spawn(async move {
            push_ingress_loop(dispatcher, rx).await;
        });

        tx
    }

    async fn bind_listener(&self) -> Result<UdpSocket> {
        let addr = self.config.bind_addr;
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;

        tracing::info!(addr = %addr, "command listener bound");
        Ok(socket)
    }

    async fn recv_loop(&self, socket: &UdpSocket) -> Result<()> {
        let mut buf = vec![0u8; self.config.recv_buffer_size];

        loop {
            match socket.recv_from(&mut buf).await {
                Ok((len, peer)) => {
                    tracing::trace!(peer = %peer, bytes = len, "datagram received");
                    self.handle_datagram(&buf[..len]).await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "recv_from failed");
                }
            }
        }
    }

    /// Decode one inbound datagram and dispatch it
    ///
    /// Payloads are interpreted as UTF-8 lossily; a datagram the codec
    /// rejects is logged and dropped, never fatal.
    pub async fn handle_datagram(&self, payload: &[u8]) {
        let text = String::from_utf8_lossy(payload);

        match decode_datagram(&text) {
            Ok(command) => self.dispatcher.dispatch(command).await,
            Err(e) => {
                tracing::warn!(error = %e, payload = %text, "malformed datagram dropped");
            }
        }
    }

    /// The configured command listener address
    pub fn bind_addr(&self) -> std::net::SocketAddr {
        self.config.bind_addr
    }
}
