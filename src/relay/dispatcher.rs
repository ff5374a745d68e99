//! Relay dispatcher
//!
//! The single component that performs network I/O for commands. Both
//! ingress paths hand their decoded [`Command`]s to [`RelayDispatcher::dispatch`],
//! which applies the one dispatch policy: no target ID → fan out to every
//! registered device, otherwise resolve the ID and unicast.
//!
//! Per-command failures are local. An unknown ID or a transient send error
//! is logged and the command dropped; nothing propagates to other in-flight
//! commands and the outbound socket stays open.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::protocol::{encode_wire, Command};
use crate::registry::DeviceRegistry;
use crate::relay::transport::Transport;

/// Relays decoded commands to controllers over UDP
pub struct RelayDispatcher<T: Transport> {
    transport: T,
    registry: Arc<DeviceRegistry>,
    /// Destination port controllers listen on
    controller_port: u16,
}

impl<T: Transport> RelayDispatcher<T> {
    /// Create a dispatcher sending through `transport`
    pub fn new(transport: T, registry: Arc<DeviceRegistry>, controller_port: u16) -> Self {
        Self {
            transport,
            registry,
            controller_port,
        }
    }

    /// The registry this dispatcher resolves against
    pub fn registry(&self) -> &Arc<DeviceRegistry> {
        &self.registry
    }

    /// Send a color to a single controller by address
    ///
    /// Exactly one outbound datagram, payload `<color>\n`. A send failure
    /// is reported but leaves the socket usable.
    pub async fn send(&self, addr: Ipv4Addr, color: &str) -> Result<()> {
        let payload = encode_wire(color);
        let dest = SocketAddr::from((addr, self.controller_port));

        match self.transport.send_to(&payload, dest).await {
            Ok(bytes) => {
                tracing::trace!(addr = %dest, bytes, color, "command sent");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(addr = %dest, error = %e, "command send failed");
                Err(Error::Send(e))
            }
        }
    }

    /// Send a color to a single controller by device ID
    ///
    /// Resolution failure surfaces as `UnknownDevice` with zero sends
    /// performed; stale or bad IDs are a caller bug, not a transient
    /// fault, so there is no retry. A successful send updates the
    /// registry's last-color cache.
    ///
    /// The zone picks a sub-strip of the device; controllers do not read
    /// zones on the wire, so it is accepted here but not re-encoded.
    pub async fn send_by_id(&self, id: &str, color: &str, zone: &str) -> Result<()> {
        let addr = self.registry.address_of(id)?;

        tracing::debug!(id, zone, color, addr = %addr, "relaying command");
        self.send(addr, color).await?;

        self.registry.record_color(id, color).await;
        Ok(())
    }

    /// Fan a color out to every registered device
    ///
    /// Iterates registry insertion order; a failure on one device does not
    /// abort delivery to the rest (no atomicity across the broadcast set).
    pub async fn broadcast_all(&self, color: &str) {
        for id in self.registry.ids() {
            if let Err(e) = self.send_by_id(id, color, "").await {
                tracing::warn!(id, error = %e, "broadcast send failed, continuing");
            }
        }
    }

    /// Apply the dispatch policy to a decoded command
    ///
    /// Errors are fully handled here: logged, command dropped. This is the
    /// convergence point for both ingress paths.
    pub async fn dispatch(&self, command: Command) {
        match command.target {
            Some(ref id) => {
                if let Err(e) = self.send_by_id(id, &command.color, &command.zone).await {
                    tracing::warn!(id = %id, error = %e, "command dropped");
                }
            }
            None => self.broadcast_all(&command.color).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use tokio_test::assert_ok;

    use super::*;

    /// Transport double that records sends and fails on request
    #[derive(Default)]
    struct MockTransport {
        sent: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
        /// Destination addresses that should fail with `EHOSTUNREACH`
        fail_addrs: Vec<SocketAddr>,
    }

    impl MockTransport {
        fn failing_on(addrs: impl IntoIterator<Item = SocketAddr>) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_addrs: addrs.into_iter().collect(),
            }
        }

        fn sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        async fn send_to(&self, payload: &[u8], addr: SocketAddr) -> io::Result<usize> {
            if self.fail_addrs.contains(&addr) {
                return Err(io::Error::new(io::ErrorKind::Other, "host unreachable"));
            }
            self.sent.lock().unwrap().push((payload.to_vec(), addr));
            Ok(payload.len())
        }
    }

    fn registry() -> Arc<DeviceRegistry> {
        Arc::new(
            DeviceRegistry::new([
                ("desk", "10.0.0.10"),
                ("shelf", "10.0.0.11"),
                ("window", "10.0.0.12"),
            ])
            .unwrap(),
        )
    }

    fn dest(last_octet: u8) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::new(10, 0, 0, last_octet), 1337))
    }

    #[tokio::test]
    async fn test_send_by_id_encodes_newline_terminated_color() {
        let dispatcher = RelayDispatcher::new(MockTransport::default(), registry(), 1337);

        assert_ok!(dispatcher.send_by_id("desk", "ff00ff", "").await);

        let sent = dispatcher.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, b"ff00ff\n");
        assert_eq!(sent[0].1, dest(10));
    }

    #[tokio::test]
    async fn test_unknown_id_performs_zero_sends() {
        let dispatcher = RelayDispatcher::new(MockTransport::default(), registry(), 1337);

        let result = dispatcher.send_by_id("attic", "fff", "").await;
        assert!(matches!(result, Err(Error::Registry(_))));
        assert!(dispatcher.transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_sends_once_per_device() {
        let dispatcher = RelayDispatcher::new(MockTransport::default(), registry(), 1337);

        dispatcher.broadcast_all("abc").await;

        let sent = dispatcher.transport.sent();
        assert_eq!(sent.len(), 3);
        // Registry insertion order
        assert_eq!(sent[0].1, dest(10));
        assert_eq!(sent[1].1, dest(11));
        assert_eq!(sent[2].1, dest(12));
    }

    #[tokio::test]
    async fn test_broadcast_survives_mid_set_failure() {
        // Middle device unreachable; neighbours still get their datagrams
        let transport = MockTransport::failing_on([dest(11)]);
        let dispatcher = RelayDispatcher::new(transport, registry(), 1337);

        dispatcher.broadcast_all("abc").await;

        let sent = dispatcher.transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].1, dest(10));
        assert_eq!(sent[1].1, dest(12));
    }

    #[tokio::test]
    async fn test_successful_send_updates_color_cache() {
        let dispatcher = RelayDispatcher::new(MockTransport::default(), registry(), 1337);

        assert_ok!(dispatcher.send_by_id("shelf", "00ff00", "").await);

        let snapshot = dispatcher.registry().snapshot().await;
        assert_eq!(snapshot[1].color, "00ff00");
    }

    #[tokio::test]
    async fn test_failed_send_leaves_color_cache_untouched() {
        let transport = MockTransport::failing_on([dest(10)]);
        let dispatcher = RelayDispatcher::new(transport, registry(), 1337);

        let _ = dispatcher.send_by_id("desk", "00ff00", "").await;

        let snapshot = dispatcher.registry().snapshot().await;
        assert_eq!(snapshot[0].color, "fff");
    }

    #[tokio::test]
    async fn test_dispatch_policy() {
        let dispatcher = RelayDispatcher::new(MockTransport::default(), registry(), 1337);

        dispatcher.dispatch(Command::unicast("desk", "zoneA", "fff")).await;
        assert_eq!(dispatcher.transport.sent().len(), 1);

        dispatcher.dispatch(Command::broadcast("abc")).await;
        assert_eq!(dispatcher.transport.sent().len(), 4);
    }

    #[tokio::test]
    async fn test_dispatch_drops_unknown_target_silently() {
        let dispatcher = RelayDispatcher::new(MockTransport::default(), registry(), 1337);

        // Must not panic or send; the error is logged and the command dropped
        dispatcher.dispatch(Command::unicast("attic", "", "fff")).await;
        assert!(dispatcher.transport.sent().is_empty());
    }
}
