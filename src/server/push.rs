//! Push-channel command ingress
//!
//! The web-facing push transport itself is out of scope; only its payload
//! shape matters here. The transport hands `{device, color}` events into
//! an mpsc channel and this loop converts each one to the common command
//! shape and dispatches it. A push event always targets one device; there
//! is no broadcast form on this path.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::protocol::decode_push;
use crate::relay::{RelayDispatcher, Transport};

/// Structured color event received from the push channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEvent {
    /// Dot-joined composite target, `<id>[.<zone...>]`
    pub device: String,
    /// Opaque color token, forwarded verbatim
    pub color: String,
}

impl PushEvent {
    /// Create a new push event
    pub fn new(device: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            color: color.into(),
        }
    }
}

/// Consume push events until the channel closes
///
/// Malformed events are logged and dropped; the loop never terminates on
/// a per-event failure.
pub async fn push_ingress_loop<T: Transport>(
    dispatcher: Arc<RelayDispatcher<T>>,
    mut events: mpsc::Receiver<PushEvent>,
) {
    tracing::info!("push ingress started");

    while let Some(event) = events.recv().await {
        match decode_push(&event.device, &event.color) {
            Ok(command) => dispatcher.dispatch(command).await,
            Err(e) => {
                tracing::warn!(
                    device = %event.device,
                    error = %e,
                    "malformed push event dropped"
                );
            }
        }
    }

    tracing::info!("push ingress stopped, channel closed");
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;
    use std::time::Duration;

    use tokio::net::UdpSocket;
    use tokio::time::timeout;

    use super::*;
    use crate::registry::DeviceRegistry;
    use crate::relay::UdpTransport;

    #[tokio::test]
    async fn test_push_event_relays_to_controller() {
        let controller = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = controller.local_addr().unwrap().port();

        let registry = Arc::new(DeviceRegistry::new([("desk", "127.0.0.1")]).unwrap());
        let transport = UdpTransport::bind_ephemeral().await.unwrap();
        let dispatcher = Arc::new(RelayDispatcher::new(transport, registry, port));

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(push_ingress_loop(dispatcher, rx));

        tx.send(PushEvent::new("desk.zoneA", "ff00ff")).await.unwrap();

        let mut buf = [0u8; 32];
        let (len, _) = timeout(Duration::from_secs(1), controller.recv_from(&mut buf))
            .await
            .expect("timed out waiting for relayed push command")
            .unwrap();
        assert_eq!(&buf[..len], b"ff00ff\n");

        // Dropping the sender shuts the loop down
        drop(tx);
        timeout(Duration::from_secs(1), handle)
            .await
            .expect("ingress loop should stop when channel closes")
            .unwrap();
    }

    #[tokio::test]
    async fn test_malformed_push_event_is_dropped() {
        let controller = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = controller.local_addr().unwrap().port();

        let registry = Arc::new(DeviceRegistry::new([("desk", "127.0.0.1")]).unwrap());
        let transport = UdpTransport::bind_ephemeral().await.unwrap();
        let dispatcher = Arc::new(RelayDispatcher::new(transport, registry, port));

        let (tx, rx) = mpsc::channel(8);
        tokio::spawn(push_ingress_loop(dispatcher, rx));

        tx.send(PushEvent::new("", "fff")).await.unwrap();
        tx.send(PushEvent::new("desk", "")).await.unwrap();

        let mut buf = [0u8; 16];
        let outcome = timeout(Duration::from_millis(200), controller.recv_from(&mut buf)).await;
        assert!(outcome.is_err(), "no datagram should have been sent");
    }
}
