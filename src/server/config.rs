//! Relay configuration

use std::net::{Ipv4Addr, SocketAddr};

/// Relay configuration options
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Address the UDP command listener binds to
    pub bind_addr: SocketAddr,

    /// Destination port controllers listen on. The original deployment
    /// shares this port number with the command ingress by convention.
    pub controller_port: u16,

    /// Source address for the long-lived outbound socket (port 0 = OS pick)
    pub outbound_addr: SocketAddr,

    /// Destination address for the discovery hello broadcast
    pub discovery_addr: Ipv4Addr,

    /// Port the discovery hello broadcast is sent to
    pub discovery_request_port: u16,

    /// Port the discovery response listener binds to
    pub discovery_response_port: u16,

    /// Fixed payload of the discovery hello broadcast
    pub discovery_payload: String,

    /// Receive buffer size for inbound datagrams
    pub recv_buffer_size: usize,

    /// Capacity of the push-channel event queue
    pub push_queue_depth: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 1337)),
            controller_port: 1337,
            outbound_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            discovery_addr: Ipv4Addr::BROADCAST,
            discovery_request_port: 1341,
            discovery_response_port: 1340,
            discovery_payload: "hello".to_string(),
            recv_buffer_size: 2048,
            push_queue_depth: 256,
        }
    }
}

impl RelayConfig {
    /// Create a new config with a custom command listener address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Set the command listener address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the controller destination port
    pub fn controller_port(mut self, port: u16) -> Self {
        self.controller_port = port;
        self
    }

    /// Set the discovery broadcast destination address
    pub fn discovery_addr(mut self, addr: Ipv4Addr) -> Self {
        self.discovery_addr = addr;
        self
    }

    /// Set the discovery request port
    pub fn discovery_request_port(mut self, port: u16) -> Self {
        self.discovery_request_port = port;
        self
    }

    /// Set the discovery response port
    pub fn discovery_response_port(mut self, port: u16) -> Self {
        self.discovery_response_port = port;
        self
    }

    /// Set the discovery hello payload
    pub fn discovery_payload(mut self, payload: impl Into<String>) -> Self {
        self.discovery_payload = payload.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();

        assert_eq!(config.bind_addr.port(), 1337);
        assert_eq!(config.controller_port, 1337);
        assert_eq!(config.discovery_addr, Ipv4Addr::BROADCAST);
        assert_eq!(config.discovery_request_port, 1341);
        assert_eq!(config.discovery_response_port, 1340);
        assert_eq!(config.discovery_payload, "hello");
        assert_eq!(config.outbound_addr.port(), 0);
    }

    #[test]
    fn test_with_addr() {
        let addr: SocketAddr = "127.0.0.1:1338".parse().unwrap();
        let config = RelayConfig::with_addr(addr);

        assert_eq!(config.bind_addr, addr);
        // Everything else keeps defaults
        assert_eq!(config.controller_port, 1337);
    }

    #[test]
    fn test_builder_chaining() {
        let addr: SocketAddr = "127.0.0.1:9000".parse().unwrap();
        let config = RelayConfig::default()
            .bind(addr)
            .controller_port(9001)
            .discovery_addr(Ipv4Addr::LOCALHOST)
            .discovery_request_port(9002)
            .discovery_response_port(9003)
            .discovery_payload("ping");

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.controller_port, 9001);
        assert_eq!(config.discovery_addr, Ipv4Addr::LOCALHOST);
        assert_eq!(config.discovery_request_port, 9002);
        assert_eq!(config.discovery_response_port, 9003);
        assert_eq!(config.discovery_payload, "ping");
    }
}
