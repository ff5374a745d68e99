//! RGB relay server example
//!
//! Run with: cargo run --example relay_server [BIND_ADDR]
//!
//! Examples:
//!   cargo run --example relay_server                  # binds to 0.0.0.0:1337
//!   cargo run --example relay_server localhost        # binds to 127.0.0.1:1337
//!   cargo run --example relay_server 0.0.0.0:1340     # binds to 0.0.0.0:1340
//!
//! Devices are read from RGBCAST_DEVICES as comma-separated `id=ip` pairs,
//! e.g. `RGBCAST_DEVICES="desk=192.168.1.20,shelf=192.168.1.21"`.
//!
//! ## Driving it
//!
//! Broadcast a color to every device:
//!   echo -n "ff00ff" | nc -u -w0 localhost 1337
//!
//! Set one device (optionally a zone):
//!   echo -n "desk:00ff00" | nc -u -w0 localhost 1337
//!   echo -n "desk.strip2:00ff00" | nc -u -w0 localhost 1337

use std::net::SocketAddr;
use std::sync::Arc;

use rgbcast::{DeviceRegistry, DiscoveryService, RelayConfig, RelayServer};

/// Parse bind address from command line argument.
///
/// Accepts formats:
/// - "localhost" -> 127.0.0.1:1337
/// - "127.0.0.1" -> 127.0.0.1:1337
/// - "0.0.0.0:1340" -> 0.0.0.0:1340
fn parse_bind_addr(arg: &str) -> Result<SocketAddr, String> {
    const DEFAULT_PORT: u16 = 1337;

    let normalized = arg.replace("localhost", "127.0.0.1");

    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }

    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    Err(format!(
        "Invalid bind address: '{}'. Expected format: IP:PORT or IP or 'localhost'",
        arg
    ))
}

/// Parse `id=ip` pairs from the RGBCAST_DEVICES environment variable.
fn parse_devices(raw: &str) -> Result<Vec<(String, String)>, String> {
    raw.split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(id, ip)| (id.trim().to_string(), ip.trim().to_string()))
                .ok_or_else(|| format!("Invalid device entry: '{}'. Expected id=ip", entry))
        })
        .collect()
}

fn print_usage() {
    eprintln!("Usage: relay_server [BIND_ADDR]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  BIND_ADDR    Command listener address (default: 0.0.0.0:1337)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RGBCAST_DEVICES    Comma-separated id=ip pairs");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  relay_server                  # binds to 0.0.0.0:1337");
    eprintln!("  relay_server localhost        # binds to 127.0.0.1:1337");
    eprintln!("  relay_server 0.0.0.0:1340     # binds to 0.0.0.0:1340");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let bind_addr = match args.get(1) {
        Some(addr_str) => match parse_bind_addr(addr_str) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        },
        None => "0.0.0.0:1337".parse().unwrap(),
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rgbcast=debug".parse()?)
                .add_directive("relay_server=debug".parse()?),
        )
        .init();

    let device_spec = std::env::var("RGBCAST_DEVICES")
        .unwrap_or_else(|_| "desk=192.168.1.20,shelf=192.168.1.21".to_string());
    let registry = Arc::new(DeviceRegistry::new(parse_devices(&device_spec)?)?);

    let config = RelayConfig::default().bind(bind_addr);

    println!("Starting rgbcast relay on {}", config.bind_addr);
    println!();
    println!("=== Devices ===");
    for device in registry.devices() {
        println!("  {}", device);
    }
    println!();
    println!("=== Send a command ===");
    println!("broadcast: echo -n \"ff00ff\" | nc -u -w0 localhost 1337");
    println!("targeted:  echo -n \"desk:00ff00\" | nc -u -w0 localhost 1337");
    println!();

    let server = RelayServer::new(config.clone(), registry).await?;
    let _push = server.spawn_push_ingress();

    // Discovery runs alongside the command listener; its responses are
    // logged but never merged into the registry.
    let discovery = DiscoveryService::bind(&config).await?;
    tokio::spawn(discovery.run());

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                eprintln!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nShutting down...");
        }
    }

    Ok(())
}
