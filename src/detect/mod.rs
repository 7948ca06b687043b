use crate::config::{PingMethod, ScanConfig};
use crate::model::{DnsResolution, PingReply};
use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;

// Submodule declarations
pub mod hostname;
pub mod os;
pub mod ping;
pub mod port;

use ping::{IcmpPing, PingStrategy, SystemPing};

/// Network probes needed to reconcile one host.
///
/// Implementations never fail outward: a probe that cannot be completed
/// reports no reply, no resolution or a closed port.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Send exactly one echo request to `host`
    async fn ping(&self, host: &str) -> PingReply;

    /// Forward lookup of `host`, then reverse lookup of the resulting address
    async fn resolve_dns(&self, host: &str) -> DnsResolution;

    /// Attempt a TCP connection; `None` is treated as unreachable
    async fn check_port(&self, ip: Option<IpAddr>, port: u16) -> bool;
}

/// Prober backed by the real network stack
pub struct NetworkProber {
    ping: Box<dyn PingStrategy>,
    port_timeout: Duration,
}

impl NetworkProber {
    pub fn new(ping: Box<dyn PingStrategy>, port_timeout: Duration) -> Self {
        Self { ping, port_timeout }
    }

    /// Pick the ping strategy named in the configuration
    pub fn from_config(config: &ScanConfig) -> Self {
        let ping: Box<dyn PingStrategy> = match config.ping_method {
            PingMethod::System => Box::new(SystemPing::new(config.ping_timeout())),
            PingMethod::Icmp => Box::new(IcmpPing::new(config.ping_timeout())),
        };
        Self::new(ping, config.port_timeout())
    }

    pub fn ping_strategy(&self) -> &'static str {
        self.ping.name()
    }
}

#[async_trait]
impl Prober for NetworkProber {
    async fn ping(&self, host: &str) -> PingReply {
        self.ping.ping(host).await
    }

    async fn resolve_dns(&self, host: &str) -> DnsResolution {
        hostname::resolve_dns(host).await
    }

    async fn check_port(&self, ip: Option<IpAddr>, port: u16) -> bool {
        port::check_port(ip, port, self.port_timeout).await
    }
}
