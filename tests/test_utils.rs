use async_trait::async_trait;
use hostflow::config::ScanConfig;
use hostflow::model::{DnsResolution, HostRecord, InventoryEntry, OsFamily, PingReply};
use hostflow::{Inventory, Prober, ReconciliationEngine};
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Prober double answering from fixed tables, with instrumentation for
/// call order and concurrency
#[derive(Default)]
#[allow(dead_code)]
pub struct ScriptedProber {
    pub pings: HashMap<String, PingReply>,
    pub dns: HashMap<String, DnsResolution>,
    pub open_ports: HashSet<(IpAddr, u16)>,
    pub delay: Option<Duration>,
    pub panic_on: Option<String>,
    pub calls: Mutex<Vec<String>>,
    active: AtomicUsize,
    peak: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ping(mut self, host: &str, ttl: Option<u8>) -> Self {
        self.pings.insert(host.to_string(), PingReply::reply(ttl));
        self
    }

    pub fn with_dns(mut self, host: &str, ip: &str, reverse: Option<&str>) -> Self {
        self.dns.insert(
            host.to_string(),
            DnsResolution {
                ip: Some(ip.parse().unwrap()),
                reverse_name: reverse.map(str::to_string),
            },
        );
        self
    }

    pub fn with_open_port(mut self, ip: &str, port: u16) -> Self {
        self.open_ports.insert((ip.parse().unwrap(), port));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn panicking_on(mut self, host: &str) -> Self {
        self.panic_on = Some(host.to_string());
        self
    }

    /// Highest number of hosts observed inside a ping at the same time
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn ping(&self, host: &str) -> PingReply {
        if self.panic_on.as_deref() == Some(host) {
            panic!("scripted failure for {host}");
        }
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.record(format!("ping {host}"));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.pings.get(host).copied().unwrap_or_default()
    }

    async fn resolve_dns(&self, host: &str) -> DnsResolution {
        self.record(format!("dns {host}"));
        self.dns.get(host).cloned().unwrap_or_default()
    }

    async fn check_port(&self, ip: Option<IpAddr>, port: u16) -> bool {
        match ip {
            Some(ip) => {
                self.record(format!("port {ip}:{port}"));
                self.open_ports.contains(&(ip, port))
            }
            None => false,
        }
    }
}

#[allow(dead_code)]
pub fn create_test_engine(prober: ScriptedProber, inventory: Inventory) -> (Arc<ScriptedProber>, ReconciliationEngine) {
    let prober = Arc::new(prober);
    let engine = ReconciliationEngine::new(prober.clone(), Arc::new(inventory), &ScanConfig::default());
    (prober, engine)
}

/// A record as the engine would build it for a host that pinged under its own name
#[allow(dead_code)]
pub fn create_test_record(host: &str, os_family: OsFamily, reverse: Option<&str>) -> HostRecord {
    HostRecord {
        host: host.to_string(),
        alternate_suffix: 'x',
        pinging_host: Some(host.to_string()),
        reachable_ip: Some("10.0.0.1".parse().unwrap()),
        reverse_dns_name: reverse.map(str::to_string),
        ttl: None,
        os_family,
        ssh_open: false,
        rdp_open: false,
        inventory: InventoryEntry::not_found(),
    }
}
