use crate::constants::*;
use crate::errors::HostFlowError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration settings for a reconnaissance batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Largest number of hosts accepted in one submission
    pub max_batch_size: usize,

    /// Maximum number of hosts probed at the same time
    pub max_concurrency: usize,

    /// Timeout in milliseconds for a single ping attempt
    pub ping_timeout_ms: u64,

    /// Timeout in milliseconds for TCP connection attempts
    pub port_timeout_ms: u64,

    /// Ports probed to assess remote manageability
    pub remote_access_ports: RemoteAccessPorts,

    /// TTL ranges used for the OS family heuristic
    pub ttl_ranges: TtlRanges,

    /// Reverse DNS suffixes stripped before name comparison
    pub domain_suffixes: DomainSuffixes,

    /// Character appended to a host to derive its renamed identity
    pub alternate_suffix: char,

    /// Which ping implementation the prober uses
    pub ping_method: PingMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteAccessPorts {
    pub ssh: u16,
    pub rdp: u16,
}

/// Inclusive TTL interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlRange {
    pub min: u8,
    pub max: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtlRanges {
    pub linux: TtlRange,
    pub windows: TtlRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainSuffixes {
    pub windows: String,
    pub linux: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PingMethod {
    /// Spawn the operating system's ping utility
    #[default]
    System,
    /// Send the echo request from the process through an ICMP socket
    Icmp,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            ping_timeout_ms: DEFAULT_PING_TIMEOUT_MS,
            port_timeout_ms: DEFAULT_PORT_TIMEOUT_MS,
            remote_access_ports: RemoteAccessPorts::default(),
            ttl_ranges: TtlRanges::default(),
            domain_suffixes: DomainSuffixes::default(),
            alternate_suffix: ALTERNATE_SUFFIX,
            ping_method: PingMethod::default(),
        }
    }
}

impl Default for RemoteAccessPorts {
    fn default() -> Self {
        Self {
            ssh: SSH_PORT,
            rdp: RDP_PORT,
        }
    }
}

impl Default for TtlRanges {
    fn default() -> Self {
        Self {
            linux: TtlRange::new(LINUX_TTL_MIN, LINUX_TTL_MAX),
            windows: TtlRange::new(WINDOWS_TTL_MIN, WINDOWS_TTL_MAX),
        }
    }
}

impl Default for DomainSuffixes {
    fn default() -> Self {
        Self {
            windows: WINDOWS_DOMAIN_SUFFIX.to_string(),
            linux: LINUX_DOMAIN_SUFFIX.to_string(),
        }
    }
}

impl TtlRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, ttl: u8) -> bool {
        (self.min..=self.max).contains(&ttl)
    }

    fn overlaps(&self, other: &TtlRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl ScanConfig {
    /// Load a configuration from a JSON file; absent keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, HostFlowError> {
        let raw = std::fs::read_to_string(path)?;
        let config: ScanConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn ping_timeout(&self) -> Duration {
        Duration::from_millis(self.ping_timeout_ms)
    }

    pub fn port_timeout(&self) -> Duration {
        Duration::from_millis(self.port_timeout_ms)
    }

    /// Set the maximum number of hosts probed at once
    pub fn set_concurrency(&mut self, jobs: usize) {
        self.max_concurrency = jobs.max(1);
    }

    /// Reject settings the scheduler cannot run with
    pub fn validate(&self) -> Result<(), HostFlowError> {
        if self.max_batch_size == 0 {
            return Err(HostFlowError::Config("max_batch_size must be at least 1".into()));
        }
        if self.max_concurrency == 0 {
            return Err(HostFlowError::Config("max_concurrency must be at least 1".into()));
        }
        if self.ping_timeout_ms == 0 || self.port_timeout_ms == 0 {
            return Err(HostFlowError::Config("timeouts must be non-zero".into()));
        }

        let TtlRanges { linux, windows } = self.ttl_ranges;
        for (name, range) in [("linux", linux), ("windows", windows)] {
            if range.min > range.max {
                return Err(HostFlowError::Config(format!(
                    "{name} TTL range is empty ({}..={})",
                    range.min, range.max
                )));
            }
        }
        if linux.overlaps(&windows) {
            return Err(HostFlowError::Config("linux and windows TTL ranges overlap".into()));
        }
        Ok(())
    }
}
