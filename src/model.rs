use crate::constants::NOT_FOUND;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// Everything learned about one submitted host.
///
/// Built once by the reconciliation engine after all of its probes have
/// completed and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostRecord {
    /// Identifier as submitted
    pub host: String,
    /// Suffix character used to derive the renamed identity
    pub alternate_suffix: char,
    /// Whichever of `host` or its renamed form answered the ping
    pub pinging_host: Option<String>,
    pub reachable_ip: Option<IpAddr>,
    pub reverse_dns_name: Option<String>,
    pub ttl: Option<u8>,
    pub os_family: OsFamily,
    pub ssh_open: bool,
    pub rdp_open: bool,
    pub inventory: InventoryEntry,
}

impl HostRecord {
    /// Record for a host about which nothing could be determined
    pub fn unresolved(host: &str, alternate_suffix: char, inventory: InventoryEntry) -> Self {
        Self {
            host: host.to_string(),
            alternate_suffix,
            pinging_host: None,
            reachable_ip: None,
            reverse_dns_name: None,
            ttl: None,
            os_family: OsFamily::Unknown,
            ssh_open: false,
            rdp_open: false,
            inventory,
        }
    }

    pub fn alternate_host(&self) -> String {
        alternate_host(&self.host, self.alternate_suffix)
    }

    /// True when either identity answered the ping
    pub fn responded(&self) -> bool {
        self.pinging_host.is_some()
    }
}

/// Derive the renamed identity of a host
pub fn alternate_host(host: &str, suffix: char) -> String {
    let mut alternate = String::with_capacity(host.len() + suffix.len_utf8());
    alternate.push_str(host);
    alternate.push(suffix);
    alternate
}

/// Coarse operating system family inferred from the reply TTL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Linux,
    Windows,
    #[default]
    Unknown,
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            OsFamily::Linux => "Linux",
            OsFamily::Windows => "Windows",
            OsFamily::Unknown => "Unknown",
        })
    }
}

/// Outcome of one ping attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PingReply {
    pub responded: bool,
    pub ttl: Option<u8>,
}

impl PingReply {
    pub const fn no_reply() -> Self {
        Self {
            responded: false,
            ttl: None,
        }
    }

    pub const fn reply(ttl: Option<u8>) -> Self {
        Self {
            responded: true,
            ttl,
        }
    }
}

/// Outcome of a forward lookup followed by a reverse lookup of its result
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DnsResolution {
    pub ip: Option<IpAddr>,
    pub reverse_name: Option<String>,
}

/// Static location metadata for a host; `None` marks a field the inventory lacks
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub location: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub office: Option<String>,
    pub obsolete: Option<String>,
    pub note: Option<String>,
}

impl InventoryEntry {
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn is_not_found(&self) -> bool {
        *self == Self::default()
    }

    /// Field values in column order, with the sentinel substituted for gaps
    pub fn display_fields(&self) -> [&str; 6] {
        [
            &self.location,
            &self.building,
            &self.floor,
            &self.office,
            &self.obsolete,
            &self.note,
        ]
        .map(|field| field.as_deref().unwrap_or(NOT_FOUND))
    }
}

/// Category a completed record falls into.
///
/// Variants are ordered from best to worst outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    /// Name and OS agree and every expected remote-access port is open
    Reachable,
    /// Name and OS agree but a remote-access port is closed
    Restricted,
    /// Reverse DNS points at a different name
    DnsMismatch,
    UnknownError,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Classification::Reachable,
        Classification::Restricted,
        Classification::DnsMismatch,
        Classification::UnknownError,
    ];
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Classification::Reachable => "reachable",
            Classification::Restricted => "restricted",
            Classification::DnsMismatch => "dns mismatch",
            Classification::UnknownError => "unknown error",
        })
    }
}
