use crate::config::TtlRanges;
use crate::model::OsFamily;

/// Infers an operating system family from the TTL of a ping reply.
///
/// This is a heuristic only: every router hop decrements the TTL, so NAT,
/// VPN and multi-hop paths can push a host into the wrong range. Nothing
/// downstream should treat the result as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OsClassifier {
    ranges: TtlRanges,
}

impl OsClassifier {
    pub fn new(ranges: TtlRanges) -> Self {
        Self { ranges }
    }

    pub fn classify(&self, ttl: Option<u8>) -> OsFamily {
        match ttl {
            Some(ttl) if self.ranges.linux.contains(ttl) => OsFamily::Linux,
            Some(ttl) if self.ranges.windows.contains(ttl) => OsFamily::Windows,
            _ => OsFamily::Unknown,
        }
    }
}
