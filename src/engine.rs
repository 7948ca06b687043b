use crate::config::{RemoteAccessPorts, ScanConfig};
use crate::detect::os::OsClassifier;
use crate::detect::Prober;
use crate::inventory::Inventory;
use crate::model::{alternate_host, HostRecord, PingReply};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Reconciles one host: decides which of its identities is live, gathers
/// DNS, port and TTL evidence for it and merges inventory metadata.
pub struct ReconciliationEngine {
    prober: Arc<dyn Prober>,
    inventory: Arc<Inventory>,
    os_classifier: OsClassifier,
    ports: RemoteAccessPorts,
    alternate_suffix: char,
}

impl ReconciliationEngine {
    pub fn new(prober: Arc<dyn Prober>, inventory: Arc<Inventory>, config: &ScanConfig) -> Self {
        Self {
            prober,
            inventory,
            os_classifier: OsClassifier::new(config.ttl_ranges),
            ports: config.remote_access_ports,
            alternate_suffix: config.alternate_suffix,
        }
    }

    pub fn alternate_suffix(&self) -> char {
        self.alternate_suffix
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Probe `host` to completion and build its record
    pub async fn analyze(&self, host: &str) -> HostRecord {
        self.analyze_with_cancel(host, &CancellationToken::new()).await
    }

    /// Probe `host`, abandoning outstanding probes once `cancel` fires.
    ///
    /// An abandoned probe contributes its "nothing learned" value, so a
    /// record is still produced.
    pub async fn analyze_with_cancel(&self, host: &str, cancel: &CancellationToken) -> HostRecord {
        let alternate = alternate_host(host, self.alternate_suffix);

        // Both identities are pinged regardless of the first outcome
        let original_reply = guarded(cancel, self.prober.ping(host)).await;
        let alternate_reply = guarded(cancel, self.prober.ping(&alternate)).await;

        let (pinging_host, live_reply) = select_pinging_host(host, original_reply, alternate, alternate_reply);

        // Reachability and resolvability are independent: an unreachable host is still resolved
        let dns_target = pinging_host.as_deref().unwrap_or(host);
        let dns = guarded(cancel, self.prober.resolve_dns(dns_target)).await;

        let ssh_open = guarded(cancel, self.prober.check_port(dns.ip, self.ports.ssh)).await;
        let rdp_open = guarded(cancel, self.prober.check_port(dns.ip, self.ports.rdp)).await;

        let ttl = live_reply.and_then(|reply| reply.ttl);
        let os_family = match live_reply {
            Some(_) => self.os_classifier.classify(ttl),
            None => Default::default(),
        };

        let record = HostRecord {
            host: host.to_string(),
            alternate_suffix: self.alternate_suffix,
            pinging_host,
            reachable_ip: dns.ip,
            reverse_dns_name: dns.reverse_name,
            ttl,
            os_family,
            ssh_open,
            rdp_open,
            inventory: self.inventory.lookup(host),
        };
        debug!(
            host,
            pinging = ?record.pinging_host,
            ip = ?record.reachable_ip,
            os = %record.os_family,
            ssh = record.ssh_open,
            rdp = record.rdp_open,
            "host reconciled"
        );
        record
    }
}

/// The original identity wins whenever it answered, even if the renamed one did too
fn select_pinging_host(
    original: &str,
    original_reply: PingReply,
    alternate: String,
    alternate_reply: PingReply,
) -> (Option<String>, Option<PingReply>) {
    if original_reply.responded {
        (Some(original.to_string()), Some(original_reply))
    } else if alternate_reply.responded {
        (Some(alternate), Some(alternate_reply))
    } else {
        (None, None)
    }
}

async fn guarded<T: Default>(cancel: &CancellationToken, probe: impl Future<Output = T>) -> T {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => T::default(),
        value = probe => value,
    }
}
