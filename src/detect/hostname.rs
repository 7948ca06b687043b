use crate::model::DnsResolution;
use dns_lookup::{lookup_addr, lookup_host};
use std::net::IpAddr;
use tracing::debug;

/// Resolve `host` forward, then resolve the resulting address back to a name.
///
/// The reverse lookup only runs when the forward lookup produced an address,
/// and its failure leaves the address in place.
pub async fn resolve_dns(host: &str) -> DnsResolution {
    let ip = forward_lookup(host).await;
    let reverse_name = match ip {
        Some(ip) => reverse_lookup(ip).await,
        None => None,
    };
    debug!(host, ?ip, ?reverse_name, "dns resolution");
    DnsResolution { ip, reverse_name }
}

/// First address of `host`, preferring IPv4 when both families resolve
pub async fn forward_lookup(host: &str) -> Option<IpAddr> {
    let owned = host.to_string();
    let addrs = tokio::task::spawn_blocking(move || lookup_host(&owned))
        .await
        .ok()?
        .map_err(|e| debug!(host, "forward lookup failed: {e}"))
        .ok()?;
    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}

/// PTR name of `ip`. The resolver echoes the numeric address back when no
/// PTR record exists; that counts as no name.
pub async fn reverse_lookup(ip: IpAddr) -> Option<String> {
    let name = tokio::task::spawn_blocking(move || lookup_addr(&ip))
        .await
        .ok()?
        .map_err(|e| debug!(%ip, "reverse lookup failed: {e}"))
        .ok()?;
    match name.parse::<IpAddr>() {
        Ok(_) => None,
        Err(_) if name.is_empty() => None,
        Err(_) => Some(name),
    }
}
