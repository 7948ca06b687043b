//! Ping strategies.
//!
//! The prober only sees [`PingReply`]; how the echo is sent and how the TTL is
//! recovered stays inside the strategy.

use super::hostname::forward_lookup;
use crate::constants::ICMP_PAYLOAD;
use crate::model::PingReply;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Stdio;
use std::time::Duration;
use surge_ping::IcmpPacket;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Extra time granted to the ping process beyond its own reply timeout
const PROCESS_GRACE: Duration = Duration::from_millis(1500);

static TTL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:ttl|hlim)[=:]\s*(\d{1,3})\b").expect("valid TTL pattern"));

/// A way of sending a single echo request
#[async_trait]
pub trait PingStrategy: Send + Sync {
    async fn ping(&self, host: &str) -> PingReply;

    /// Return a human-readable name for this strategy
    fn name(&self) -> &'static str;
}

/// Pull the TTL out of the textual output of a ping utility
pub fn extract_ttl(output: &str) -> Option<u8> {
    TTL_PATTERN
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Interpret the output of a ping utility that exited successfully.
///
/// Windows `ping` also exits with status 0 when a gateway answers
/// "Destination host unreachable", so there an echo reply only counts when
/// the output carries a reply TTL.
pub fn reply_from_output(output: &str, require_ttl: bool) -> PingReply {
    match extract_ttl(output) {
        None if require_ttl => PingReply::no_reply(),
        ttl => PingReply::reply(ttl),
    }
}

/// Ping through the operating system's `ping` utility
pub struct SystemPing {
    timeout: Duration,
}

impl SystemPing {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn command(&self, host: &str) -> Command {
        let mut cmd = Command::new("ping");
        if cfg!(windows) {
            cmd.args(["-n", "1", "-w", &self.timeout.as_millis().to_string()]);
        } else {
            let secs = self.timeout.as_secs_f64().ceil().max(1.0) as u64;
            let wait_flag = if cfg!(target_os = "linux") { "-W" } else { "-t" };
            cmd.args(["-c", "1", wait_flag, &secs.to_string()]);
        }
        cmd.arg(host)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl PingStrategy for SystemPing {
    fn name(&self) -> &'static str {
        "system ping utility"
    }

    async fn ping(&self, host: &str) -> PingReply {
        // A leading dash would be parsed as an option by the utility
        if host.starts_with('-') {
            warn!(host, "refusing to pass option-like host to ping");
            return PingReply::no_reply();
        }

        let output = match timeout(self.timeout + PROCESS_GRACE, self.command(host).output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!(host, "failed to run ping: {e}");
                return PingReply::no_reply();
            }
            Err(_elapsed) => {
                debug!(host, "ping process timed out");
                return PingReply::no_reply();
            }
        };

        if !output.status.success() {
            debug!(host, status = ?output.status, "no echo reply");
            return PingReply::no_reply();
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let reply = reply_from_output(&text, cfg!(windows));
        debug!(host, responded = reply.responded, ttl = ?reply.ttl, "ping finished");
        reply
    }
}

/// Ping from inside the process with an ICMP socket
pub struct IcmpPing {
    timeout: Duration,
}

impl IcmpPing {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl PingStrategy for IcmpPing {
    fn name(&self) -> &'static str {
        "ICMP echo socket"
    }

    async fn ping(&self, host: &str) -> PingReply {
        let Some(ip) = forward_lookup(host).await else {
            debug!(host, "cannot ping unresolvable host");
            return PingReply::no_reply();
        };

        match timeout(self.timeout, surge_ping::ping(ip, &ICMP_PAYLOAD)).await {
            Ok(Ok((IcmpPacket::V4(packet), rtt))) => {
                let ttl: Option<u8> = packet.get_ttl().into();
                debug!(host, %ip, ?ttl, ?rtt, "echo reply");
                PingReply::reply(ttl)
            }
            Ok(Ok((IcmpPacket::V6(_), rtt))) => {
                debug!(host, %ip, ?rtt, "echo reply without TTL");
                PingReply::reply(None)
            }
            Ok(Err(e)) => {
                debug!(host, %ip, "no echo reply: {e}");
                PingReply::no_reply()
            }
            Err(_elapsed) => {
                debug!(host, %ip, "echo timed out");
                PingReply::no_reply()
            }
        }
    }
}
