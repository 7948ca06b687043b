//! Syntactic acceptance of host identifiers and construction of host batches.

use crate::errors::HostFlowError;
use std::net::IpAddr;
use tracing::warn;

/// Accept an IP literal (v4 or v6) or a non-empty name made of `[A-Za-z0-9.-]`
pub fn validate(host: &str) -> bool {
    if host.parse::<IpAddr>().is_ok() {
        return true;
    }
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

/// Like [`validate`], but reports the rejected identifier
pub fn ensure_valid(host: &str) -> Result<(), HostFlowError> {
    if validate(host) {
        Ok(())
    } else {
        Err(HostFlowError::InvalidHost(host.to_string()))
    }
}

/// An ordered set of validated hosts ready for submission.
///
/// Hosts keep their input order; entries that fail validation are kept
/// aside in [`HostBatch::rejected`] and are never probed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostBatch {
    hosts: Vec<String>,
    rejected: Vec<String>,
}

impl HostBatch {
    /// Build a batch from newline separated text, such as a pasted list or a hosts file
    pub fn from_lines(text: &str) -> Self {
        Self::from_hosts(text.lines())
    }

    pub fn from_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut batch = Self::default();
        for raw in hosts {
            let host = raw.as_ref().trim();
            if host.is_empty() {
                continue;
            }
            match ensure_valid(host) {
                Ok(()) => batch.hosts.push(host.to_string()),
                Err(e) => {
                    warn!("Skipping host: {e}");
                    batch.rejected.push(host.to_string());
                }
            }
        }
        batch
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn into_hosts(self) -> Vec<String> {
        self.hosts
    }
}
