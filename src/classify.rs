//! Decision tree turning a completed [`HostRecord`] into a [`Classification`].

use crate::config::DomainSuffixes;
use crate::model::{Classification, HostRecord, OsFamily};
use serde::Serialize;

/// Lowercase `name` and strip one trailing `suffix` (compared case-insensitively)
pub fn normalize(name: &str, suffix: &str) -> String {
    let name = name.to_lowercase();
    let suffix = suffix.to_lowercase();
    match name.strip_suffix(suffix.as_str()) {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

/// Pure classifier over completed records
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    suffixes: DomainSuffixes,
}

/// How the reverse DNS name relates to the pinging host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NameMatch {
    windows_form: bool,
    linux_form: bool,
}

impl Classifier {
    pub fn new(suffixes: DomainSuffixes) -> Self {
        Self { suffixes }
    }

    /// Evaluate the rules in priority order; the first match wins
    pub fn classify(&self, record: &HostRecord) -> Classification {
        let names = self.name_match(record);
        let windows_named = record.os_family == OsFamily::Windows && names.windows_form;
        // Linux hosts may be registered under either the renamed or the plain record
        let linux_named =
            record.os_family == OsFamily::Linux && (names.linux_form || names.windows_form);

        if windows_named && record.rdp_open {
            Classification::Reachable
        } else if linux_named && record.rdp_open && record.ssh_open {
            Classification::Reachable
        } else if windows_named {
            Classification::Restricted
        } else if linux_named {
            Classification::Restricted
        } else if record.pinging_host.is_none() {
            // Nothing answered, so there is no live name to compare against
            Classification::UnknownError
        } else if record.reverse_dns_name.is_some() && !names.windows_form && !names.linux_form {
            Classification::DnsMismatch
        } else {
            Classification::UnknownError
        }
    }

    fn name_match(&self, record: &HostRecord) -> NameMatch {
        let (Some(reverse), Some(pinging)) = (&record.reverse_dns_name, &record.pinging_host) else {
            return NameMatch {
                windows_form: false,
                linux_form: false,
            };
        };
        let pinging = pinging.to_lowercase();
        NameMatch {
            windows_form: normalize(reverse, &self.suffixes.windows) == pinging,
            linux_form: normalize(reverse, &self.suffixes.linux) == pinging,
        }
    }

    /// Reorder records best outcome first, keeping input order within a category
    pub fn sort_by_category(&self, records: &mut [HostRecord]) {
        records.sort_by_cached_key(|record| self.classify(record));
    }
}

/// Number of records in each category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub reachable: usize,
    pub restricted: usize,
    pub dns_mismatch: usize,
    pub unknown_error: usize,
}

impl BatchSummary {
    pub fn tally<'a, I>(records: I, classifier: &Classifier) -> Self
    where
        I: IntoIterator<Item = &'a HostRecord>,
    {
        let mut summary = Self::default();
        for record in records {
            summary.add(classifier.classify(record));
        }
        summary
    }

    pub fn add(&mut self, classification: Classification) {
        *self.count_mut(classification) += 1;
    }

    pub fn count(&self, classification: Classification) -> usize {
        match classification {
            Classification::Reachable => self.reachable,
            Classification::Restricted => self.restricted,
            Classification::DnsMismatch => self.dns_mismatch,
            Classification::UnknownError => self.unknown_error,
        }
    }

    fn count_mut(&mut self, classification: Classification) -> &mut usize {
        match classification {
            Classification::Reachable => &mut self.reachable,
            Classification::Restricted => &mut self.restricted,
            Classification::DnsMismatch => &mut self.dns_mismatch,
            Classification::UnknownError => &mut self.unknown_error,
        }
    }

    pub fn total(&self) -> usize {
        self.reachable + self.restricted + self.dns_mismatch + self.unknown_error
    }
}
