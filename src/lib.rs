//! HostFlow - concurrent host reconnaissance
//!
//! Given a batch of host identifiers this library determines, for each host:
//! - whether it (or its suffix-renamed identity) answers a ping
//! - its forward and reverse DNS names
//! - whether the SSH and RDP ports accept connections
//! - a best-effort operating system family from the reply TTL
//!
//! and merges static inventory metadata before classifying the result.

pub mod classify;
pub mod config;
pub mod constants;
pub mod detect;
pub mod engine;
pub mod errors;
pub mod inventory;
pub mod model;
pub mod scheduler;
pub mod table;
pub mod validate;

// Re-export commonly used types for convenience
pub use classify::{BatchSummary, Classifier};
pub use config::ScanConfig;
pub use detect::os::OsClassifier;
pub use detect::{NetworkProber, Prober};
pub use engine::ReconciliationEngine;
pub use errors::HostFlowError;
pub use inventory::Inventory;
pub use model::{Classification, HostRecord, InventoryEntry, OsFamily};
pub use scheduler::{BatchRun, Scheduler};
pub use validate::HostBatch;
