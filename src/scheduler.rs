//! Bounded fan-out of a host batch over the reconciliation engine.
//!
//! At most `max_concurrency` hosts are in flight at any instant; a permit is
//! taken before a unit of work is spawned and released when its record has
//! been handed to the result channel. Records arrive in completion order.

use crate::config::ScanConfig;
use crate::engine::ReconciliationEngine;
use crate::errors::HostFlowError;
use crate::model::HostRecord;
use crate::validate::HostBatch;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

pub struct Scheduler {
    engine: Arc<ReconciliationEngine>,
    max_batch_size: usize,
    max_concurrency: usize,
}

impl Scheduler {
    pub fn new(engine: Arc<ReconciliationEngine>, config: &ScanConfig) -> Self {
        Self {
            engine,
            max_batch_size: config.max_batch_size,
            max_concurrency: config.max_concurrency.max(1),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Start probing every host of `batch`.
    ///
    /// Oversized or empty batches are rejected before any probe runs. Must be
    /// called from within a Tokio runtime.
    pub fn submit(&self, batch: HostBatch) -> Result<BatchRun, HostFlowError> {
        if batch.is_empty() {
            return Err(HostFlowError::EmptyBatch);
        }
        if batch.len() > self.max_batch_size {
            return Err(HostFlowError::BatchSizeExceeded {
                submitted: batch.len(),
                max: self.max_batch_size,
            });
        }

        let hosts = batch.into_hosts();
        let total = hosts.len();
        let (tx, rx) = mpsc::channel(total.min(self.max_concurrency));
        let cancel = CancellationToken::new();

        info!(
            "Dispatching {} hosts with at most {} in flight",
            total, self.max_concurrency
        );
        tokio::spawn(dispatch(
            self.engine.clone(),
            hosts,
            Arc::new(Semaphore::new(self.max_concurrency)),
            tx,
            cancel.clone(),
        ));

        Ok(BatchRun {
            rx,
            total,
            received: 0,
            cancel,
        })
    }
}

async fn dispatch(
    engine: Arc<ReconciliationEngine>,
    hosts: Vec<String>,
    permits: Arc<Semaphore>,
    tx: mpsc::Sender<HostRecord>,
    cancel: CancellationToken,
) {
    for host in hosts {
        if tx.is_closed() {
            debug!("result receiver dropped, stopping dispatch");
            break;
        }
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            permit = permits.clone().acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_closed) => break,
            },
        };

        let engine = engine.clone();
        let tx = tx.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let outcome = AssertUnwindSafe(engine.analyze_with_cancel(&host, &cancel))
                .catch_unwind()
                .await;
            let record = outcome.unwrap_or_else(|_| {
                error!(host = %host, "host analysis panicked; emitting unresolved record");
                HostRecord::unresolved(
                    &host,
                    engine.alternate_suffix(),
                    engine.inventory().lookup(&host),
                )
            });
            // A dropped receiver only means nobody is listening any more
            let _ = tx.send(record).await;
            drop(permit);
        });
    }
}

/// Handle to a running batch; yields one record per dispatched host
pub struct BatchRun {
    rx: mpsc::Receiver<HostRecord>,
    total: usize,
    received: usize,
    cancel: CancellationToken,
}

impl BatchRun {
    /// Number of hosts submitted
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of records received so far
    pub fn received(&self) -> usize {
        self.received
    }

    /// Next completed record, or `None` once every dispatched host has reported
    pub async fn next(&mut self) -> Option<HostRecord> {
        let record = self.rx.recv().await?;
        self.received += 1;
        Some(record)
    }

    pub async fn collect(self) -> Vec<HostRecord> {
        self.collect_with_progress(|_, _, _| {}).await
    }

    /// Drain the batch, invoking `on_record(record, completed, total)` once per record
    pub async fn collect_with_progress<F>(mut self, mut on_record: F) -> Vec<HostRecord>
    where
        F: FnMut(&HostRecord, usize, usize),
    {
        let mut records = Vec::with_capacity(self.total);
        while let Some(record) = self.next().await {
            on_record(&record, self.received, self.total);
            records.push(record);
        }
        info!("Batch finished: {}/{} records", records.len(), self.total);
        records
    }

    /// Stop dispatching new hosts and cut in-flight probes short
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl Drop for BatchRun {
    /// A batch nobody listens to any more is cancelled
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
