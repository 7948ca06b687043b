use thiserror::Error;

/// Error types surfaced to callers of the reconnaissance engine.
///
/// Probe failures never show up here: they degrade fields of the
/// emitted record instead.
#[derive(Error, Debug)]
pub enum HostFlowError {
    #[error("Invalid host: {0:?}")]
    InvalidHost(String),

    #[error("Batch of {submitted} hosts exceeds the maximum of {max}")]
    BatchSizeExceeded { submitted: usize, max: usize },

    #[error("Batch contains no valid hosts")]
    EmptyBatch,

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Inventory Error: {0}")]
    Inventory(String),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
}
