//! Error taxonomy for the network engine and dataset manager.
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All failures are contract violations scoped to the offending call;
/// the core never retries or recovers internally.
#[derive(Error, Debug)]
pub enum Error {
    /// A vector passed to `query`/`train` does not match the configured
    /// node count. The call performs no computation and no mutation.
    #[error("dimension mismatch: expected vector of length {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A record line failed to parse during `load`. The load aborts and
    /// the dataset is left empty.
    #[error("malformed record at line {line}: {reason}")]
    DataFormat { line: usize, reason: String },

    /// An index passed to `number`/`input`/`output` falls outside
    /// `[0, count_data)`.
    #[error("index {index} out of range for dataset of {count} records")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
