//! Error types for the prediction pipeline and its collaborators.

use thiserror::Error;

/// The classification capability failed to produce a distribution.
///
/// Carries the underlying cause for operator diagnostics. The pipeline never
/// retries; a single invocation either yields a full distribution or fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("inference failed: {cause}")]
pub struct InferenceError {
    /// Description of the underlying fault (transport error, backend status,
    /// malformed payload, ...).
    pub cause: String,
}

impl InferenceError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}

/// The classifier emitted a label identifier the registry has no entry for.
///
/// This is Adapter/Registry version skew, not a user error. The request that
/// hits it must fail loudly instead of silently dropping the entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label identifier '{label}'")]
pub struct UnknownLabel {
    pub label: String,
}

/// Errors from the history ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// A previous holder of the ledger lock panicked.
    #[error("history lock poisoned: {reason}")]
    LockPoisoned { reason: String },
}

/// Terminal outcome of a failed `predict` call.
///
/// Every variant terminates the current request only; nothing here crashes
/// the process and nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    /// Input was empty (or whitespace-only) after trimming. The classifier
    /// is never invoked for this case.
    #[error("no symptoms provided")]
    EmptyInput,

    /// The classification capability failed.
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// The classifier returned zero classes. A successful prediction must
    /// carry at least one ranked entry, so this surfaces as a fault.
    #[error("classifier returned an empty distribution")]
    EmptyDistribution,

    /// Integrity fault: a returned label has no registry entry.
    #[error(transparent)]
    UnknownLabel(#[from] UnknownLabel),

    /// The history ledger could not record a successful prediction.
    #[error(transparent)]
    History(#[from] HistoryError),
}
