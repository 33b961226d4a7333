use thiserror::Error;
use tokio::task::JoinError;

/// Errors surfaced by the store and its dispatch runtime
#[derive(Debug, Error)]
pub enum StoreError {
    /// The state handed to a store violates one of its invariants
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A reducer or middleware refused an action because applying it would
    /// break a state invariant
    #[error("Action rejected: {0}")]
    Rejected(String),

    /// A middleware side effect failed
    #[error("Middleware failed: {0}")]
    Middleware(#[from] anyhow::Error),

    /// A reducer or middleware panicked while processing an action
    #[error("Action processing panicked: {0}")]
    Panicked(String),

    /// The dispatch loop is gone, the action was never processed
    #[error("Store is closed")]
    Closed,

    /// The store was created outside of a tokio runtime
    #[error("Store requires a running tokio runtime")]
    NoRuntime,
}

impl StoreError {
    pub(crate) fn from_join_error(error: JoinError) -> Self {
        if !error.is_panic() {
            return StoreError::Closed;
        }

        let payload = error.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| message.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        StoreError::Panicked(message)
    }
}
