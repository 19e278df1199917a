//! Store error types.
//!
//! Stores never return these for failed API calls; those are recorded as the
//! store's error message. `StoreError` covers local validation performed by
//! [`EvalContext`](crate::EvalContext) before a request is made.

use thiserror::Error;

use rag_client::ClientError;
use rag_core::CoreError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Local validation of an entity value failed (e.g. score out of range).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A question upload was rejected before anything was sent.
    #[error(transparent)]
    Import(#[from] ClientError),

    /// The operation needs an open session.
    #[error("No active session; open one first")]
    NoActiveSession,
}
