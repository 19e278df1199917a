//! # rag-store
//!
//! Client-side state for an evaluation session.
//!
//! Each entity store holds the in-memory copy of one resource type and
//! reconciles it with the backend through an [`EvalApi`](rag_client::EvalApi):
//!
//! 1. mark loading, clear the last error
//! 2. call the API
//! 3. on failure record the message and leave the collection untouched
//! 4. on success merge the response and refresh derived views
//! 5. release loading, even if the call future is dropped
//!
//! Store state sits behind an async mutex that is never held across a
//! network call, so overlapping calls commit in completion order.
//!
//! [`EvalContext`] owns one of every store plus the [`SelectionTracker`] and
//! the [`ViewToggles`].

pub mod answer;
pub mod chain;
pub mod configuration;
pub mod context;
pub mod question;
pub mod selection;
pub mod session;
pub mod status;
pub mod toggle;

mod error;

pub use answer::AnswerStore;
pub use chain::ChainStore;
pub use configuration::ConfigurationStore;
pub use context::EvalContext;
pub use error::StoreError;
pub use question::{Completeness, QuestionEntry, QuestionStore};
pub use selection::SelectionTracker;
pub use session::SessionStore;
pub use status::StoreStatus;
pub use toggle::{Toggle, ViewToggles};
