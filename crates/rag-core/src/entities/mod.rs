//! Entity structs for all RAGulator domain objects.
//!
//! Each entity mirrors a resource of the evaluation backend's REST API. All
//! structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod answer;
mod chain;
mod configuration;
mod question;
mod session;

pub use answer::{Answer, AnswerComment, AnswerDetail};
pub use chain::{AvailableChain, Chain};
pub use configuration::{Configuration, ParamMap, ParamValue};
pub use question::{Question, QuestionDetail};
pub use session::{Session, SessionDetail};
