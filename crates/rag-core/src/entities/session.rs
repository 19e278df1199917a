use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Chain, Configuration, QuestionDetail};

/// A named evaluation run grouping chains, questions and configurations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// A session together with everything it owns on the server.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: Session,
    #[serde(default)]
    pub chains: Vec<Chain>,
    #[serde(default)]
    pub questions: Vec<QuestionDetail>,
    #[serde(default)]
    pub configurations: Vec<Configuration>,
}

impl SessionDetail {
    /// The session's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.session.id
    }
}

impl From<Session> for SessionDetail {
    fn from(session: Session) -> Self {
        Self {
            session,
            chains: Vec::new(),
            questions: Vec::new(),
            configurations: Vec::new(),
        }
    }
}
