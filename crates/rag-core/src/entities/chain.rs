use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A chain artifact selected into a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Chain {
    pub id: String,
    pub file_name: String,
    #[serde(default)]
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

/// A chain file the server can offer for selection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AvailableChain {
    pub file_name: String,
}
