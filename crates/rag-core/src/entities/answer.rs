use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::score::Score;

/// Chain output for one (question, configuration) pair.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Answer {
    pub id: String,
    pub question_id: String,
    pub chain_id: String,
    pub configuration_id: String,
    pub generated_answer: String,
    /// Absent until someone scores the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    pub created_at: DateTime<Utc>,
}

/// Free-text annotation attached to an answer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnswerComment {
    pub id: String,
    pub answer_id: String,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// An answer together with its comments.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnswerDetail {
    #[serde(flatten)]
    pub answer: Answer,
    #[serde(default)]
    pub comments: Vec<AnswerComment>,
}

impl AnswerDetail {
    /// The answer's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.answer.id
    }

    /// Whether this answer and `other` were produced for the same
    /// (question, configuration) pair.
    #[must_use]
    pub fn same_pair(&self, other: &Self) -> bool {
        self.answer.question_id == other.answer.question_id
            && self.answer.configuration_id == other.answer.configuration_id
    }
}

impl From<Answer> for AnswerDetail {
    fn from(answer: Answer) -> Self {
        Self {
            answer,
            comments: Vec::new(),
        }
    }
}
