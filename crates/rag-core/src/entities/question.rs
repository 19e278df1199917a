use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::AnswerDetail;

/// A question as returned by create calls, without answers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub session_id: String,
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_answer: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// A question fetched together with its answers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct QuestionDetail {
    #[serde(flatten)]
    pub question: Question,
    #[serde(default)]
    pub answers: Vec<AnswerDetail>,
}

impl QuestionDetail {
    /// The question's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.question.id
    }

    /// The answer produced for `configuration_id`, if any.
    #[must_use]
    pub fn answer_for(&self, configuration_id: &str) -> Option<&AnswerDetail> {
        self.answers
            .iter()
            .find(|a| a.answer.configuration_id == configuration_id)
    }
}

impl From<Question> for QuestionDetail {
    fn from(question: Question) -> Self {
        Self {
            question,
            answers: Vec::new(),
        }
    }
}
