//! Request bodies sent to the evaluation backend.
//!
//! Optional fields that are `None` are omitted from the JSON body so that
//! partial updates only touch the fields the caller set.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ParamMap;
use crate::score::Score;

/// Body of `POST /sessions`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PATCH /sessions/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /sessions/{id}/questions`, one element of a bulk create.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionCreate {
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_answer: Option<String>,
}

impl QuestionCreate {
    /// A question without an expected answer.
    #[must_use]
    pub fn new(question_text: impl Into<String>) -> Self {
        Self {
            question_text: question_text.into(),
            expected_answer: None,
        }
    }

    /// Attach an expected answer.
    #[must_use]
    pub fn with_expected_answer(mut self, expected_answer: impl Into<String>) -> Self {
        self.expected_answer = Some(expected_answer.into());
        self
    }
}

/// Body of `PATCH /sessions/{id}/questions/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_answer: Option<String>,
}

/// Body of `POST /sessions/{id}/questions/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionBulkCreate {
    pub questions: Vec<QuestionCreate>,
}

/// Body of `DELETE /sessions/{id}/questions/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionBulkDelete {
    pub question_ids: Vec<String>,
}

/// Body of `POST /sessions/{id}/select-chains`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChainSelection {
    pub file_names: Vec<String>,
}

/// Body of `POST /sessions/{id}/configurations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ConfigurationCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<ParamMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_parameters: Option<ParamMap>,
}

/// Body of `PATCH /sessions/{id}/configurations/{id}`.
pub type ConfigurationUpdate = ConfigurationCreate;

/// Body of `PATCH /questions/{id}/answers/{id}`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnswerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}
