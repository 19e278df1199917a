//! Question store.
//!
//! A single collection keyed by question id. Every entry carries a
//! [`Completeness`] tag: `Detailed` entries came from a fetch and include
//! their answers, `Basic` entries were created locally and have none yet.
//! A detailed fetch replaces the whole collection, so basic leftovers never
//! outlive the next fetch.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use rag_client::EvalApi;
use rag_core::entities::{AnswerDetail, Question, QuestionDetail};
use rag_core::payloads::{QuestionCreate, QuestionUpdate};

use crate::status::StoreStatus;

/// How much of a question the store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Completeness {
    /// Created locally; answers not populated.
    Basic,
    /// Fetched with answers.
    Detailed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionEntry {
    pub completeness: Completeness,
    #[serde(flatten)]
    pub question: QuestionDetail,
}

impl QuestionEntry {
    fn basic(question: Question) -> Self {
        Self {
            completeness: Completeness::Basic,
            question: QuestionDetail::from(question),
        }
    }

    const fn detailed(question: QuestionDetail) -> Self {
        Self {
            completeness: Completeness::Detailed,
            question,
        }
    }
}

#[derive(Debug, Default)]
struct QuestionState {
    entries: Vec<QuestionEntry>,
}

impl QuestionState {
    /// Insert or replace by id, keeping the position of an existing entry.
    fn upsert(&mut self, entry: QuestionEntry) {
        match self.entries.iter_mut().find(|e| e.question.id() == entry.question.id()) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    fn remove(&mut self, question_ids: &[String]) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|e| !question_ids.iter().any(|id| id == e.question.id()));
        before - self.entries.len()
    }

    fn count(&self, completeness: Completeness) -> usize {
        self.entries
            .iter()
            .filter(|e| e.completeness == completeness)
            .count()
    }
}

pub struct QuestionStore {
    api: Arc<dyn EvalApi>,
    state: Mutex<QuestionState>,
    status: StoreStatus,
}

impl QuestionStore {
    #[must_use]
    pub fn new(api: Arc<dyn EvalApi>) -> Self {
        Self {
            api,
            state: Mutex::new(QuestionState::default()),
            status: StoreStatus::new("questions"),
        }
    }

    #[must_use]
    pub const fn status(&self) -> &StoreStatus {
        &self.status
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Detailed questions followed by basic ones, each in insertion order.
    pub async fn all(&self) -> Vec<QuestionDetail> {
        self.entries()
            .await
            .into_iter()
            .map(|e| e.question)
            .collect()
    }

    /// Tagged entries in the same order as [`Self::all`].
    pub async fn entries(&self) -> Vec<QuestionEntry> {
        let state = self.state.lock().await;
        let (detailed, basic): (Vec<_>, Vec<_>) = state
            .entries
            .iter()
            .cloned()
            .partition(|e| e.completeness == Completeness::Detailed);
        detailed.into_iter().chain(basic).collect()
    }

    pub async fn find(&self, question_id: &str) -> Option<QuestionDetail> {
        let found = self
            .state
            .lock()
            .await
            .entries
            .iter()
            .find(|e| e.question.id() == question_id)
            .map(|e| e.question.clone());
        if found.is_none() {
            tracing::debug!(question_id, "question not held");
        }
        found
    }

    /// The answer held for a (question, configuration) pair.
    pub async fn answer_for(
        &self,
        question_id: &str,
        configuration_id: &str,
    ) -> Option<AnswerDetail> {
        let state = self.state.lock().await;
        state
            .entries
            .iter()
            .find(|e| e.question.id() == question_id)
            .and_then(|e| e.question.answer_for(configuration_id))
            .cloned()
    }

    pub async fn basic_count(&self) -> usize {
        self.state.lock().await.count(Completeness::Basic)
    }

    pub async fn detailed_count(&self) -> usize {
        self.state.lock().await.count(Completeness::Detailed)
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }

    // ── Local reconciliation ────────────────────────────────────────

    /// Replace the collection with already-fetched detailed questions.
    pub async fn seed(&self, questions: Vec<QuestionDetail>) {
        self.state.lock().await.entries =
            questions.into_iter().map(QuestionEntry::detailed).collect();
    }

    /// Put `answer` under its question, replacing the answer for the same
    /// configuration if one is held. Returns `false` if the question is not
    /// held.
    pub async fn apply_answer(&self, answer: &AnswerDetail) -> bool {
        let mut state = self.state.lock().await;
        let Some(entry) = state
            .entries
            .iter_mut()
            .find(|e| e.question.id() == answer.answer.question_id)
        else {
            tracing::debug!(question_id = %answer.answer.question_id, "answer for unheld question ignored");
            return false;
        };
        let answers = &mut entry.question.answers;
        match answers
            .iter_mut()
            .find(|a| a.id() == answer.id() || a.same_pair(answer))
        {
            Some(existing) => *existing = answer.clone(),
            None => answers.push(answer.clone()),
        }
        true
    }

    pub async fn clear(&self) {
        self.state.lock().await.entries.clear();
    }

    // ── Resource operations ─────────────────────────────────────────

    /// Fetch the session's questions with answers, replacing everything held.
    pub async fn fetch_all(&self, session_id: &str) -> bool {
        let _loading = self.status.begin().await;
        let response = self.api.list_questions(session_id).await;
        let Some(questions) = self.status.settle("fetch_all", response).await else {
            return false;
        };
        tracing::debug!(session_id, count = questions.len(), "questions fetched");
        self.seed(questions).await;
        true
    }

    pub async fn create(&self, session_id: &str, body: &QuestionCreate) -> Option<Question> {
        let _loading = self.status.begin().await;
        let response = self.api.create_question(session_id, body).await;
        let question = self.status.settle("create", response).await?;
        self.state
            .lock()
            .await
            .upsert(QuestionEntry::basic(question.clone()));
        Some(question)
    }

    pub async fn create_bulk(
        &self,
        session_id: &str,
        questions: &[QuestionCreate],
    ) -> Option<Vec<Question>> {
        let _loading = self.status.begin().await;
        let response = self.api.create_questions_bulk(session_id, questions).await;
        let created = self.status.settle("create_bulk", response).await?;

        let mut state = self.state.lock().await;
        for question in &created {
            state.upsert(QuestionEntry::basic(question.clone()));
        }
        tracing::debug!(session_id, count = created.len(), "questions created");
        Some(created)
    }

    /// Patch a question. The held entry keeps its completeness and answers.
    pub async fn update(
        &self,
        session_id: &str,
        question_id: &str,
        body: &QuestionUpdate,
    ) -> Option<QuestionDetail> {
        let _loading = self.status.begin().await;
        let response = self.api.update_question(session_id, question_id, body).await;
        let updated = self.status.settle("update", response).await?;

        let mut state = self.state.lock().await;
        if let Some(entry) = state
            .entries
            .iter_mut()
            .find(|e| e.question.id() == updated.id())
        {
            entry.question.question = updated.question.clone();
        }
        Some(updated)
    }

    pub async fn delete(&self, session_id: &str, question_id: &str) -> bool {
        let _loading = self.status.begin().await;
        let response = self.api.delete_question(session_id, question_id).await;
        if self.status.settle("delete", response).await.is_none() {
            return false;
        }
        self.state.lock().await.remove(&[question_id.to_string()]);
        true
    }

    pub async fn delete_bulk(&self, session_id: &str, question_ids: &[String]) -> bool {
        let _loading = self.status.begin().await;
        let response = self.api.delete_questions_bulk(session_id, question_ids).await;
        if self.status.settle("delete_bulk", response).await.is_none() {
            return false;
        }
        let removed = self.state.lock().await.remove(question_ids);
        tracing::debug!(session_id, requested = question_ids.len(), removed, "questions deleted");
        true
    }

    pub async fn delete_all(&self, session_id: &str) -> bool {
        let _loading = self.status.begin().await;
        let response = self.api.delete_all_questions(session_id).await;
        if self.status.settle("delete_all", response).await.is_none() {
            return false;
        }
        self.clear().await;
        true
    }
}
