//! Answer store.
//!
//! Holds the answers of the last queried scope (one question or one
//! configuration). At most one answer per (question, configuration) pair is
//! held; when a response carries several, the newest wins.
//!
//! The held collection is also the membership set for the active selection:
//! selecting an answer merges it in, and any path that drops the active
//! answer from the collection clears the selection.

use std::sync::Arc;

use tokio::sync::Mutex;

use rag_client::EvalApi;
use rag_core::Score;
use rag_core::entities::AnswerDetail;
use rag_core::payloads::AnswerUpdate;

use crate::question::QuestionStore;
use crate::selection::SelectionTracker;
use crate::status::StoreStatus;

/// Keep one answer per (question, configuration) pair: the latest
/// `created_at`, with later positions winning ties.
fn dedupe_by_pair(answers: Vec<AnswerDetail>) -> Vec<AnswerDetail> {
    let mut kept: Vec<AnswerDetail> = Vec::with_capacity(answers.len());
    for answer in answers {
        match kept.iter_mut().find(|k| k.same_pair(&answer)) {
            Some(existing) if answer.answer.created_at >= existing.answer.created_at => {
                *existing = answer;
            }
            Some(_) => {}
            None => kept.push(answer),
        }
    }
    kept
}

pub struct AnswerStore {
    api: Arc<dyn EvalApi>,
    selection: Arc<SelectionTracker>,
    answers: Mutex<Vec<AnswerDetail>>,
    status: StoreStatus,
}

impl AnswerStore {
    #[must_use]
    pub fn new(api: Arc<dyn EvalApi>, selection: Arc<SelectionTracker>) -> Self {
        Self {
            api,
            selection,
            answers: Mutex::new(Vec::new()),
            status: StoreStatus::new("answers"),
        }
    }

    #[must_use]
    pub const fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub async fn answers(&self) -> Vec<AnswerDetail> {
        self.answers.lock().await.clone()
    }

    pub async fn find(&self, answer_id: &str) -> Option<AnswerDetail> {
        self.answers
            .lock()
            .await
            .iter()
            .find(|a| a.id() == answer_id)
            .cloned()
    }

    /// Replace the held answer with the same id, or the same pair.
    /// Answers outside the held scope are ignored.
    pub async fn apply(&self, answer: &AnswerDetail) -> bool {
        let mut answers = self.answers.lock().await;
        match answers
            .iter_mut()
            .find(|a| a.id() == answer.id() || a.same_pair(answer))
        {
            Some(existing) => {
                existing.clone_from(answer);
                true
            }
            None => false,
        }
    }

    pub async fn clear(&self) {
        self.answers.lock().await.clear();
    }

    /// Select the answer nested under a (question, configuration) pair in
    /// `questions`, merging it into the held collection. An unknown pair
    /// clears the selection.
    pub async fn select(
        &self,
        questions: &QuestionStore,
        question_id: &str,
        configuration_id: &str,
    ) -> Option<AnswerDetail> {
        let resolved = questions.answer_for(question_id, configuration_id).await;
        let mut answers = self.answers.lock().await;
        match &resolved {
            Some(answer) => upsert(&mut answers, answer),
            None => tracing::debug!(question_id, configuration_id, "no answer to select"),
        }
        self.selection.set(resolved.clone()).await;
        resolved
    }

    /// Drop held answers matching `predicate`, clearing the selection if it
    /// was one of them. Returns how many were dropped.
    pub async fn discard(&self, predicate: impl Fn(&AnswerDetail) -> bool) -> usize {
        let mut answers = self.answers.lock().await;
        let before = answers.len();
        answers.retain(|a| !predicate(a));
        self.selection.clear_if(&predicate).await;
        before - answers.len()
    }

    pub async fn fetch_for_question(&self, question_id: &str) -> bool {
        let _loading = self.status.begin().await;
        let response = self.api.answers_for_question(question_id).await;
        let Some(answers) = self.status.settle("fetch_for_question", response).await else {
            return false;
        };
        self.replace(answers).await;
        true
    }

    pub async fn fetch_for_configuration(&self, configuration_id: &str) -> bool {
        let _loading = self.status.begin().await;
        let response = self.api.answers_for_configuration(configuration_id).await;
        let Some(answers) = self
            .status
            .settle("fetch_for_configuration", response)
            .await
        else {
            return false;
        };
        self.replace(answers).await;
        true
    }

    /// Score an answer. The held entry and the active selection both take
    /// the server's copy.
    pub async fn update_score(
        &self,
        question_id: &str,
        answer_id: &str,
        score: Score,
    ) -> Option<AnswerDetail> {
        let _loading = self.status.begin().await;
        let body = AnswerUpdate { score: Some(score) };
        let response = self.api.update_answer_score(question_id, answer_id, &body).await;
        let updated = self.status.settle("update_score", response).await?;

        if let Some(existing) = self
            .answers
            .lock()
            .await
            .iter_mut()
            .find(|a| a.id() == updated.id())
        {
            existing.clone_from(&updated);
        }
        self.selection.refresh(&updated).await;
        Some(updated)
    }

    async fn replace(&self, answers: Vec<AnswerDetail>) {
        let received = answers.len();
        let answers = dedupe_by_pair(answers);
        tracing::debug!(received, kept = answers.len(), "answers fetched");

        let mut held = self.answers.lock().await;
        let dropped_active = self
            .selection
            .clear_if(|active| !answers.iter().any(|a| a.id() == active.id()))
            .await;
        if dropped_active {
            tracing::debug!("active answer left the held scope; selection cleared");
        }
        *held = answers;
    }
}

fn upsert(answers: &mut Vec<AnswerDetail>, answer: &AnswerDetail) {
    match answers
        .iter_mut()
        .find(|a| a.id() == answer.id() || a.same_pair(answer))
    {
        Some(existing) => existing.clone_from(answer),
        None => answers.push(answer.clone()),
    }
}
