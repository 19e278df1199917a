//! Active-answer selection and annotation.
//!
//! The tracker holds a snapshot of at most one answer. It is set through
//! [`AnswerStore::select`](crate::AnswerStore::select), which keeps the
//! selection inside the held answer collection. Comment mutations return the
//! updated answer; [`EvalContext`](crate::EvalContext) pushes it back into
//! the answer and question stores.

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use rag_core::entities::{AnswerComment, AnswerDetail};

use crate::status::InFlight;

#[derive(Debug, Default)]
pub struct SelectionTracker {
    active: Mutex<Option<AnswerDetail>>,
    processing: InFlight,
}

impl SelectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn active(&self) -> Option<AnswerDetail> {
        self.active.lock().await.clone()
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing.is_active()
    }

    pub(crate) async fn set(&self, answer: Option<AnswerDetail>) {
        *self.active.lock().await = answer;
    }

    pub async fn clear(&self) {
        self.active.lock().await.take();
    }

    /// Replace the snapshot if `answer` is the active one.
    pub async fn refresh(&self, answer: &AnswerDetail) -> bool {
        let mut active = self.active.lock().await;
        match active.as_mut().filter(|a| a.id() == answer.id()) {
            Some(current) => {
                current.clone_from(answer);
                true
            }
            None => false,
        }
    }

    /// Drop the selection if `predicate` holds for it.
    pub async fn clear_if(&self, predicate: impl FnOnce(&AnswerDetail) -> bool) -> bool {
        let mut active = self.active.lock().await;
        if active.as_ref().is_some_and(predicate) {
            active.take();
            return true;
        }
        false
    }

    /// Append a trimmed comment to the active answer. Blank text, or no
    /// active answer, changes nothing.
    pub async fn add_comment(&self, text: &str) -> Option<AnswerDetail> {
        let _processing = self.processing.enter();
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut active = self.active.lock().await;
        let answer = active.as_mut()?;
        let now = Utc::now();
        let answer_id = answer.id().to_string();
        answer.comments.push(AnswerComment {
            id: format!("cmt-{}", Uuid::new_v4().simple()),
            answer_id,
            comment_text: text.to_string(),
            created_at: now,
            last_modified: now,
        });
        Some(answer.clone())
    }

    /// Remove the active answer's comment at `index`, if there is one.
    pub async fn delete_comment(&self, index: usize) -> Option<AnswerDetail> {
        let _processing = self.processing.enter();
        let mut active = self.active.lock().await;
        let answer = active.as_mut()?;
        if index >= answer.comments.len() {
            tracing::debug!(index, len = answer.comments.len(), "comment index out of bounds");
            return None;
        }
        answer.comments.remove(index);
        Some(answer.clone())
    }
}
