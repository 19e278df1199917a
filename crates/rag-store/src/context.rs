//! The evaluation context: one instance of every store, the selection
//! tracker and the view toggles, wired to a single [`EvalApi`].
//!
//! The context is what keeps the three views of an answer consistent. An
//! answer can be held by the answer store, nested under its question in the
//! question store, and snapshotted by the selection tracker; every mutation
//! routed through here updates all three.

use std::sync::Arc;

use rag_client::{CsvQuestionImporter, EvalApi};
use rag_core::Score;
use rag_core::entities::{AnswerDetail, Question, Session, SessionDetail};
use rag_core::payloads::SessionCreate;

use crate::answer::AnswerStore;
use crate::chain::ChainStore;
use crate::configuration::ConfigurationStore;
use crate::error::StoreError;
use crate::question::QuestionStore;
use crate::selection::SelectionTracker;
use crate::session::SessionStore;
use crate::toggle::ViewToggles;

pub struct EvalContext {
    sessions: SessionStore,
    questions: QuestionStore,
    answers: AnswerStore,
    chains: ChainStore,
    configurations: ConfigurationStore,
    selection: Arc<SelectionTracker>,
    views: ViewToggles,
    importer: CsvQuestionImporter,
}

impl EvalContext {
    #[must_use]
    pub fn new(api: Arc<dyn EvalApi>) -> Self {
        let selection = Arc::new(SelectionTracker::new());
        Self {
            sessions: SessionStore::new(Arc::clone(&api)),
            questions: QuestionStore::new(Arc::clone(&api)),
            answers: AnswerStore::new(Arc::clone(&api), Arc::clone(&selection)),
            chains: ChainStore::new(Arc::clone(&api)),
            configurations: ConfigurationStore::new(api),
            selection,
            views: ViewToggles::default(),
            importer: CsvQuestionImporter::new(),
        }
    }

    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    #[must_use]
    pub const fn questions(&self) -> &QuestionStore {
        &self.questions
    }

    #[must_use]
    pub const fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    #[must_use]
    pub const fn chains(&self) -> &ChainStore {
        &self.chains
    }

    #[must_use]
    pub const fn configurations(&self) -> &ConfigurationStore {
        &self.configurations
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    #[must_use]
    pub const fn views(&self) -> &ViewToggles {
        &self.views
    }

    pub async fn active_session_id(&self) -> Option<String> {
        self.sessions.current_id().await
    }

    async fn require_session(&self) -> Result<String, StoreError> {
        self.active_session_id()
            .await
            .ok_or(StoreError::NoActiveSession)
    }

    // ── Session lifecycle ───────────────────────────────────────────

    /// Load a session and make it active. Switching to a different session
    /// drops all session-scoped state and seeds it from the fetched detail.
    pub async fn open_session(&self, session_id: &str) -> Option<SessionDetail> {
        let previous = self.active_session_id().await;
        let detail = self.sessions.fetch_one(session_id).await?;

        if previous.as_deref() != Some(session_id) {
            tracing::debug!(?previous, session_id, "active session changed");
            self.reset().await;
            self.questions.seed(detail.questions.clone()).await;
            self.chains.seed(detail.chains.clone()).await;
            self.configurations
                .seed(detail.configurations.clone())
                .await;
        }
        Some(detail)
    }

    /// Create a session; it becomes the active one, so everything scoped to
    /// the previous session is dropped.
    pub async fn create_session(&self, body: &SessionCreate) -> Option<Session> {
        let previous = self.active_session_id().await;
        let created = self.sessions.create(body).await?;
        if previous.as_deref() != Some(created.id.as_str()) {
            tracing::debug!(?previous, session_id = %created.id, "active session changed");
            self.reset().await;
        }
        Some(created)
    }

    /// Delete a session. Deleting the active one closes it and drops its
    /// session-scoped state.
    pub async fn delete_session(&self, session_id: &str) -> bool {
        let was_active = self.active_session_id().await.as_deref() == Some(session_id);
        if !self.sessions.delete(session_id).await {
            return false;
        }
        if was_active {
            tracing::debug!(session_id, "active session deleted");
            self.reset().await;
        }
        true
    }

    /// Clear everything scoped to the active session, including the stores'
    /// last recorded errors.
    pub async fn reset(&self) {
        self.questions.clear().await;
        self.answers.clear().await;
        self.chains.clear().await;
        self.configurations.clear().await;
        self.selection.clear().await;
        for status in [
            self.questions.status(),
            self.answers.status(),
            self.chains.status(),
            self.configurations.status(),
        ] {
            status.clear_error().await;
        }
    }

    // ── Answers ─────────────────────────────────────────────────────

    /// Score an answer and propagate the result to every view of it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] if `score` is out of range; nothing is
    /// sent in that case. API failures are recorded on the answer store and
    /// yield `Ok(None)`.
    pub async fn score_answer(
        &self,
        question_id: &str,
        answer_id: &str,
        score: u8,
    ) -> Result<Option<AnswerDetail>, StoreError> {
        let score = Score::new(score)?;
        let updated = self
            .answers
            .update_score(question_id, answer_id, score)
            .await;
        if let Some(answer) = &updated {
            self.questions.apply_answer(answer).await;
        }
        Ok(updated)
    }

    /// Make the answer for a (question, configuration) pair active. The
    /// answer joins the answer store's collection; an unknown pair clears
    /// the selection.
    pub async fn select_answer(
        &self,
        question_id: &str,
        configuration_id: &str,
    ) -> Option<AnswerDetail> {
        self.answers
            .select(&self.questions, question_id, configuration_id)
            .await
    }

    pub async fn add_comment(&self, text: &str) -> Option<AnswerDetail> {
        let updated = self.selection.add_comment(text).await?;
        self.propagate(&updated).await;
        Some(updated)
    }

    pub async fn delete_comment(&self, index: usize) -> Option<AnswerDetail> {
        let updated = self.selection.delete_comment(index).await?;
        self.propagate(&updated).await;
        Some(updated)
    }

    async fn propagate(&self, answer: &AnswerDetail) {
        self.answers.apply(answer).await;
        self.questions.apply_answer(answer).await;
    }

    // ── Questions ───────────────────────────────────────────────────

    /// Delete a question of the active session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveSession`] if no session is open.
    pub async fn delete_question(&self, question_id: &str) -> Result<bool, StoreError> {
        let session_id = self.require_session().await?;
        let deleted = self.questions.delete(&session_id, question_id).await;
        if deleted {
            self.answers
                .discard(|a| a.answer.question_id == question_id)
                .await;
        }
        Ok(deleted)
    }

    /// Delete several questions of the active session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveSession`] if no session is open.
    pub async fn delete_questions(&self, question_ids: &[String]) -> Result<bool, StoreError> {
        let session_id = self.require_session().await?;
        let deleted = self.questions.delete_bulk(&session_id, question_ids).await;
        if deleted {
            self.answers
                .discard(|a| question_ids.contains(&a.answer.question_id))
                .await;
        }
        Ok(deleted)
    }

    /// Delete every question of the active session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveSession`] if no session is open.
    pub async fn delete_all_questions(&self) -> Result<bool, StoreError> {
        let session_id = self.require_session().await?;
        let deleted = self.questions.delete_all(&session_id).await;
        if deleted {
            self.answers.discard(|_| true).await;
        }
        Ok(deleted)
    }

    /// Parse a question upload and bulk-create its rows in the active
    /// session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveSession`] if no session is open, or
    /// [`StoreError::Import`] if the file is not a CSV with the expected
    /// headers. Nothing is sent in either case.
    pub async fn import_questions_csv(
        &self,
        file_name: &str,
        content: &str,
    ) -> Result<Option<Vec<Question>>, StoreError> {
        let session_id = self.require_session().await?;
        let questions = self.importer.import_file(file_name, content)?;
        if questions.is_empty() {
            tracing::debug!(file_name, "upload contained no questions");
            return Ok(Some(Vec::new()));
        }
        Ok(self.questions.create_bulk(&session_id, &questions).await)
    }
}
