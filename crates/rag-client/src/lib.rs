//! # rag-client
//!
//! Resource client for the RAGulator evaluation backend.
//!
//! Every operation maps one logical resource call (sessions, questions,
//! answers, chains, configurations) to exactly one request and returns an
//! [`ApiResponse`] envelope. Calls never fail across this boundary: transport
//! errors and non-success statuses are captured in the envelope's
//! [`ApiFailure`].
//!
//! Two implementations of [`EvalApi`] exist:
//! - [`HttpApi`], reqwest against the backend's REST API
//! - [`DemoApi`], an in-memory backend seeded with demo data
//!
//! The crate also hosts [`CsvQuestionImporter`], which validates and parses
//! question uploads before anything is sent.

pub mod demo;
pub mod envelope;
pub mod import;
pub mod routes;
pub mod support;

mod error;
mod http;

pub use demo::DemoApi;
pub use envelope::{ApiFailure, ApiResponse};
pub use error::ClientError;
pub use http::HttpApi;
pub use import::CsvQuestionImporter;
pub use support::ServiceSupport;

use async_trait::async_trait;
use rag_core::entities::{
    AnswerDetail, AvailableChain, Chain, Configuration, Question, QuestionDetail, Session,
    SessionDetail,
};
use rag_core::payloads::{
    AnswerUpdate, ChainSelection, ConfigurationCreate, ConfigurationUpdate, QuestionCreate,
    QuestionUpdate, SessionCreate, SessionUpdate,
};

/// One method per backend endpoint.
#[async_trait]
pub trait EvalApi: Send + Sync {
    // ── Sessions ────────────────────────────────────────────────────

    /// `GET /sessions`
    async fn list_sessions(&self) -> ApiResponse<Vec<SessionDetail>>;

    /// `GET /sessions/{id}`
    async fn get_session(&self, session_id: &str) -> ApiResponse<SessionDetail>;

    /// `POST /sessions`
    async fn create_session(&self, body: &SessionCreate) -> ApiResponse<Session>;

    /// `PATCH /sessions/{id}`
    async fn update_session(&self, session_id: &str, body: &SessionUpdate)
    -> ApiResponse<Session>;

    /// `DELETE /sessions/{id}`
    async fn delete_session(&self, session_id: &str) -> ApiResponse<Session>;

    // ── Questions ───────────────────────────────────────────────────

    /// `GET /sessions/{id}/questions`, questions with their answers.
    async fn list_questions(&self, session_id: &str) -> ApiResponse<Vec<QuestionDetail>>;

    /// `POST /sessions/{id}/questions`
    async fn create_question(&self, session_id: &str, body: &QuestionCreate)
    -> ApiResponse<Question>;

    /// `POST /sessions/{id}/questions/bulk`
    async fn create_questions_bulk(
        &self,
        session_id: &str,
        questions: &[QuestionCreate],
    ) -> ApiResponse<Vec<Question>>;

    /// `PATCH /sessions/{id}/questions/{id}`
    async fn update_question(
        &self,
        session_id: &str,
        question_id: &str,
        body: &QuestionUpdate,
    ) -> ApiResponse<QuestionDetail>;

    /// `DELETE /sessions/{id}/questions/{id}`
    async fn delete_question(&self, session_id: &str, question_id: &str) -> ApiResponse<Question>;

    /// `DELETE /sessions/{id}/questions/bulk`
    async fn delete_questions_bulk(
        &self,
        session_id: &str,
        question_ids: &[String],
    ) -> ApiResponse<Vec<Question>>;

    /// `DELETE /sessions/{id}/questions`
    async fn delete_all_questions(&self, session_id: &str) -> ApiResponse<Vec<Question>>;

    // ── Answers ─────────────────────────────────────────────────────

    /// `GET /questions/{id}/answers`
    async fn answers_for_question(&self, question_id: &str) -> ApiResponse<Vec<AnswerDetail>>;

    /// `GET /configurations/{id}/answers`
    async fn answers_for_configuration(
        &self,
        configuration_id: &str,
    ) -> ApiResponse<Vec<AnswerDetail>>;

    /// `PATCH /questions/{id}/answers/{id}`
    async fn update_answer_score(
        &self,
        question_id: &str,
        answer_id: &str,
        body: &AnswerUpdate,
    ) -> ApiResponse<AnswerDetail>;

    // ── Chains ──────────────────────────────────────────────────────

    /// `GET /available-chains`
    async fn available_chains(&self) -> ApiResponse<Vec<AvailableChain>>;

    /// `POST /sessions/{id}/select-chains`
    async fn select_chains(&self, session_id: &str, body: &ChainSelection)
    -> ApiResponse<Vec<Chain>>;

    /// `GET /sessions/{id}/chains`
    async fn list_chains(&self, session_id: &str) -> ApiResponse<Vec<Chain>>;

    /// `GET /sessions/{id}/chains/{id}`
    async fn get_chain(&self, session_id: &str, chain_id: &str) -> ApiResponse<Chain>;

    /// `DELETE /sessions/{id}/chains/{id}`
    async fn delete_chain(&self, session_id: &str, chain_id: &str) -> ApiResponse<Chain>;

    // ── Configurations ──────────────────────────────────────────────

    /// `GET /sessions/{id}/configurations`
    async fn list_configurations(&self, session_id: &str) -> ApiResponse<Vec<Configuration>>;

    /// `GET /sessions/{id}/configurations/{id}`
    async fn get_configuration(
        &self,
        session_id: &str,
        configuration_id: &str,
    ) -> ApiResponse<Configuration>;

    /// `POST /sessions/{id}/configurations`
    async fn create_configuration(
        &self,
        session_id: &str,
        body: &ConfigurationCreate,
    ) -> ApiResponse<Configuration>;

    /// `PATCH /sessions/{id}/configurations/{id}`
    async fn update_configuration(
        &self,
        session_id: &str,
        configuration_id: &str,
        body: &ConfigurationUpdate,
    ) -> ApiResponse<Configuration>;

    /// `DELETE /sessions/{id}/configurations/{id}`
    async fn delete_configuration(
        &self,
        session_id: &str,
        configuration_id: &str,
    ) -> ApiResponse<Configuration>;

    /// `GET /configurations/{id}/score`, `None` while no answer is scored.
    async fn configuration_score(&self, configuration_id: &str) -> ApiResponse<Option<f64>>;
}
