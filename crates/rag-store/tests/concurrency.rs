//! Overlapping store calls commit in completion order.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use rag_client::demo::DEMO_SESSION_ID;
use rag_client::{ApiResponse, DemoApi, EvalApi};
use rag_core::Score;
use rag_core::entities::{
    AnswerDetail, AvailableChain, Chain, Configuration, Question, QuestionDetail, Session,
    SessionDetail,
};
use rag_core::payloads::{
    AnswerUpdate, ChainSelection, ConfigurationCreate, ConfigurationUpdate, QuestionCreate,
    QuestionUpdate, SessionCreate, SessionUpdate,
};
use rag_store::EvalContext;

/// Demo backend whose score updates take longer the higher the score.
///
/// The server applies updates in issue order; the responses arrive after a
/// score-dependent delay, so a high score issued first completes last.
struct SlowScores {
    inner: DemoApi,
}

#[async_trait]
impl EvalApi for SlowScores {
    async fn update_answer_score(
        &self,
        question_id: &str,
        answer_id: &str,
        body: &AnswerUpdate,
    ) -> ApiResponse<AnswerDetail> {
        let response = self.inner.update_answer_score(question_id, answer_id, body).await;
        let millis = body.score.map_or(0, |s| u64::from(s.value()) * 100);
        tokio::time::sleep(Duration::from_millis(millis)).await;
        response
    }

    async fn list_sessions(&self) -> ApiResponse<Vec<SessionDetail>> {
        self.inner.list_sessions().await
    }
    async fn get_session(&self, session_id: &str) -> ApiResponse<SessionDetail> {
        self.inner.get_session(session_id).await
    }
    async fn create_session(&self, body: &SessionCreate) -> ApiResponse<Session> {
        self.inner.create_session(body).await
    }
    async fn update_session(&self, id: &str, body: &SessionUpdate) -> ApiResponse<Session> {
        self.inner.update_session(id, body).await
    }
    async fn delete_session(&self, session_id: &str) -> ApiResponse<Session> {
        self.inner.delete_session(session_id).await
    }
    async fn list_questions(&self, session_id: &str) -> ApiResponse<Vec<QuestionDetail>> {
        self.inner.list_questions(session_id).await
    }
    async fn create_question(&self, id: &str, body: &QuestionCreate) -> ApiResponse<Question> {
        self.inner.create_question(id, body).await
    }
    async fn create_questions_bulk(
        &self,
        id: &str,
        questions: &[QuestionCreate],
    ) -> ApiResponse<Vec<Question>> {
        self.inner.create_questions_bulk(id, questions).await
    }
    async fn update_question(
        &self,
        id: &str,
        question_id: &str,
        body: &QuestionUpdate,
    ) -> ApiResponse<QuestionDetail> {
        self.inner.update_question(id, question_id, body).await
    }
    async fn delete_question(&self, id: &str, question_id: &str) -> ApiResponse<Question> {
        self.inner.delete_question(id, question_id).await
    }
    async fn delete_questions_bulk(&self, id: &str, ids: &[String]) -> ApiResponse<Vec<Question>> {
        self.inner.delete_questions_bulk(id, ids).await
    }
    async fn delete_all_questions(&self, id: &str) -> ApiResponse<Vec<Question>> {
        self.inner.delete_all_questions(id).await
    }
    async fn answers_for_question(&self, id: &str) -> ApiResponse<Vec<AnswerDetail>> {
        self.inner.answers_for_question(id).await
    }
    async fn answers_for_configuration(&self, id: &str) -> ApiResponse<Vec<AnswerDetail>> {
        self.inner.answers_for_configuration(id).await
    }
    async fn available_chains(&self) -> ApiResponse<Vec<AvailableChain>> {
        self.inner.available_chains().await
    }
    async fn select_chains(&self, id: &str, body: &ChainSelection) -> ApiResponse<Vec<Chain>> {
        self.inner.select_chains(id, body).await
    }
    async fn list_chains(&self, id: &str) -> ApiResponse<Vec<Chain>> {
        self.inner.list_chains(id).await
    }
    async fn get_chain(&self, id: &str, chain_id: &str) -> ApiResponse<Chain> {
        self.inner.get_chain(id, chain_id).await
    }
    async fn delete_chain(&self, id: &str, chain_id: &str) -> ApiResponse<Chain> {
        self.inner.delete_chain(id, chain_id).await
    }
    async fn list_configurations(&self, id: &str) -> ApiResponse<Vec<Configuration>> {
        self.inner.list_configurations(id).await
    }
    async fn get_configuration(&self, id: &str, cfg: &str) -> ApiResponse<Configuration> {
        self.inner.get_configuration(id, cfg).await
    }
    async fn create_configuration(
        &self,
        id: &str,
        body: &ConfigurationCreate,
    ) -> ApiResponse<Configuration> {
        self.inner.create_configuration(id, body).await
    }
    async fn update_configuration(
        &self,
        id: &str,
        cfg: &str,
        body: &ConfigurationUpdate,
    ) -> ApiResponse<Configuration> {
        self.inner.update_configuration(id, cfg, body).await
    }
    async fn delete_configuration(&self, id: &str, cfg: &str) -> ApiResponse<Configuration> {
        self.inner.delete_configuration(id, cfg).await
    }
    async fn configuration_score(&self, cfg: &str) -> ApiResponse<Option<f64>> {
        self.inner.configuration_score(cfg).await
    }
}

async fn context() -> EvalContext {
    let ctx = EvalContext::new(Arc::new(SlowScores {
        inner: DemoApi::seeded(),
    }));
    ctx.open_session(DEMO_SESSION_ID).await.unwrap();
    ctx.answers().fetch_for_question("q1").await;
    ctx.select_answer("q1", "cfg-1").await.unwrap();
    ctx
}

#[tokio::test(start_paused = true)]
async fn later_completion_wins() {
    let ctx = context().await;

    // Issued first, completes last.
    let slow = ctx.score_answer("q1", "q1-cfg-1", 5);
    // Issued second, completes first.
    let fast = async {
        tokio::task::yield_now().await;
        ctx.score_answer("q1", "q1-cfg-1", 1).await
    };
    let (slow, fast) = tokio::join!(slow, fast);
    assert_eq!(slow.unwrap().unwrap().answer.score, Some(Score::new(5).unwrap()));
    assert_eq!(fast.unwrap().unwrap().answer.score, Some(Score::new(1).unwrap()));

    let expected = Some(Score::new(5).unwrap());
    assert_eq!(ctx.answers().find("q1-cfg-1").await.unwrap().answer.score, expected);
    assert_eq!(ctx.selection().active().await.unwrap().answer.score, expected);
    assert_eq!(
        ctx.questions().answer_for("q1", "cfg-1").await.unwrap().answer.score,
        expected
    );
}

#[tokio::test(start_paused = true)]
async fn loading_stays_up_until_every_call_settles() {
    let ctx = context().await;

    let slow = ctx.score_answer("q1", "q1-cfg-1", 4);
    let observer = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let during = ctx.answers().status().is_loading();
        let fast = ctx.score_answer("q1", "q1-cfg-2", 0).await;
        (during, ctx.answers().status().is_loading(), fast)
    };
    let (_, (during, after_fast, fast)) = tokio::join!(slow, observer);

    assert!(during);
    assert!(fast.unwrap().is_some());
    // The slower call is still in flight when the faster one finishes.
    assert!(after_fast);
    assert!(!ctx.answers().status().is_loading());
}
