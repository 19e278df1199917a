//! In-memory evaluation backend.
//!
//! [`DemoApi`] answers every [`EvalApi`] call from process memory, with an
//! optional simulated latency. It keeps the REST contract: unknown
//! identifiers produce 404 failures, invalid bodies 422 failures, and
//! deleting a session removes everything it owns.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use rag_core::entities::{
    Answer, AnswerDetail, AvailableChain, Chain, Configuration, ParamMap, ParamValue, Question,
    QuestionDetail, Session, SessionDetail,
};
use rag_core::payloads::{
    AnswerUpdate, ChainSelection, ConfigurationCreate, ConfigurationUpdate, QuestionCreate,
    QuestionUpdate, SessionCreate, SessionUpdate,
};

use crate::envelope::{ApiFailure, ApiResponse};
use crate::support::ServiceSupport;
use crate::EvalApi;

/// Identifier of the session created by [`DemoApi::seeded`].
pub const DEMO_SESSION_ID: &str = "demo-session";

#[derive(Debug, Default)]
struct DemoState {
    sessions: Vec<Session>,
    questions: Vec<Question>,
    answers: Vec<AnswerDetail>,
    chains: Vec<Chain>,
    configurations: Vec<Configuration>,
    available: Vec<AvailableChain>,
}

impl DemoState {
    fn with_chain_files() -> Self {
        Self {
            available: ["simple_chain.py", "config_chain.py", "configurable_prompt_chain.py"]
                .into_iter()
                .map(|file_name| AvailableChain {
                    file_name: file_name.to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }

    fn session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    fn question_detail(&self, question: &Question) -> QuestionDetail {
        QuestionDetail {
            question: question.clone(),
            answers: self
                .answers
                .iter()
                .filter(|a| a.answer.question_id == question.id)
                .cloned()
                .collect(),
        }
    }

    fn session_detail(&self, session: &Session) -> SessionDetail {
        SessionDetail {
            session: session.clone(),
            chains: self
                .chains
                .iter()
                .filter(|c| c.session_id == session.id)
                .cloned()
                .collect(),
            questions: self
                .questions
                .iter()
                .filter(|q| q.session_id == session.id)
                .map(|q| self.question_detail(q))
                .collect(),
            configurations: self
                .configurations
                .iter()
                .filter(|c| c.session_id == session.id)
                .cloned()
                .collect(),
        }
    }

    /// Remove questions matching `predicate` together with their answers.
    fn remove_questions(&mut self, predicate: impl Fn(&Question) -> bool) -> Vec<Question> {
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.questions).into_iter().partition(|q| predicate(q));
        self.questions = kept;
        self.answers
            .retain(|a| !removed.iter().any(|q| q.id == a.answer.question_id));
        removed
    }

    /// Store a generated answer. A regeneration for the same (question,
    /// configuration) pair replaces the earlier answer.
    fn record_answer(&mut self, answer: AnswerDetail) {
        match self.answers.iter_mut().find(|a| a.same_pair(&answer)) {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
    }
}

/// In-memory [`EvalApi`] used for offline demos and tests.
pub struct DemoApi {
    state: Mutex<DemoState>,
    latency: Duration,
}

impl Default for DemoApi {
    fn default() -> Self {
        Self::empty()
    }
}

impl ServiceSupport for DemoApi {
    fn service_name(&self) -> &'static str {
        "demo-api"
    }
}

impl DemoApi {
    /// A backend with no sessions and the standard chain files on offer.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_state(DemoState::with_chain_files())
    }

    fn from_state(state: DemoState) -> Self {
        Self {
            state: Mutex::new(state),
            latency: Duration::ZERO,
        }
    }

    /// A backend holding one demo session ([`DEMO_SESSION_ID`]) with two
    /// questions (`q1`, `q2`), two configurations (`cfg-1`, `cfg-2`), one
    /// chain (`chain-1`) and an unscored answer for every pair.
    #[must_use]
    pub fn seeded() -> Self {
        let now = Utc::now();
        let mut state = DemoState::with_chain_files();

        state.sessions.push(Session {
            id: DEMO_SESSION_ID.into(),
            name: "Demo evaluation".into(),
            description: Some("Seeded session for offline use".into()),
            created_at: now,
            last_modified: now,
        });
        state.chains.push(Chain {
            id: "chain-1".into(),
            file_name: "simple_chain.py".into(),
            session_id: DEMO_SESSION_ID.into(),
            created_at: now,
        });
        for (id, temperature) in [("cfg-1", 0.0), ("cfg-2", 0.7)] {
            state.configurations.push(Configuration {
                id: id.into(),
                session_id: DEMO_SESSION_ID.into(),
                prompt_template: Some(ParamMap::from([(
                    "system".to_string(),
                    ParamValue::from("Answer the question concisely."),
                )])),
                llm_parameters: Some(ParamMap::from([(
                    "temperature".to_string(),
                    ParamValue::from(temperature),
                )])),
                created_at: now,
            });
        }

        let fixtures = [
            (
                "q1",
                "What is the capital of France?",
                "Paris",
                ["Paris", "Paris, the City of Light"],
            ),
            (
                "q2",
                "Who wrote 'Romeo and Juliet'?",
                "William Shakespeare",
                ["William Shakespeare", "The Bard of Avon, William Shakespeare"],
            ),
        ];
        for (question_id, text, expected, answers) in fixtures {
            state.questions.push(Question {
                id: question_id.into(),
                session_id: DEMO_SESSION_ID.into(),
                question_text: text.into(),
                expected_answer: Some(expected.into()),
                created_at: now,
                last_modified: now,
            });
            for (configuration_id, generated) in ["cfg-1", "cfg-2"].into_iter().zip(answers) {
                state.record_answer(AnswerDetail::from(Answer {
                    id: format!("{question_id}-{configuration_id}"),
                    question_id: question_id.into(),
                    chain_id: "chain-1".into(),
                    configuration_id: configuration_id.into(),
                    generated_answer: generated.into(),
                    score: None,
                    created_at: now,
                }));
            }
        }

        Self::from_state(state)
    }

    /// Delay every call by `latency` before it touches state.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn settle(&self) {
        if !self.latency.is_zero() {
            self.delay(self.latency).await;
        }
    }

    fn new_id(prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4().simple())
    }

    fn not_found<T>(&self, kind: &str, id: &str, context: &str) -> ApiResponse<T> {
        let message = format!("{kind} not found");
        let failure = ApiFailure::new(message.clone())
            .with_status(404)
            .with_details(serde_json::json!({ "detail": message, "id": id }));
        ApiResponse::failed(self.handle_error(failure, context))
    }

    fn invalid<T>(&self, message: &str, context: &str) -> ApiResponse<T> {
        let failure = ApiFailure::new(message)
            .with_status(422)
            .with_details(serde_json::json!({ "detail": message }));
        ApiResponse::failed(self.handle_error(failure, context))
    }
}

#[async_trait]
impl EvalApi for DemoApi {
    async fn list_sessions(&self) -> ApiResponse<Vec<SessionDetail>> {
        self.settle().await;
        let state = self.state.lock().await;
        ApiResponse::ok(
            state
                .sessions
                .iter()
                .map(|s| state.session_detail(s))
                .collect(),
        )
    }

    async fn get_session(&self, session_id: &str) -> ApiResponse<SessionDetail> {
        self.settle().await;
        let state = self.state.lock().await;
        match state.session(session_id) {
            Some(session) => ApiResponse::ok(state.session_detail(session)),
            None => self.not_found("Session", session_id, "demo.get_session"),
        }
    }

    async fn create_session(&self, body: &SessionCreate) -> ApiResponse<Session> {
        self.settle().await;
        if body.name.trim().is_empty() {
            return self.invalid("Session name must not be empty", "demo.create_session");
        }
        let now = Utc::now();
        let session = Session {
            id: Self::new_id("ses"),
            name: body.name.trim().to_string(),
            description: body.description.clone(),
            created_at: now,
            last_modified: now,
        };
        self.state.lock().await.sessions.push(session.clone());
        ApiResponse::ok(session)
    }

    async fn update_session(
        &self,
        session_id: &str,
        body: &SessionUpdate,
    ) -> ApiResponse<Session> {
        self.settle().await;
        let mut state = self.state.lock().await;
        let Some(session) = state.sessions.iter_mut().find(|s| s.id == session_id) else {
            return self.not_found("Session", session_id, "demo.update_session");
        };
        if let Some(name) = &body.name {
            session.name.clone_from(name);
        }
        if let Some(description) = &body.description {
            session.description = Some(description.clone());
        }
        session.last_modified = Utc::now();
        ApiResponse::ok(session.clone())
    }

    async fn delete_session(&self, session_id: &str) -> ApiResponse<Session> {
        self.settle().await;
        let mut state = self.state.lock().await;
        let Some(index) = state.sessions.iter().position(|s| s.id == session_id) else {
            return self.not_found("Session", session_id, "demo.delete_session");
        };
        let session = state.sessions.remove(index);
        state.remove_questions(|q| q.session_id == session_id);
        state.chains.retain(|c| c.session_id != session_id);
        state.configurations.retain(|c| c.session_id != session_id);
        ApiResponse::ok(session)
    }

    async fn list_questions(&self, session_id: &str) -> ApiResponse<Vec<QuestionDetail>> {
        self.settle().await;
        let state = self.state.lock().await;
        if state.session(session_id).is_none() {
            return self.not_found("Session", session_id, "demo.list_questions");
        }
        ApiResponse::ok(
            state
                .questions
                .iter()
                .filter(|q| q.session_id == session_id)
                .map(|q| state.question_detail(q))
                .collect(),
        )
    }

    async fn create_question(
        &self,
        session_id: &str,
        body: &QuestionCreate,
    ) -> ApiResponse<Question> {
        self.create_questions_bulk(session_id, std::slice::from_ref(body))
            .await
            .map(|mut created| created.remove(0))
    }

    async fn create_questions_bulk(
        &self,
        session_id: &str,
        questions: &[QuestionCreate],
    ) -> ApiResponse<Vec<Question>> {
        self.settle().await;
        if questions.iter().any(|q| q.question_text.trim().is_empty()) {
            return self.invalid("Question text must not be empty", "demo.create_questions");
        }
        let mut state = self.state.lock().await;
        if state.session(session_id).is_none() {
            return self.not_found("Session", session_id, "demo.create_questions");
        }
        let now = Utc::now();
        let created: Vec<Question> = questions
            .iter()
            .map(|q| Question {
                id: Self::new_id("q"),
                session_id: session_id.to_string(),
                question_text: q.question_text.clone(),
                expected_answer: q.expected_answer.clone(),
                created_at: now,
                last_modified: now,
            })
            .collect();
        state.questions.extend(created.iter().cloned());
        ApiResponse::ok(created)
    }

    async fn update_question(
        &self,
        session_id: &str,
        question_id: &str,
        body: &QuestionUpdate,
    ) -> ApiResponse<QuestionDetail> {
        self.settle().await;
        let mut state = self.state.lock().await;
        let Some(question) = state
            .questions
            .iter_mut()
            .find(|q| q.session_id == session_id && q.id == question_id)
        else {
            return self.not_found("Question", question_id, "demo.update_question");
        };
        if let Some(text) = &body.question_text {
            question.question_text.clone_from(text);
        }
        if let Some(expected) = &body.expected_answer {
            question.expected_answer = Some(expected.clone());
        }
        question.last_modified = Utc::now();
        let question = question.clone();
        ApiResponse::ok(state.question_detail(&question))
    }

    async fn delete_question(&self, session_id: &str, question_id: &str) -> ApiResponse<Question> {
        self.settle().await;
        let mut state = self.state.lock().await;
        let mut removed =
            state.remove_questions(|q| q.session_id == session_id && q.id == question_id);
        match removed.pop() {
            Some(question) => ApiResponse::ok(question),
            None => self.not_found("Question", question_id, "demo.delete_question"),
        }
    }

    async fn delete_questions_bulk(
        &self,
        session_id: &str,
        question_ids: &[String],
    ) -> ApiResponse<Vec<Question>> {
        self.settle().await;
        let mut state = self.state.lock().await;
        ApiResponse::ok(state.remove_questions(|q| {
            q.session_id == session_id && question_ids.iter().any(|id| *id == q.id)
        }))
    }

    async fn delete_all_questions(&self, session_id: &str) -> ApiResponse<Vec<Question>> {
        self.settle().await;
        let mut state = self.state.lock().await;
        if state.session(session_id).is_none() {
            return self.not_found("Session", session_id, "demo.delete_all_questions");
        }
        ApiResponse::ok(state.remove_questions(|q| q.session_id == session_id))
    }

    async fn answers_for_question(&self, question_id: &str) -> ApiResponse<Vec<AnswerDetail>> {
        self.settle().await;
        let state = self.state.lock().await;
        match state.questions.iter().find(|q| q.id == question_id) {
            Some(question) => ApiResponse::ok(state.question_detail(question).answers),
            None => self.not_found("Question", question_id, "demo.answers_for_question"),
        }
    }

    async fn answers_for_configuration(
        &self,
        configuration_id: &str,
    ) -> ApiResponse<Vec<AnswerDetail>> {
        self.settle().await;
        let state = self.state.lock().await;
        if !state.configurations.iter().any(|c| c.id == configuration_id) {
            return self.not_found(
                "Configuration",
                configuration_id,
                "demo.answers_for_configuration",
            );
        }
        ApiResponse::ok(
            state
                .answers
                .iter()
                .filter(|a| a.answer.configuration_id == configuration_id)
                .cloned()
                .collect(),
        )
    }

    async fn update_answer_score(
        &self,
        question_id: &str,
        answer_id: &str,
        body: &AnswerUpdate,
    ) -> ApiResponse<AnswerDetail> {
        self.settle().await;
        let mut state = self.state.lock().await;
        let Some(answer) = state
            .answers
            .iter_mut()
            .find(|a| a.answer.id == answer_id && a.answer.question_id == question_id)
        else {
            return self.not_found("Answer", answer_id, "demo.update_answer_score");
        };
        if body.score.is_some() {
            answer.answer.score = body.score;
        }
        ApiResponse::ok(answer.clone())
    }

    async fn available_chains(&self) -> ApiResponse<Vec<AvailableChain>> {
        self.settle().await;
        ApiResponse::ok(self.state.lock().await.available.clone())
    }

    async fn select_chains(
        &self,
        session_id: &str,
        body: &ChainSelection,
    ) -> ApiResponse<Vec<Chain>> {
        self.settle().await;
        let mut state = self.state.lock().await;
        if state.session(session_id).is_none() {
            return self.not_found("Session", session_id, "demo.select_chains");
        }
        if let Some(missing) = body
            .file_names
            .iter()
            .find(|name| !state.available.iter().any(|a| a.file_name == **name))
        {
            return self.not_found("Chain file", missing, "demo.select_chains");
        }

        let now = Utc::now();
        let mut selected = Vec::with_capacity(body.file_names.len());
        for file_name in &body.file_names {
            let existing = state
                .chains
                .iter()
                .find(|c| c.session_id == session_id && c.file_name == *file_name)
                .cloned();
            let chain = existing.unwrap_or_else(|| {
                let chain = Chain {
                    id: Self::new_id("chain"),
                    file_name: file_name.clone(),
                    session_id: session_id.to_string(),
                    created_at: now,
                };
                state.chains.push(chain.clone());
                chain
            });
            selected.push(chain);
        }
        ApiResponse::ok(selected)
    }

    async fn list_chains(&self, session_id: &str) -> ApiResponse<Vec<Chain>> {
        self.settle().await;
        let state = self.state.lock().await;
        match state.session(session_id) {
            Some(session) => ApiResponse::ok(state.session_detail(session).chains),
            None => self.not_found("Session", session_id, "demo.list_chains"),
        }
    }

    async fn get_chain(&self, session_id: &str, chain_id: &str) -> ApiResponse<Chain> {
        self.settle().await;
        let state = self.state.lock().await;
        match state
            .chains
            .iter()
            .find(|c| c.session_id == session_id && c.id == chain_id)
        {
            Some(chain) => ApiResponse::ok(chain.clone()),
            None => self.not_found("Chain", chain_id, "demo.get_chain"),
        }
    }

    async fn delete_chain(&self, session_id: &str, chain_id: &str) -> ApiResponse<Chain> {
        self.settle().await;
        let mut state = self.state.lock().await;
        match state
            .chains
            .iter()
            .position(|c| c.session_id == session_id && c.id == chain_id)
        {
            Some(index) => ApiResponse::ok(state.chains.remove(index)),
            None => self.not_found("Chain", chain_id, "demo.delete_chain"),
        }
    }

    async fn list_configurations(&self, session_id: &str) -> ApiResponse<Vec<Configuration>> {
        self.settle().await;
        let state = self.state.lock().await;
        match state.session(session_id) {
            Some(session) => ApiResponse::ok(state.session_detail(session).configurations),
            None => self.not_found("Session", session_id, "demo.list_configurations"),
        }
    }

    async fn get_configuration(
        &self,
        session_id: &str,
        configuration_id: &str,
    ) -> ApiResponse<Configuration> {
        self.settle().await;
        let state = self.state.lock().await;
        match state
            .configurations
            .iter()
            .find(|c| c.session_id == session_id && c.id == configuration_id)
        {
            Some(configuration) => ApiResponse::ok(configuration.clone()),
            None => self.not_found("Configuration", configuration_id, "demo.get_configuration"),
        }
    }

    async fn create_configuration(
        &self,
        session_id: &str,
        body: &ConfigurationCreate,
    ) -> ApiResponse<Configuration> {
        self.settle().await;
        let mut state = self.state.lock().await;
        if state.session(session_id).is_none() {
            return self.not_found("Session", session_id, "demo.create_configuration");
        }
        let configuration = Configuration {
            id: Self::new_id("cfg"),
            session_id: session_id.to_string(),
            prompt_template: body.prompt_template.clone(),
            llm_parameters: body.llm_parameters.clone(),
            created_at: Utc::now(),
        };
        state.configurations.push(configuration.clone());
        ApiResponse::ok(configuration)
    }

    async fn update_configuration(
        &self,
        session_id: &str,
        configuration_id: &str,
        body: &ConfigurationUpdate,
    ) -> ApiResponse<Configuration> {
        self.settle().await;
        let mut state = self.state.lock().await;
        let Some(configuration) = state
            .configurations
            .iter_mut()
            .find(|c| c.session_id == session_id && c.id == configuration_id)
        else {
            return self.not_found("Configuration", configuration_id, "demo.update_configuration");
        };
        if body.prompt_template.is_some() {
            configuration.prompt_template.clone_from(&body.prompt_template);
        }
        if body.llm_parameters.is_some() {
            configuration.llm_parameters.clone_from(&body.llm_parameters);
        }
        ApiResponse::ok(configuration.clone())
    }

    async fn delete_configuration(
        &self,
        session_id: &str,
        configuration_id: &str,
    ) -> ApiResponse<Configuration> {
        self.settle().await;
        let mut state = self.state.lock().await;
        match state
            .configurations
            .iter()
            .position(|c| c.session_id == session_id && c.id == configuration_id)
        {
            Some(index) => {
                let configuration = state.configurations.remove(index);
                state
                    .answers
                    .retain(|a| a.answer.configuration_id != configuration_id);
                ApiResponse::ok(configuration)
            }
            None => self.not_found("Configuration", configuration_id, "demo.delete_configuration"),
        }
    }

    async fn configuration_score(&self, configuration_id: &str) -> ApiResponse<Option<f64>> {
        self.settle().await;
        let state = self.state.lock().await;
        if !state.configurations.iter().any(|c| c.id == configuration_id) {
            return self.not_found("Configuration", configuration_id, "demo.configuration_score");
        }
        let scores: Vec<f64> = state
            .answers
            .iter()
            .filter(|a| a.answer.configuration_id == configuration_id)
            .filter_map(|a| a.answer.score)
            .map(|s| f64::from(s.value()))
            .collect();
        if scores.is_empty() {
            return ApiResponse::ok(None);
        }
        #[allow(clippy::cast_precision_loss)]
        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        ApiResponse::ok(Some(average))
    }
}
