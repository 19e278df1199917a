//! reqwest-backed [`EvalApi`] implementation.
//!
//! Every call sends exactly one request with a JSON body (when it has one)
//! and folds the outcome into an [`ApiResponse`]:
//! - **Transport failure** → [`ApiFailure::network`]
//! - **Non-success status** → the body's `detail` field as the message
//!   (falls back to a generic message), the parsed body as details
//! - **Success** → the body parsed as JSON; an unparseable body is a failure

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use rag_core::entities::{
    AnswerDetail, AvailableChain, Chain, Configuration, Question, QuestionDetail, Session,
    SessionDetail,
};
use rag_core::payloads::{
    AnswerUpdate, ChainSelection, ConfigurationCreate, ConfigurationUpdate, QuestionBulkCreate,
    QuestionBulkDelete, QuestionCreate, QuestionUpdate, SessionCreate, SessionUpdate,
};

use crate::envelope::{ApiFailure, ApiResponse, GENERIC_API_ERROR_MESSAGE};
use crate::error::ClientError;
use crate::{EvalApi, routes};

/// HTTP client for the evaluation backend's REST API.
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for `base_url` (a trailing slash is ignored).
    ///
    /// `timeout` bounds each request; `None` leaves requests unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent("ragulator/0.1");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    async fn send<T: DeserializeOwned>(&self, method: Method, path: &str) -> ApiResponse<T> {
        let builder = self.request(method.clone(), path);
        self.dispatch(builder, &method, path).await
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(method.clone(), path).json(body);
        self.dispatch(builder, &method, path).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> ApiResponse<T> {
        tracing::debug!(%method, path, "sending request");
        match builder.send().await {
            Ok(resp) => read_envelope(resp).await,
            Err(error) => {
                tracing::warn!(%method, path, %error, "request did not complete");
                ApiResponse::failed(ApiFailure::network(error))
            }
        }
    }
}

/// Fold an HTTP response into an [`ApiResponse`].
pub async fn read_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResponse<T> {
    let status = resp.status();
    let body = match resp.bytes().await {
        Ok(body) => body,
        Err(error) => return ApiResponse::failed(ApiFailure::network(error)),
    };

    if !status.is_success() {
        let details = parse_error_body(&body);
        let message = details
            .as_ref()
            .and_then(detail_message)
            .unwrap_or_else(|| GENERIC_API_ERROR_MESSAGE.to_string());
        let mut failure = ApiFailure::new(message).with_status(status.as_u16());
        if let Some(details) = details {
            failure = failure.with_details(details);
        }
        return ApiResponse::failed(failure);
    }

    match serde_json::from_slice::<T>(&body) {
        Ok(data) => ApiResponse::ok(data),
        Err(error) => ApiResponse::failed(
            ApiFailure::new(format!("Invalid response body: {error}"))
                .with_status(status.as_u16())
                .with_details(Value::String(String::from_utf8_lossy(&body).into_owned())),
        ),
    }
}

/// Parse an error body as JSON, keeping non-JSON text as a string.
fn parse_error_body(body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body)
        .ok()
        .or_else(|| Some(Value::String(String::from_utf8_lossy(body).into_owned())))
}

/// Extract the server-supplied message from an error body.
///
/// The backend reports `{"detail": "..."}`; validation failures carry a
/// structured `detail`, which is rendered as compact JSON.
fn detail_message(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl EvalApi for HttpApi {
    async fn list_sessions(&self) -> ApiResponse<Vec<SessionDetail>> {
        self.send(Method::GET, &routes::sessions()).await
    }

    async fn get_session(&self, session_id: &str) -> ApiResponse<SessionDetail> {
        self.send(Method::GET, &routes::session(session_id)).await
    }

    async fn create_session(&self, body: &SessionCreate) -> ApiResponse<Session> {
        self.send_json(Method::POST, &routes::sessions(), body).await
    }

    async fn update_session(
        &self,
        session_id: &str,
        body: &SessionUpdate,
    ) -> ApiResponse<Session> {
        self.send_json(Method::PATCH, &routes::session(session_id), body)
            .await
    }

    async fn delete_session(&self, session_id: &str) -> ApiResponse<Session> {
        self.send(Method::DELETE, &routes::session(session_id)).await
    }

    async fn list_questions(&self, session_id: &str) -> ApiResponse<Vec<QuestionDetail>> {
        self.send(Method::GET, &routes::questions(session_id)).await
    }

    async fn create_question(
        &self,
        session_id: &str,
        body: &QuestionCreate,
    ) -> ApiResponse<Question> {
        self.send_json(Method::POST, &routes::questions(session_id), body)
            .await
    }

    async fn create_questions_bulk(
        &self,
        session_id: &str,
        questions: &[QuestionCreate],
    ) -> ApiResponse<Vec<Question>> {
        let body = QuestionBulkCreate {
            questions: questions.to_vec(),
        };
        self.send_json(Method::POST, &routes::questions_bulk(session_id), &body)
            .await
    }

    async fn update_question(
        &self,
        session_id: &str,
        question_id: &str,
        body: &QuestionUpdate,
    ) -> ApiResponse<QuestionDetail> {
        self.send_json(
            Method::PATCH,
            &routes::question(session_id, question_id),
            body,
        )
        .await
    }

    async fn delete_question(&self, session_id: &str, question_id: &str) -> ApiResponse<Question> {
        self.send(Method::DELETE, &routes::question(session_id, question_id))
            .await
    }

    async fn delete_questions_bulk(
        &self,
        session_id: &str,
        question_ids: &[String],
    ) -> ApiResponse<Vec<Question>> {
        let body = QuestionBulkDelete {
            question_ids: question_ids.to_vec(),
        };
        self.send_json(Method::DELETE, &routes::questions_bulk(session_id), &body)
            .await
    }

    async fn delete_all_questions(&self, session_id: &str) -> ApiResponse<Vec<Question>> {
        self.send(Method::DELETE, &routes::questions(session_id)).await
    }

    async fn answers_for_question(&self, question_id: &str) -> ApiResponse<Vec<AnswerDetail>> {
        self.send(Method::GET, &routes::question_answers(question_id))
            .await
    }

    async fn answers_for_configuration(
        &self,
        configuration_id: &str,
    ) -> ApiResponse<Vec<AnswerDetail>> {
        self.send(Method::GET, &routes::configuration_answers(configuration_id))
            .await
    }

    async fn update_answer_score(
        &self,
        question_id: &str,
        answer_id: &str,
        body: &AnswerUpdate,
    ) -> ApiResponse<AnswerDetail> {
        self.send_json(
            Method::PATCH,
            &routes::question_answer(question_id, answer_id),
            body,
        )
        .await
    }

    async fn available_chains(&self) -> ApiResponse<Vec<AvailableChain>> {
        self.send(Method::GET, &routes::available_chains()).await
    }

    async fn select_chains(
        &self,
        session_id: &str,
        body: &ChainSelection,
    ) -> ApiResponse<Vec<Chain>> {
        self.send_json(Method::POST, &routes::select_chains(session_id), body)
            .await
    }

    async fn list_chains(&self, session_id: &str) -> ApiResponse<Vec<Chain>> {
        self.send(Method::GET, &routes::chains(session_id)).await
    }

    async fn get_chain(&self, session_id: &str, chain_id: &str) -> ApiResponse<Chain> {
        self.send(Method::GET, &routes::chain(session_id, chain_id))
            .await
    }

    async fn delete_chain(&self, session_id: &str, chain_id: &str) -> ApiResponse<Chain> {
        self.send(Method::DELETE, &routes::chain(session_id, chain_id))
            .await
    }

    async fn list_configurations(&self, session_id: &str) -> ApiResponse<Vec<Configuration>> {
        self.send(Method::GET, &routes::configurations(session_id))
            .await
    }

    async fn get_configuration(
        &self,
        session_id: &str,
        configuration_id: &str,
    ) -> ApiResponse<Configuration> {
        self.send(
            Method::GET,
            &routes::configuration(session_id, configuration_id),
        )
        .await
    }

    async fn create_configuration(
        &self,
        session_id: &str,
        body: &ConfigurationCreate,
    ) -> ApiResponse<Configuration> {
        self.send_json(Method::POST, &routes::configurations(session_id), body)
            .await
    }

    async fn update_configuration(
        &self,
        session_id: &str,
        configuration_id: &str,
        body: &ConfigurationUpdate,
    ) -> ApiResponse<Configuration> {
        self.send_json(
            Method::PATCH,
            &routes::configuration(session_id, configuration_id),
            body,
        )
        .await
    }

    async fn delete_configuration(
        &self,
        session_id: &str,
        configuration_id: &str,
    ) -> ApiResponse<Configuration> {
        self.send(
            Method::DELETE,
            &routes::configuration(session_id, configuration_id),
        )
        .await
    }

    async fn configuration_score(&self, configuration_id: &str) -> ApiResponse<Option<f64>> {
        self.send(Method::GET, &routes::configuration_score(configuration_id))
            .await
    }
}
