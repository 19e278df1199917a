//! Session store.
//!
//! Holds the session list and the currently open session.

use std::sync::Arc;

use tokio::sync::Mutex;

use rag_client::EvalApi;
use rag_core::entities::{Session, SessionDetail};
use rag_core::payloads::{SessionCreate, SessionUpdate};

use crate::status::StoreStatus;

#[derive(Debug, Default)]
struct SessionState {
    current: Option<SessionDetail>,
    sessions: Vec<SessionDetail>,
}

pub struct SessionStore {
    api: Arc<dyn EvalApi>,
    state: Mutex<SessionState>,
    status: StoreStatus,
}

impl SessionStore {
    #[must_use]
    pub fn new(api: Arc<dyn EvalApi>) -> Self {
        Self {
            api,
            state: Mutex::new(SessionState::default()),
            status: StoreStatus::new("sessions"),
        }
    }

    #[must_use]
    pub const fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub async fn current(&self) -> Option<SessionDetail> {
        self.state.lock().await.current.clone()
    }

    pub async fn current_id(&self) -> Option<String> {
        self.state
            .lock()
            .await
            .current
            .as_ref()
            .map(|s| s.id().to_string())
    }

    pub async fn sessions(&self) -> Vec<SessionDetail> {
        self.state.lock().await.sessions.clone()
    }

    /// Replace the session list with the server's.
    pub async fn fetch_all(&self) -> bool {
        let _loading = self.status.begin().await;
        let response = self.api.list_sessions().await;
        let Some(sessions) = self.status.settle("fetch_all", response).await else {
            return false;
        };
        tracing::debug!(count = sessions.len(), "sessions fetched");
        self.state.lock().await.sessions = sessions;
        true
    }

    /// Load one session and make it current.
    pub async fn fetch_one(&self, session_id: &str) -> Option<SessionDetail> {
        let _loading = self.status.begin().await;
        let response = self.api.get_session(session_id).await;
        let detail = self.status.settle("fetch_one", response).await?;
        self.state.lock().await.current = Some(detail.clone());
        Some(detail)
    }

    /// Create a session, make it current and append it to the list.
    pub async fn create(&self, body: &SessionCreate) -> Option<Session> {
        let _loading = self.status.begin().await;
        let response = self.api.create_session(body).await;
        let session = self.status.settle("create", response).await?;

        let mut state = self.state.lock().await;
        let detail = SessionDetail::from(session.clone());
        state.current = Some(detail.clone());
        state.sessions.push(detail);
        Some(session)
    }

    /// Patch a session; the current session and the list entry follow.
    pub async fn update(&self, session_id: &str, body: &SessionUpdate) -> Option<Session> {
        let _loading = self.status.begin().await;
        let response = self.api.update_session(session_id, body).await;
        let session = self.status.settle("update", response).await?;

        let mut state = self.state.lock().await;
        if let Some(current) = state.current.as_mut().filter(|c| c.id() == session.id) {
            current.session = session.clone();
        }
        if let Some(entry) = state.sessions.iter_mut().find(|s| s.id() == session.id) {
            entry.session = session.clone();
        }
        Some(session)
    }

    /// Delete a session, closing it if it is current.
    pub async fn delete(&self, session_id: &str) -> bool {
        let _loading = self.status.begin().await;
        let response = self.api.delete_session(session_id).await;
        if self.status.settle("delete", response).await.is_none() {
            return false;
        }

        let mut state = self.state.lock().await;
        if state.current.as_ref().is_some_and(|c| c.id() == session_id) {
            state.current = None;
        }
        state.sessions.retain(|s| s.id() != session_id);
        true
    }
}
