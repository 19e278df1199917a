//! Configuration store: the session's prompt/parameter sets and their
//! average scores.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use rag_client::EvalApi;
use rag_core::entities::Configuration;
use rag_core::payloads::{ConfigurationCreate, ConfigurationUpdate};

use crate::status::StoreStatus;

#[derive(Debug, Default)]
struct ConfigurationState {
    configurations: Vec<Configuration>,
    /// Average score per configuration id; `None` while nothing is scored.
    scores: BTreeMap<String, Option<f64>>,
}

impl ConfigurationState {
    fn upsert(&mut self, configuration: Configuration) {
        match self
            .configurations
            .iter_mut()
            .find(|c| c.id == configuration.id)
        {
            Some(existing) => *existing = configuration,
            None => self.configurations.push(configuration),
        }
    }
}

pub struct ConfigurationStore {
    api: Arc<dyn EvalApi>,
    state: Mutex<ConfigurationState>,
    status: StoreStatus,
}

impl ConfigurationStore {
    #[must_use]
    pub fn new(api: Arc<dyn EvalApi>) -> Self {
        Self {
            api,
            state: Mutex::new(ConfigurationState::default()),
            status: StoreStatus::new("configurations"),
        }
    }

    #[must_use]
    pub const fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub async fn configurations(&self) -> Vec<Configuration> {
        self.state.lock().await.configurations.clone()
    }

    pub async fn find(&self, configuration_id: &str) -> Option<Configuration> {
        self.state
            .lock()
            .await
            .configurations
            .iter()
            .find(|c| c.id == configuration_id)
            .cloned()
    }

    /// Last fetched average score; `None` if not fetched or nothing scored.
    pub async fn score(&self, configuration_id: &str) -> Option<f64> {
        self.state
            .lock()
            .await
            .scores
            .get(configuration_id)
            .copied()
            .flatten()
    }

    pub async fn scores(&self) -> BTreeMap<String, Option<f64>> {
        self.state.lock().await.scores.clone()
    }

    pub async fn seed(&self, configurations: Vec<Configuration>) {
        let mut state = self.state.lock().await;
        state.configurations = configurations;
        state.scores.clear();
    }

    pub async fn clear(&self) {
        self.seed(Vec::new()).await;
    }

    pub async fn fetch_all(&self, session_id: &str) -> bool {
        let _loading = self.status.begin().await;
        let response = self.api.list_configurations(session_id).await;
        let Some(configurations) = self.status.settle("fetch_all", response).await else {
            return false;
        };
        self.state.lock().await.configurations = configurations;
        true
    }

    pub async fn fetch_one(
        &self,
        session_id: &str,
        configuration_id: &str,
    ) -> Option<Configuration> {
        let _loading = self.status.begin().await;
        let response = self.api.get_configuration(session_id, configuration_id).await;
        let configuration = self.status.settle("fetch_one", response).await?;
        self.state.lock().await.upsert(configuration.clone());
        Some(configuration)
    }

    pub async fn create(
        &self,
        session_id: &str,
        body: &ConfigurationCreate,
    ) -> Option<Configuration> {
        let _loading = self.status.begin().await;
        let response = self.api.create_configuration(session_id, body).await;
        let configuration = self.status.settle("create", response).await?;
        self.state
            .lock()
            .await
            .configurations
            .push(configuration.clone());
        Some(configuration)
    }

    pub async fn update(
        &self,
        session_id: &str,
        configuration_id: &str,
        body: &ConfigurationUpdate,
    ) -> Option<Configuration> {
        let _loading = self.status.begin().await;
        let response = self
            .api
            .update_configuration(session_id, configuration_id, body)
            .await;
        let configuration = self.status.settle("update", response).await?;

        let mut state = self.state.lock().await;
        if let Some(existing) = state
            .configurations
            .iter_mut()
            .find(|c| c.id == configuration.id)
        {
            existing.clone_from(&configuration);
        }
        Some(configuration)
    }

    pub async fn delete(&self, session_id: &str, configuration_id: &str) -> bool {
        let _loading = self.status.begin().await;
        let response = self
            .api
            .delete_configuration(session_id, configuration_id)
            .await;
        if self.status.settle("delete", response).await.is_none() {
            return false;
        }

        let mut state = self.state.lock().await;
        state.configurations.retain(|c| c.id != configuration_id);
        state.scores.remove(configuration_id);
        true
    }

    /// Fetch and record a configuration's average score.
    pub async fn fetch_score(&self, configuration_id: &str) -> bool {
        let _loading = self.status.begin().await;
        let response = self.api.configuration_score(configuration_id).await;
        let Some(score) = self.status.settle("fetch_score", response).await else {
            return false;
        };
        self.state
            .lock()
            .await
            .scores
            .insert(configuration_id.to_string(), score);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rag_client::DemoApi;
    use rag_client::demo::DEMO_SESSION_ID;
    use rag_core::Score;
    use rag_core::entities::{ParamMap, ParamValue};
    use rag_core::payloads::AnswerUpdate;

    #[tokio::test]
    async fn create_update_delete() {
        let store = ConfigurationStore::new(Arc::new(DemoApi::seeded()));
        store.fetch_all(DEMO_SESSION_ID).await;

        let body = ConfigurationCreate {
            prompt_template: None,
            llm_parameters: Some(ParamMap::from([("temperature".into(), ParamValue::from(0.2))])),
        };
        let created = store.create(DEMO_SESSION_ID, &body).await.unwrap();
        assert_eq!(store.configurations().await.len(), 3);

        let patch = ConfigurationUpdate {
            prompt_template: None,
            llm_parameters: Some(ParamMap::from([("top_p".into(), ParamValue::from(0.9))])),
        };
        store.update(DEMO_SESSION_ID, &created.id, &patch).await.unwrap();
        let held = store.find(&created.id).await.unwrap();
        assert!(held.llm_parameters.unwrap().contains_key("top_p"));

        assert!(store.delete(DEMO_SESSION_ID, &created.id).await);
        assert_eq!(store.find(&created.id).await, None);
    }

    #[tokio::test]
    async fn scores_may_be_absent() {
        let api = Arc::new(DemoApi::seeded());
        let store = ConfigurationStore::new(Arc::clone(&api) as Arc<dyn EvalApi>);

        assert!(store.fetch_score("cfg-1").await);
        assert_eq!(store.scores().await.get("cfg-1"), Some(&None));

        let body = AnswerUpdate {
            score: Some(Score::new(5).unwrap()),
        };
        api.update_answer_score("q1", "q1-cfg-1", &body)
            .await
            .into_result()
            .unwrap();
        assert!(store.fetch_score("cfg-1").await);
        assert_eq!(store.score("cfg-1").await, Some(5.0));

        assert!(store.delete(DEMO_SESSION_ID, "cfg-1").await);
        assert!(store.scores().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_configuration_records_error() {
        let store = ConfigurationStore::new(Arc::new(DemoApi::seeded()));
        assert!(!store.fetch_score("nope").await);
        assert_eq!(
            store.status().error().await.as_deref(),
            Some("Configuration not found")
        );
    }
}
