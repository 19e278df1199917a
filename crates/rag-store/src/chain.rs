//! Chain store: chain files offered by the server and the chains selected
//! for the session.

use std::sync::Arc;

use tokio::sync::Mutex;

use rag_client::EvalApi;
use rag_core::entities::{AvailableChain, Chain};
use rag_core::payloads::ChainSelection;

use crate::status::StoreStatus;

#[derive(Debug, Default)]
struct ChainState {
    available: Vec<AvailableChain>,
    chains: Vec<Chain>,
}

impl ChainState {
    fn upsert(&mut self, chain: Chain) {
        match self.chains.iter_mut().find(|c| c.id == chain.id) {
            Some(existing) => *existing = chain,
            None => self.chains.push(chain),
        }
    }
}

pub struct ChainStore {
    api: Arc<dyn EvalApi>,
    state: Mutex<ChainState>,
    status: StoreStatus,
}

impl ChainStore {
    #[must_use]
    pub fn new(api: Arc<dyn EvalApi>) -> Self {
        Self {
            api,
            state: Mutex::new(ChainState::default()),
            status: StoreStatus::new("chains"),
        }
    }

    #[must_use]
    pub const fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub async fn available(&self) -> Vec<AvailableChain> {
        self.state.lock().await.available.clone()
    }

    pub async fn chains(&self) -> Vec<Chain> {
        self.state.lock().await.chains.clone()
    }

    pub async fn seed(&self, chains: Vec<Chain>) {
        self.state.lock().await.chains = chains;
    }

    /// Forget the session's chains; the available list is not session data.
    pub async fn clear(&self) {
        self.state.lock().await.chains.clear();
    }

    pub async fn fetch_available(&self) -> bool {
        let _loading = self.status.begin().await;
        let response = self.api.available_chains().await;
        let Some(available) = self.status.settle("fetch_available", response).await else {
            return false;
        };
        self.state.lock().await.available = available;
        true
    }

    /// Attach chain files to the session.
    pub async fn select(&self, session_id: &str, file_names: &[String]) -> Option<Vec<Chain>> {
        let _loading = self.status.begin().await;
        let body = ChainSelection {
            file_names: file_names.to_vec(),
        };
        let response = self.api.select_chains(session_id, &body).await;
        let selected = self.status.settle("select", response).await?;

        let mut state = self.state.lock().await;
        for chain in &selected {
            state.upsert(chain.clone());
        }
        Some(selected)
    }

    pub async fn fetch_all(&self, session_id: &str) -> bool {
        let _loading = self.status.begin().await;
        let response = self.api.list_chains(session_id).await;
        let Some(chains) = self.status.settle("fetch_all", response).await else {
            return false;
        };
        self.seed(chains).await;
        true
    }

    pub async fn fetch_one(&self, session_id: &str, chain_id: &str) -> Option<Chain> {
        let _loading = self.status.begin().await;
        let response = self.api.get_chain(session_id, chain_id).await;
        let chain = self.status.settle("fetch_one", response).await?;
        self.state.lock().await.upsert(chain.clone());
        Some(chain)
    }

    pub async fn delete(&self, session_id: &str, chain_id: &str) -> bool {
        let _loading = self.status.begin().await;
        let response = self.api.delete_chain(session_id, chain_id).await;
        if self.status.settle("delete", response).await.is_none() {
            return false;
        }
        self.state.lock().await.chains.retain(|c| c.id != chain_id);
        true
    }
}
