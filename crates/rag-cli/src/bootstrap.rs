use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use rag_client::{DemoApi, EvalApi, HttpApi};
use rag_config::{Backend, RagConfig};
use rag_store::EvalContext;

use crate::cli::GlobalFlags;

pub fn load_config() -> anyhow::Result<RagConfig> {
    RagConfig::load_with_dotenv().context("failed to load ragulator configuration")
}

/// Pick the backend: `--demo` or `api.backend = "demo"` selects the
/// in-memory one, anything else talks HTTP to `api.base_url`.
pub fn build_api(config: &RagConfig, force_demo: bool) -> anyhow::Result<Arc<dyn EvalApi>> {
    if force_demo || config.api.backend == Backend::Demo {
        tracing::debug!(latency_ms = config.demo.latency_ms, "using in-memory demo backend");
        let api = DemoApi::seeded().with_latency(Duration::from_millis(config.demo.latency_ms));
        return Ok(Arc::new(api));
    }

    let base_url = config.api.normalized_base_url();
    tracing::debug!(base_url, "using HTTP backend");
    let timeout = config.api.timeout_secs.map(Duration::from_secs);
    let api = HttpApi::new(base_url, timeout).context("failed to build HTTP client")?;
    Ok(Arc::new(api))
}

pub fn build_context(config: &RagConfig, flags: &GlobalFlags) -> anyhow::Result<EvalContext> {
    Ok(EvalContext::new(build_api(config, flags.demo)?))
}
