use anyhow::{anyhow, bail};

use rag_core::entities::{ParamMap, ParamValue, SessionDetail};
use rag_store::{EvalContext, StoreStatus};

/// Turn a store's boolean outcome into an error carrying its message.
pub async fn ensure(ok: bool, status: &StoreStatus, action: &str) -> anyhow::Result<()> {
    if ok {
        return Ok(());
    }
    Err(store_failure(status, action).await)
}

/// Unwrap a store's optional outcome into an error carrying its message.
pub async fn require<T>(value: Option<T>, status: &StoreStatus, action: &str) -> anyhow::Result<T> {
    match value {
        Some(value) => Ok(value),
        None => Err(store_failure(status, action).await),
    }
}

async fn store_failure(status: &StoreStatus, action: &str) -> anyhow::Error {
    let message = status
        .error()
        .await
        .unwrap_or_else(|| String::from("no details reported"));
    anyhow!("{action} failed: {message}")
}

/// Open a session on the context, seeding its questions, chains and
/// configurations.
pub async fn open_session(ctx: &EvalContext, session_id: &str) -> anyhow::Result<SessionDetail> {
    let detail = ctx.open_session(session_id).await;
    require(detail, ctx.sessions().status(), "opening session").await
}

/// Parse `key=value` pairs into a parameter map. Values are read as a bool,
/// an integer, a float, or else kept as text.
pub fn parse_params(pairs: &[String]) -> anyhow::Result<Option<ParamMap>> {
    if pairs.is_empty() {
        return Ok(None);
    }
    let mut map = ParamMap::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("invalid parameter '{pair}': expected key=value");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("invalid parameter '{pair}': key is empty");
        }
        map.insert(key.to_string(), parse_value(value.trim()));
    }
    Ok(Some(map))
}

fn parse_value(raw: &str) -> ParamValue {
    if let Ok(flag) = raw.parse::<bool>() {
        return ParamValue::from(flag);
    }
    if let Ok(int) = raw.parse::<i64>() {
        return ParamValue::from(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        return ParamValue::from(float);
    }
    ParamValue::from(raw)
}
