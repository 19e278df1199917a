//! In-memory demo backend settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DemoConfig {
    /// Simulated latency applied to every demo call, in milliseconds.
    #[serde(default)]
    pub latency_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_to_no_latency() {
        assert_eq!(DemoConfig::default().latency_ms, 0);
    }
}
