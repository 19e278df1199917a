//! Shared service behaviour: error reporting and timed delays.
//!
//! Services opt in by implementing [`ServiceSupport`]; both operations have
//! default bodies, so an implementation only names itself.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Logging and delay capability mixed into resource services.
pub trait ServiceSupport {
    /// Name reported in log lines.
    fn service_name(&self) -> &'static str;

    /// Log `error` with the operation it came from, then hand it back so the
    /// caller can propagate it with `?` or `Err(..)`.
    fn handle_error<E: Display>(&self, error: E, context: &str) -> E {
        tracing::error!(service = self.service_name(), context, %error, "service operation failed");
        error
    }

    /// Suspend for `duration` without blocking the runtime.
    fn delay(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl ServiceSupport for Probe {
        fn service_name(&self) -> &'static str {
            "probe"
        }
    }

    #[test]
    fn handle_error_returns_the_same_error() {
        let error = Probe.handle_error(String::from("boom"), "probe.run");
        assert_eq!(error, "boom");
    }

    #[tokio::test(start_paused = true)]
    async fn delay_waits_for_the_requested_duration() {
        let start = tokio::time::Instant::now();
        Probe.delay(Duration::from_millis(1500)).await;
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
