//! Per-invocation execution context handed to the handler.
//!
//! The context is created once per process run and discarded after the
//! single invocation completes. The remaining-time indicator is advisory:
//! the harness never enforces it, the handler may use it to budget work.
use std::time::Instant;

use uuid::Uuid;

use crate::config::ExecutorConfig;

/// Identity and resource metadata for one handler invocation.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Unique id for this invocation.
    pub request_id: Uuid,
    /// Name of the emulated function.
    pub function_name: String,
    /// Configured memory ceiling, in megabytes. Informational only.
    pub memory_limit_mb: u32,
    started_at: Instant,
    timeout_millis: u64,
}

impl ExecutionContext {
    pub fn new(config: &ExecutorConfig) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            function_name: config.function_name.clone(),
            memory_limit_mb: config.memory_limit_mb,
            started_at: Instant::now(),
            timeout_millis: config.timeout_millis,
        }
    }

    /// Milliseconds left before the configured deadline, saturating at zero.
    pub fn remaining_time_millis(&self) -> u64 {
        let elapsed = self.started_at.elapsed().as_millis() as u64;
        self.timeout_millis.saturating_sub(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_time_never_exceeds_the_budget() {
        let config = ExecutorConfig::default();
        let ctx = ExecutionContext::new(&config);
        assert!(ctx.remaining_time_millis() <= config.timeout_millis);
    }

    #[test]
    fn each_invocation_gets_a_fresh_request_id() {
        let config = ExecutorConfig::default();
        let a = ExecutionContext::new(&config);
        let b = ExecutionContext::new(&config);
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn exhausted_budget_saturates_at_zero() {
        let config = ExecutorConfig {
            timeout_millis: 0,
            ..Default::default()
        };
        let ctx = ExecutionContext::new(&config);
        assert_eq!(ctx.remaining_time_millis(), 0);
    }
}
