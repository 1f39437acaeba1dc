//! Executor configuration.
//!
//! The CLI surface is fixed (two positional arguments), so everything else
//! is configured through environment variables with sane defaults. The
//! supervisor that spawns this process owns those variables.
use std::env;
use std::time::Duration;

use tracing::warn;

/// Configuration for one executor run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Name of the emulated function, surfaced to the handler via the
    /// execution context.
    pub function_name: String,
    /// Memory ceiling reported to the handler, in megabytes.
    pub memory_limit_mb: u32,
    /// Invocation time budget reported to the handler, in milliseconds.
    /// Advisory only; the harness does not enforce it.
    pub timeout_millis: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            function_name: default_function_name(),
            memory_limit_mb: default_memory_limit_mb(),
            timeout_millis: default_timeout_millis(),
        }
    }
}

impl ExecutorConfig {
    /// Loads configuration from `EXECUTOR_*` environment variables,
    /// falling back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            function_name: env::var("EXECUTOR_FUNCTION_NAME")
                .unwrap_or_else(|_| default_function_name()),
            memory_limit_mb: env_number("EXECUTOR_MEMORY_MB", default_memory_limit_mb()),
            timeout_millis: env_number("EXECUTOR_TIMEOUT_MS", default_timeout_millis()),
        }
    }

    /// The invocation time budget as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

fn env_number<T: std::str::FromStr + Copy>(name: &str, fallback: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(variable = name, value = %raw, "ignoring unparseable value");
                fallback
            }
        },
        Err(_) => fallback,
    }
}

fn default_function_name() -> String {
    "local-function".to_string()
}

fn default_memory_limit_mb() -> u32 {
    1536
}

fn default_timeout_millis() -> u64 {
    300_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_populated() {
        let config = ExecutorConfig::default();
        assert_eq!(config.function_name, "local-function");
        assert_eq!(config.memory_limit_mb, 1536);
        assert_eq!(config.timeout(), Duration::from_millis(300_000));
    }

    #[test]
    fn env_overrides_are_applied() {
        // Scoped to variables no other test touches.
        env::set_var("EXECUTOR_FUNCTION_NAME", "order-processor");
        env::set_var("EXECUTOR_TIMEOUT_MS", "2500");
        env::set_var("EXECUTOR_MEMORY_MB", "not-a-number");

        let config = ExecutorConfig::from_env();
        assert_eq!(config.function_name, "order-processor");
        assert_eq!(config.timeout_millis, 2500);
        assert_eq!(config.memory_limit_mb, 1536);

        env::remove_var("EXECUTOR_FUNCTION_NAME");
        env::remove_var("EXECUTOR_TIMEOUT_MS");
        env::remove_var("EXECUTOR_MEMORY_MB");
    }
}
