//! Handler trait, registry, and the builtin demo handlers.
//!
//! Handlers are resolved from an explicit registry populated at startup:
//! a mapping from string identifiers to zero-argument factories producing
//! a boxed [`Handler`]. There is no dynamic discovery; an id either
//! resolves or the invocation fails with
//! [`ExecutorError::HandlerNotFound`].
use std::collections::HashMap;

use serde_json::Value;

use crate::context::ExecutionContext;
use crate::error::ExecutorError;
use crate::types::Event;

/// Error type handlers may fail with. Converted to
/// [`ExecutorError::Invocation`] at the driver boundary with the message
/// carried verbatim.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// The single capability a handler exposes: accept one typed event and an
/// execution context, return one value.
pub trait Handler {
    fn invoke(&self, event: &Event, ctx: &ExecutionContext) -> Result<Value, HandlerError>;
}

/// Plain functions and closures are handlers too.
impl<F> Handler for F
where
    F: Fn(&Event, &ExecutionContext) -> Result<Value, HandlerError>,
{
    fn invoke(&self, event: &Event, ctx: &ExecutionContext) -> Result<Value, HandlerError> {
        self(event, ctx)
    }
}

type HandlerFactory = Box<dyn Fn() -> Box<dyn Handler>>;

/// Registry mapping handler identifiers to factories.
#[derive(Default)]
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the builtin demo handlers.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("echo-first-message", || Box::new(EchoFirstMessage));
        registry.register("count-records", || Box::new(CountRecords));
        registry
    }

    /// Registers `factory` under `id`, replacing any previous registration.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Handler> + 'static,
    {
        self.factories.insert(id.into(), Box::new(factory));
    }

    /// Constructs the handler registered under `id`.
    pub fn resolve(&self, id: &str) -> Result<Box<dyn Handler>, ExecutorError> {
        self.factories
            .get(id)
            .map(|factory| factory())
            .ok_or_else(|| ExecutorError::HandlerNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }
}

/// Renders an invocation result for the stdout contract: strings print
/// raw (no JSON quoting), everything else prints as compact JSON.
pub fn render_output(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Echoes the body of the first record in the batch.
///
/// For notifications that is the message text; for stream records the
/// decoded bytes interpreted as UTF-8 (lossily).
struct EchoFirstMessage;

impl Handler for EchoFirstMessage {
    fn invoke(&self, event: &Event, _ctx: &ExecutionContext) -> Result<Value, HandlerError> {
        let body = match event {
            Event::Sns(event) => event
                .records
                .first()
                .and_then(|record| record.sns.message.clone())
                .unwrap_or_default(),
            Event::Kinesis(event) => event
                .records
                .first()
                .map(|record| String::from_utf8_lossy(&record.kinesis.data).into_owned())
                .unwrap_or_default(),
        };
        Ok(Value::String(body))
    }
}

/// Counts the records in the batch, regardless of shape.
struct CountRecords;

impl Handler for CountRecords {
    fn invoke(&self, event: &Event, _ctx: &ExecutionContext) -> Result<Value, HandlerError> {
        Ok(Value::from(event.record_count()))
    }
}
