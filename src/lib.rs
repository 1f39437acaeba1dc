//! Local invocation harness for compiled event-handler functions.
//!
//! Given a registered handler id and a path to a serialized event payload,
//! the executor classifies the payload into one of a closed set of event
//! shapes, deserializes it, invokes the handler with a synthesized
//! execution context, and returns the rendered result. The binary built on
//! top of this library keeps a strict channel contract with its parent
//! process: one line of result on stdout, diagnostics on stderr, exit code
//! signaling success or failure.
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn, Level};

pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod keys;
pub mod logging;
pub mod types;

pub use crate::classify::{ShapeRegistry, KINESIS_MARKER, SNS_MARKER};
pub use crate::config::ExecutorConfig;
pub use crate::context::ExecutionContext;
pub use crate::error::ExecutorError;
pub use crate::handler::{render_output, Handler, HandlerError, HandlerRegistry};
pub use crate::types::{
    Event, EventShape, KinesisData, KinesisEvent, KinesisRecord, SnsEvent, SnsMessage, SnsRecord,
};

/// Runs one handler invocation end to end and returns the rendered result.
///
/// Steps, strictly sequential: read the payload file once, classify and
/// deserialize it, resolve the handler from the registry, build the
/// execution context, invoke, render. Any failure short-circuits; nothing
/// is retried.
pub fn execute(
    handler_id: &str,
    payload_path: &Path,
    handlers: &HandlerRegistry,
    shapes: &ShapeRegistry,
    config: &ExecutorConfig,
) -> Result<String, ExecutorError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "executor.execute",
        handler_id = %handler_id,
        payload_path = %payload_path.display()
    );
    let _guard = span.enter();

    match execute_inner(handler_id, payload_path, handlers, shapes, config) {
        Ok((shape, rendered)) => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(shape = %shape, result_len = rendered.len(), elapsed_micros, "invoke_success");
            Ok(rendered)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(error = %err, elapsed_micros, "invoke_failure");
            Err(err)
        }
    }
}

fn execute_inner(
    handler_id: &str,
    payload_path: &Path,
    handlers: &HandlerRegistry,
    shapes: &ShapeRegistry,
    config: &ExecutorConfig,
) -> Result<(EventShape, String), ExecutorError> {
    let raw = read_payload(payload_path)?;
    let event = shapes.classify(&raw)?;
    let shape = event.shape();

    let handler = handlers.resolve(handler_id)?;
    let ctx = ExecutionContext::new(config);

    let output = handler
        .invoke(&event, &ctx)
        .map_err(|err| ExecutorError::Invocation(err.to_string()))?;

    Ok((shape, render_output(&output)))
}

/// Reads the payload file into a raw UTF-8 string. Relative paths resolve
/// against the process working directory.
pub fn read_payload(path: &Path) -> Result<String, ExecutorError> {
    let resolved = resolve_path(path);
    fs::read_to_string(&resolved).map_err(|err| ExecutorError::PayloadRead {
        path: resolved.display().to_string(),
        reason: err.to_string(),
    })
}

fn resolve_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
