//! Payload classification and deserialization.
//!
//! Classification is deliberately a marker-substring scan, not a structural
//! parse: each supported shape has one literal marker string, and the first
//! marker found in the raw text, in registry order, selects the target
//! schema. The marker may appear anywhere in the payload, including nested
//! inside record bodies.
//!
//! The priority between simultaneously-matching markers is an explicit,
//! tested property of [`ShapeRegistry::builtin`]: notification payloads
//! win over stream payloads. A notification whose message body happens to
//! contain the stream marker still classifies as a notification.
//!
//! Adding a shape means adding one [`ShapeEntry`] to the registry; the
//! dispatch logic never changes.
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::ExecutorError;
use crate::keys;
use crate::types::{
    Event, EventShape, KinesisData, KinesisEvent, KinesisRecord, SnsEvent, SnsMessage, SnsRecord,
};

/// Marker identifying a pub/sub notification wrapper.
pub const SNS_MARKER: &str = "\"Sns\"";
/// Marker identifying a stream-record wrapper.
pub const KINESIS_MARKER: &str = "\"Kinesis\"";

/// Maximum number of characters of unmatched payload carried in an
/// unrecognized-shape error.
const PREVIEW_CHARS: usize = 128;

type ShapeParser = fn(&str) -> Result<Event, ExecutorError>;

/// One registered shape: its identifier, discriminating marker, and parser.
pub struct ShapeEntry {
    pub shape: EventShape,
    pub marker: &'static str,
    parser: ShapeParser,
}

/// Ordered registry of known shapes. Earlier entries have higher priority
/// when more than one marker appears in the same payload.
///
/// `default()` is empty, like [`ShapeRegistry::new`]; the builtin shape
/// set is always an explicit [`ShapeRegistry::builtin`] call.
#[derive(Default)]
pub struct ShapeRegistry {
    entries: Vec<ShapeEntry>,
}

impl ShapeRegistry {
    /// Empty registry. Useful for tests and embedders with custom shapes.
    pub fn new() -> Self {
        Self::default()
    }

    /// The builtin shape set, in pinned priority order: Sns, then Kinesis.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(EventShape::Sns, SNS_MARKER, parse_sns);
        registry.register(EventShape::Kinesis, KINESIS_MARKER, parse_kinesis);
        registry
    }

    /// Appends a shape at the lowest priority position.
    pub fn register(&mut self, shape: EventShape, marker: &'static str, parser: ShapeParser) {
        self.entries.push(ShapeEntry {
            shape,
            marker,
            parser,
        });
    }

    /// Registered shapes in priority order.
    pub fn shapes(&self) -> impl Iterator<Item = EventShape> + '_ {
        self.entries.iter().map(|entry| entry.shape)
    }

    /// Determines the shape of `raw` without deserializing it.
    pub fn classify_shape(&self, raw: &str) -> Result<EventShape, ExecutorError> {
        self.entry_for(raw).map(|entry| entry.shape)
    }

    /// Classifies `raw` and deserializes it into the matching typed event.
    pub fn classify(&self, raw: &str) -> Result<Event, ExecutorError> {
        let entry = self.entry_for(raw)?;
        (entry.parser)(raw)
    }

    fn entry_for(&self, raw: &str) -> Result<&ShapeEntry, ExecutorError> {
        self.entries
            .iter()
            .find(|entry| raw.contains(entry.marker))
            .ok_or_else(|| ExecutorError::UnrecognizedShape {
                preview: preview(raw),
            })
    }
}

/// Leading content of the payload, truncated on a char boundary.
fn preview(raw: &str) -> String {
    raw.chars().take(PREVIEW_CHARS).collect()
}

fn parse_root(raw: &str) -> Result<Map<String, Value>, ExecutorError> {
    let root: Value = serde_json::from_str(raw)
        .map_err(|err| ExecutorError::InvalidPayload(format!("malformed JSON: {err}")))?;
    match root {
        Value::Object(map) => Ok(map),
        other => Err(ExecutorError::InvalidPayload(format!(
            "top-level payload is not a JSON object (found {})",
            json_kind(&other)
        ))),
    }
}

fn records_of(root: &Map<String, Value>, shape: EventShape) -> Result<&[Value], ExecutorError> {
    keys::array_field(root, "Records").ok_or_else(|| {
        ExecutorError::InvalidPayload(format!("{shape} payload is missing a Records array"))
    })
}

fn record_object(value: &Value, index: usize) -> Result<&Map<String, Value>, ExecutorError> {
    value.as_object().ok_or_else(|| {
        ExecutorError::InvalidPayload(format!("record {index} is not a JSON object"))
    })
}

fn parse_sns(raw: &str) -> Result<Event, ExecutorError> {
    let root = parse_root(raw)?;
    let mut records = Vec::new();
    for (index, value) in records_of(&root, EventShape::Sns)?.iter().enumerate() {
        let record = record_object(value, index)?;
        let message = keys::object_field(record, "Sns").ok_or_else(|| {
            ExecutorError::InvalidPayload(format!("record {index} is missing its Sns wrapper"))
        })?;
        records.push(SnsRecord {
            event_source: keys::string_field(record, "EventSource"),
            event_subscription_arn: keys::string_field(record, "EventSubscriptionArn"),
            sns: SnsMessage {
                topic_arn: keys::string_field(message, "TopicArn"),
                subject: keys::string_field(message, "Subject"),
                message: keys::string_field(message, "Message"),
                message_id: keys::string_field(message, "MessageId"),
                timestamp: delivery_timestamp(message, index)?,
            },
        });
    }
    Ok(Event::Sns(SnsEvent { records }))
}

fn parse_kinesis(raw: &str) -> Result<Event, ExecutorError> {
    let root = parse_root(raw)?;
    let mut records = Vec::new();
    for (index, value) in records_of(&root, EventShape::Kinesis)?.iter().enumerate() {
        let record = record_object(value, index)?;
        let body = keys::object_field(record, "Kinesis").ok_or_else(|| {
            ExecutorError::InvalidPayload(format!("record {index} is missing its Kinesis wrapper"))
        })?;
        records.push(KinesisRecord {
            event_id: keys::string_field(record, "EventId"),
            event_source: keys::string_field(record, "EventSource"),
            aws_region: keys::string_field(record, "AwsRegion"),
            kinesis: KinesisData {
                data: record_data(body, index)?,
                partition_key: keys::string_field(body, "PartitionKey"),
                sequence_number: keys::string_field(body, "SequenceNumber"),
                approximate_arrival_timestamp: arrival_timestamp(body, index)?,
            },
        });
    }
    Ok(Event::Kinesis(KinesisEvent { records }))
}

/// Decodes the record's base64 body. The body is mandatory: a stream
/// record without data has nothing to hand to the handler.
fn record_data(body: &Map<String, Value>, index: usize) -> Result<Vec<u8>, ExecutorError> {
    let encoded = keys::string_field(body, "Data").ok_or_else(|| {
        ExecutorError::InvalidPayload(format!("record {index} is missing its data field"))
    })?;
    BASE64.decode(encoded.as_bytes()).map_err(|err| {
        ExecutorError::InvalidPayload(format!("record {index} data is not valid base64: {err}"))
    })
}

/// Notification delivery timestamps arrive as RFC 3339 strings.
fn delivery_timestamp(
    message: &Map<String, Value>,
    index: usize,
) -> Result<Option<DateTime<Utc>>, ExecutorError> {
    let Some(text) = keys::string_field(message, "Timestamp") else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(&text)
        .map(|parsed| Some(parsed.with_timezone(&Utc)))
        .map_err(|err| {
            ExecutorError::InvalidPayload(format!("record {index} timestamp {text:?}: {err}"))
        })
}

/// Stream arrival timestamps arrive as fractional epoch seconds.
fn arrival_timestamp(
    body: &Map<String, Value>,
    index: usize,
) -> Result<Option<DateTime<Utc>>, ExecutorError> {
    let Some(value) = keys::lookup(body, "ApproximateArrivalTimestamp") else {
        return Ok(None);
    };
    let seconds = value.as_f64().ok_or_else(|| {
        ExecutorError::InvalidPayload(format!("record {index} arrival timestamp is not a number"))
    })?;
    let whole = seconds.trunc() as i64;
    let nanos = (seconds.fract() * 1_000_000_000.0) as u32;
    DateTime::from_timestamp(whole, nanos)
        .map(Some)
        .ok_or_else(|| {
            ExecutorError::InvalidPayload(format!(
                "record {index} arrival timestamp {seconds} is out of range"
            ))
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
