//! Typed event model for the closed set of supported payload shapes.
//!
//! These types are what a handler receives after classification. They are
//! populated from a generic JSON payload via case-tolerant key lookup (see
//! [`crate::keys`]), never derived directly from one fixed casing
//! convention, because producers of these payloads do not agree on one.
//!
//! # Type hierarchy
//!
//! ```text
//! Event
//! ├── Sns(SnsEvent)
//! │   └── records: Vec<SnsRecord>
//! │       ├── event_source / event_subscription_arn
//! │       └── sns: SnsMessage
//! │           ├── topic_arn, subject, message
//! │           └── message_id, timestamp
//! └── Kinesis(KinesisEvent)
//!     └── records: Vec<KinesisRecord>
//!         ├── event_id / event_source / aws_region
//!         └── kinesis: KinesisData
//!             ├── data (base64-decoded bytes)
//!             ├── partition_key, sequence_number
//!             └── approximate_arrival_timestamp
//! ```
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Identifier for the closed set of supported event families.
///
/// A shape is determined by classification, never declared by the payload.
/// Exactly one shape is chosen per payload or classification fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventShape {
    /// Pub/sub notification batch.
    Sns,
    /// Stream-record batch.
    Kinesis,
}

impl EventShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventShape::Sns => "sns",
            EventShape::Kinesis => "kinesis",
        }
    }
}

impl fmt::Display for EventShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deserialized event tagged with its chosen shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Event {
    Sns(SnsEvent),
    Kinesis(KinesisEvent),
}

impl Event {
    pub fn shape(&self) -> EventShape {
        match self {
            Event::Sns(_) => EventShape::Sns,
            Event::Kinesis(_) => EventShape::Kinesis,
        }
    }

    /// Number of records in the batch, regardless of shape.
    pub fn record_count(&self) -> usize {
        match self {
            Event::Sns(event) => event.records.len(),
            Event::Kinesis(event) => event.records.len(),
        }
    }
}

/// Ordered batch of pub/sub notification messages.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SnsEvent {
    pub records: Vec<SnsRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SnsRecord {
    pub event_source: Option<String>,
    pub event_subscription_arn: Option<String>,
    pub sns: SnsMessage,
}

/// One published notification with its delivery metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SnsMessage {
    pub topic_arn: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub message_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Ordered batch of stream records.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct KinesisEvent {
    pub records: Vec<KinesisRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct KinesisRecord {
    pub event_id: Option<String>,
    pub event_source: Option<String>,
    pub aws_region: Option<String>,
    pub kinesis: KinesisData,
}

/// One stream record: opaque binary body plus stream metadata.
///
/// `data` arrives base64-encoded in the raw payload and is decoded during
/// deserialization, so handlers always see the record bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct KinesisData {
    pub data: Vec<u8>,
    pub partition_key: Option<String>,
    pub sequence_number: Option<String>,
    pub approximate_arrival_timestamp: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_labels_are_stable() {
        assert_eq!(EventShape::Sns.to_string(), "sns");
        assert_eq!(EventShape::Kinesis.to_string(), "kinesis");
    }

    #[test]
    fn events_serialize_for_diagnostics() {
        let timestamp = DateTime::parse_from_rfc3339("2020-01-01T00:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        let event = Event::Sns(SnsEvent {
            records: vec![SnsRecord {
                sns: SnsMessage {
                    topic_arn: Some("arn:x".into()),
                    message: Some("hi".into()),
                    timestamp: Some(timestamp),
                    ..Default::default()
                },
                ..Default::default()
            }],
        });

        let json = serde_json::to_value(&event).expect("event serializes");
        let record = &json["Sns"]["records"][0];
        assert_eq!(record["sns"]["topic_arn"], "arn:x");
        assert_eq!(record["sns"]["message"], "hi");
        assert!(record["sns"]["timestamp"]
            .as_str()
            .unwrap()
            .starts_with("2020-01-01"));

        let shape = serde_json::to_value(EventShape::Kinesis).expect("shape serializes");
        assert_eq!(shape, "Kinesis");
    }

    #[test]
    fn record_count_spans_shapes() {
        let sns = Event::Sns(SnsEvent {
            records: vec![SnsRecord::default(), SnsRecord::default()],
        });
        assert_eq!(sns.shape(), EventShape::Sns);
        assert_eq!(sns.record_count(), 2);

        let kinesis = Event::Kinesis(KinesisEvent { records: vec![] });
        assert_eq!(kinesis.shape(), EventShape::Kinesis);
        assert_eq!(kinesis.record_count(), 0);
    }
}
