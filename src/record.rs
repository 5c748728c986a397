//! Records and record headers.
//!
//! A [`Record`] is the unit handed to consumers by the fetch walkers and the
//! unit built by producers with the constructors at the bottom of this
//! module. Keys and values are immutable [`Bytes`], so a record can be cloned
//! and shared across threads without copying its payload.
//!
//! # Zero-copy construction
//!
//! ```
//! use kafkaesque_fetch::record::{key_string_record, slice_record, string_record};
//!
//! // Owned text: the String's allocation becomes the value buffer.
//! let owned = string_record(String::from("hello"));
//! assert_eq!(owned.value.as_ref(), b"hello");
//!
//! // Static text is referenced in place.
//! let keyed = key_string_record("user-1", "clicked");
//! assert_eq!(keyed.key.as_deref(), Some(&b"user-1"[..]));
//!
//! // Bytes, Vec<u8> and &'static [u8] are accepted as-is.
//! let raw = slice_record(vec![1u8, 2, 3]);
//! assert_eq!(raw.value.len(), 3);
//! ```
//!
//! Borrowed text with a shorter lifetime does not satisfy the text
//! constructors; copy it explicitly (`s.to_owned()`) first.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::attrs::RecordAttrs;
use crate::types::{LeaderEpoch, Offset, ProducerEpoch, ProducerId};

/// Extra application metadata sent along with a record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordHeader {
    pub key: String,
    pub value: Bytes,
}

impl RecordHeader {
    pub fn new(key: impl Into<String>, value: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A single message read from or written to a partition.
///
/// `partition`, `offset`, `leader_epoch` and the producer fields are left at
/// their zero values until the record has been produced or fetched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    /// Optional key, generally used for partition assignment.
    pub key: Option<Bytes>,
    pub value: Bytes,
    /// Ordered application headers; brokers never inspect these.
    pub headers: Vec<RecordHeader>,
    /// For LogAppendTime batches this is the batch's max timestamp rather than
    /// first timestamp plus delta.
    pub timestamp: DateTime<Utc>,
    pub topic: String,
    pub partition: i32,
    pub attrs: RecordAttrs,
    pub producer_id: ProducerId,
    pub producer_epoch: ProducerEpoch,
    /// [`LeaderEpoch::NONE`] for records read from message sets.
    pub leader_epoch: LeaderEpoch,
    pub offset: Offset,
}

impl Record {
    /// Whether this record was written with a producer id.
    ///
    /// An id of 0 together with an epoch of 0 is the "no producer id" pair,
    /// not a real id.
    pub fn has_producer_id(&self) -> bool {
        !(self.producer_id.value() == 0 && self.producer_epoch.value() == 0)
    }

    /// Milliseconds since the Unix epoch, as carried on the wire.
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    /// First header with the given key.
    pub fn header(&self, key: &str) -> Option<&RecordHeader> {
        self.headers.iter().find(|h| h.key == key)
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_partition(mut self, partition: i32) -> Self {
        self.partition = partition;
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<Bytes>) -> Self {
        self.headers.push(RecordHeader::new(key, value));
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Record whose value is the given text.
///
/// Accepts an owned `String` (its allocation is reused) or a `&'static str`
/// (referenced in place); neither path copies.
pub fn string_record<S>(value: S) -> Record
where
    S: AsRef<str> + Into<Bytes>,
{
    Record {
        value: value.into(),
        ..Default::default()
    }
}

/// Record whose key and value are the given text, without copying either.
pub fn key_string_record<K, V>(key: K, value: V) -> Record
where
    K: AsRef<str> + Into<Bytes>,
    V: AsRef<str> + Into<Bytes>,
{
    Record {
        key: Some(key.into()),
        ..string_record(value)
    }
}

/// Record whose value is the given byte buffer.
pub fn slice_record(value: impl Into<Bytes>) -> Record {
    Record {
        value: value.into(),
        ..Default::default()
    }
}

/// Record whose key and value are the given byte buffers.
pub fn key_slice_record(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Record {
    Record {
        key: Some(key.into()),
        value: value.into(),
        ..Default::default()
    }
}
