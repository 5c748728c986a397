//! # Kafkaesque Fetch
//! Consumer-side result model for Kafka-compatible clients.
//!
//! This crate defines what a consumer receives after fetching from a set of
//! brokers, and the machinery for walking it. Decoding fetch responses off the
//! wire, deciding what to fetch and retrying are left to the layers around it;
//! they hand this crate a ready-built [`Fetches`](fetch::Fetches) batch.
//!
//! ```text
//! Fetches → Fetch (one per broker) → FetchTopic → FetchPartition → [Record]
//! ```
//!
//! ## Walking a batch
//! ```rust
//! use kafkaesque_fetch::prelude::*;
//!
//! fn consume(fetches: &Fetches) {
//!     fetches.each_err(|topic, partition, err| {
//!         eprintln!("{topic}[{partition}]: {err}");
//!     });
//!
//!     let mut iter = fetches.record_iter();
//!     while !iter.done() {
//!         if let Some(record) = iter.next() {
//!             println!("{}@{} {:?}", record.topic, record.offset, record.value);
//!         }
//!     }
//! }
//!
//! consume(&Fetches::new());
//! ```
//!
//! Callback walkers are available per record ([`each_record`](fetch::Fetches::each_record)),
//! per partition ([`each_partition`](fetch::Fetches::each_partition)) and per
//! topic merged across brokers ([`each_topic`](fetch::Fetches::each_topic)).
//!
//! ## Building records
//! The constructors in [`record`] wrap text or byte buffers without copying.

#![forbid(unsafe_code)]

pub mod attrs;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod iter;
pub mod record;
pub mod telemetry;
pub mod types;

pub mod prelude {
    //! Main export of record and fetch structures.
    pub use crate::attrs::{Compression, RecordAttrs, TimestampType};
    pub use crate::error::{DataLoss, Error, FetchPartitionError, KafkaCode, Result};
    pub use crate::fetch::{
        Fetch, FetchError, FetchPartition, FetchTopic, FetchTopicPartition, FetchTopicView,
        Fetches,
    };
    pub use crate::iter::FetchesRecordIter;
    pub use crate::record::{
        Record, RecordHeader, key_slice_record, key_string_record, slice_record, string_record,
    };
    pub use crate::types::{LeaderEpoch, Offset, ProducerEpoch, ProducerId};

    pub use bytes;
}
