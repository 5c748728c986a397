//! Crate & per-partition fetch errors.
//!
//! # Error Hierarchy
//!
//! - [`Error`]: errors returned by fallible constructors in this crate
//! - [`KafkaCode`]: wire protocol error codes a broker attaches to a partition
//! - [`FetchPartitionError`]: the error carried by a
//!   [`FetchPartition`](crate::fetch::FetchPartition), one of three classes:
//!
//!   1. a [`KafkaCode`], usually non-retriable. These can sometimes be fixed
//!      at runtime (an authorization error, for example) without restarting.
//!   2. an injected [`DataLoss`] advisory. The fetch-driving layer has already
//!      reset to a consistent offset and resumed; worth logging, not worth
//!      restarting for.
//!   3. an untyped batch parse failure. Restarting rarely helps here and the
//!      partition may need manual repair.
//!
//! Walkers never fail; they surface these per-partition errors as data.

use std::result;

use num_derive::FromPrimitive;
use thiserror::Error as ThisError;

pub type Result<T> = result::Result<T, Error>;

/// Errors from constructing fetch result values.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Partition offsets violate `log_start <= last_stable <= high_watermark`.
    #[error(
        "Invalid offsets for partition {partition}: log_start={log_start_offset} last_stable={last_stable_offset} high_watermark={high_watermark}"
    )]
    InvalidOffsets {
        partition: i32,
        log_start_offset: i64,
        last_stable_offset: i64,
        high_watermark: i64,
    },

    /// Logging or other configuration could not be applied.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error codes a broker may report for a partition in a fetch response.
/// See also [Kafka Errors](http://kafka.apache.org/protocol.html)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, FromPrimitive, Default)]
pub enum KafkaCode {
    /// An unexpected server error
    Unknown = -1,
    #[default]
    None = 0,
    /// The requested offset is outside the range of offsets
    /// maintained by the server for the given topic/partition
    OffsetOutOfRange = 1,
    /// This indicates that a message contents does not match its CRC
    CorruptMessage = 2,
    /// This request is for a topic or partition that does not exist
    /// on this broker.
    UnknownTopicOrPartition = 3,
    /// There is currently no leader for this partition.
    LeaderNotAvailable = 5,
    /// The broker is not the leader for the partition; client metadata
    /// is out of date.
    NotLeaderForPartition = 6,
    /// The request exceeded the user-specified time limit.
    RequestTimedOut = 7,
    /// Replica is expected on a broker, but is not.
    ReplicaNotAvailable = 9,
    /// The server disconnected before a response was received.
    NetworkException = 13,
    /// The client is not authorized to access the requested topic.
    TopicAuthorizationFailed = 29,
    /// The version of API is not supported.
    UnsupportedVersion = 35,
    /// The message format version on the broker does not support the request.
    UnsupportedForMessageFormat = 43,
    /// Disk error when trying to access the log file on the broker.
    KafkaStorageError = 56,
    /// The leader epoch in the request is older than the broker's.
    FencedLeaderEpoch = 74,
    /// The leader epoch in the request is newer than the broker's.
    UnknownLeaderEpoch = 75,
    /// The leader high watermark has not caught up yet.
    OffsetNotAvailable = 78,
    /// The topic id does not exist on the broker.
    UnknownTopicId = 100,
    /// The topic id in the request does not match the broker's.
    InconsistentTopicId = 103,
}

impl KafkaCode {
    /// Whether the protocol classifies this code as retriable.
    ///
    /// Purely informational; this crate never retries anything.
    pub fn is_retriable(self) -> bool {
        matches!(
            self,
            KafkaCode::CorruptMessage
                | KafkaCode::UnknownTopicOrPartition
                | KafkaCode::LeaderNotAvailable
                | KafkaCode::NotLeaderForPartition
                | KafkaCode::RequestTimedOut
                | KafkaCode::ReplicaNotAvailable
                | KafkaCode::NetworkException
                | KafkaCode::KafkaStorageError
                | KafkaCode::FencedLeaderEpoch
                | KafkaCode::UnknownLeaderEpoch
                | KafkaCode::OffsetNotAvailable
                | KafkaCode::UnknownTopicId
                | KafkaCode::InconsistentTopicId
        )
    }
}

/// Consumed-offset discontinuity detected by the fetch-driving layer.
///
/// Either the broker's log start moved past the position being consumed, or
/// the log was truncated below it. Consuming has already been reset to
/// `reset_to` by the time this is observed.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error(
    "topic {topic} partition {partition} lost records; the client consumed to offset {consumed_to} but was reset to offset {reset_to}"
)]
pub struct DataLoss {
    pub topic: String,
    pub partition: i32,
    pub consumed_to: i64,
    pub reset_to: i64,
}

impl DataLoss {
    /// Number of offsets skipped over, or zero if the reset moved backwards.
    pub fn skipped(&self) -> i64 {
        (self.reset_to - self.consumed_to).max(0)
    }
}

/// An error attached to one partition of one broker response.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum FetchPartitionError {
    /// Broker-reported protocol error.
    #[error("Kafka error: {0:?}")]
    Kafka(KafkaCode),

    /// Injected data-loss advisory.
    #[error(transparent)]
    DataLoss(DataLoss),

    /// A record batch below this layer could not be decoded.
    #[error("Batch parse failure: {0}")]
    Parse(String),
}

impl FetchPartitionError {
    /// The wire code, if this is a broker-reported error.
    pub fn kafka_code(&self) -> Option<KafkaCode> {
        match self {
            FetchPartitionError::Kafka(code) => Some(*code),
            _ => None,
        }
    }

    pub fn is_data_loss(&self) -> bool {
        matches!(self, FetchPartitionError::DataLoss(_))
    }
}

impl From<KafkaCode> for FetchPartitionError {
    fn from(code: KafkaCode) -> Self {
        FetchPartitionError::Kafka(code)
    }
}

impl From<DataLoss> for FetchPartitionError {
    fn from(loss: DataLoss) -> Self {
        FetchPartitionError::DataLoss(loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn test_kafka_code_from_primitive() {
        assert_eq!(KafkaCode::from_i16(-1), Some(KafkaCode::Unknown));
        assert_eq!(KafkaCode::from_i16(0), Some(KafkaCode::None));
        assert_eq!(KafkaCode::from_i16(1), Some(KafkaCode::OffsetOutOfRange));
        assert_eq!(
            KafkaCode::from_i16(29),
            Some(KafkaCode::TopicAuthorizationFailed)
        );
        assert_eq!(KafkaCode::from_i16(74), Some(KafkaCode::FencedLeaderEpoch));
    }

    #[test]
    fn test_kafka_code_unknown_value() {
        assert_eq!(KafkaCode::from_i16(999), None);
        assert_eq!(KafkaCode::from_i16(-100), None);
    }

    #[test]
    fn test_kafka_code_retriable() {
        assert!(KafkaCode::NotLeaderForPartition.is_retriable());
        assert!(KafkaCode::UnknownTopicOrPartition.is_retriable());
        assert!(!KafkaCode::OffsetOutOfRange.is_retriable());
        assert!(!KafkaCode::TopicAuthorizationFailed.is_retriable());
        assert!(!KafkaCode::None.is_retriable());
    }

    #[test]
    fn test_invalid_offsets_display() {
        let err = Error::InvalidOffsets {
            partition: 3,
            log_start_offset: 10,
            last_stable_offset: 5,
            high_watermark: 20,
        };
        let display = err.to_string();
        assert!(display.contains("partition 3"));
        assert!(display.contains("log_start=10"));
    }

    #[test]
    fn test_data_loss_display_and_skipped() {
        let loss = DataLoss {
            topic: "orders".to_string(),
            partition: 2,
            consumed_to: 100,
            reset_to: 150,
        };
        assert_eq!(loss.skipped(), 50);
        let err = FetchPartitionError::from(loss);
        assert!(err.is_data_loss());
        assert!(err.to_string().contains("orders"));
        assert!(err.to_string().contains("150"));
    }

    #[test]
    fn test_data_loss_truncation_skips_nothing() {
        let loss = DataLoss {
            topic: "t".to_string(),
            partition: 0,
            consumed_to: 100,
            reset_to: 80,
        };
        assert_eq!(loss.skipped(), 0);
    }

    #[test]
    fn test_fetch_partition_error_kafka_code() {
        let err = FetchPartitionError::from(KafkaCode::OffsetOutOfRange);
        assert_eq!(err.kafka_code(), Some(KafkaCode::OffsetOutOfRange));
        assert!(!err.is_data_loss());

        let parse = FetchPartitionError::Parse("bad crc".to_string());
        assert_eq!(parse.kafka_code(), None);
        assert!(parse.to_string().contains("bad crc"));
    }
}
