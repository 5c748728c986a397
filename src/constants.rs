//! Centralized record and fetch constants.
//!
//! The record attribute layout mirrors the low byte of the RecordBatch
//! `attributes` field in the Kafka wire protocol, with the high bit borrowed
//! to flag records decoded from pre-timestamp (v0) message sets.
//!
//! # Categories
//!
//! - **Attribute Masks**: bit positions inside [`RecordAttrs`](crate::attrs::RecordAttrs)
//! - **Compression Codes**: values of the 3-bit compression field
//! - **Timestamp Types**: values returned by `RecordAttrs::timestamp_type`
//! - **Sentinels**: watermark and epoch placeholders

// =============================================================================
// Attribute Masks
// =============================================================================

/// Bits 0-2: compression codec.
pub const ATTR_COMPRESSION_MASK: u8 = 0b0000_0111;

/// Bit 3: timestamp type (0 = CreateTime, 1 = LogAppendTime).
pub const ATTR_TIMESTAMP_TYPE_MASK: u8 = 0b0000_1000;

/// Bit 4: record is part of a transaction.
pub const ATTR_TRANSACTIONAL_MASK: u8 = 0b0001_0000;

/// Bit 5: record is a control record (COMMIT or ABORT marker).
pub const ATTR_CONTROL_MASK: u8 = 0b0010_0000;

/// Bit 7: record has no timestamp at all (v0 message set).
///
/// Takes precedence over [`ATTR_TIMESTAMP_TYPE_MASK`].
pub const ATTR_NO_TIMESTAMP_MASK: u8 = 0b1000_0000;

// =============================================================================
// Compression Codes
// =============================================================================

pub const COMPRESSION_NONE: u8 = 0;
pub const COMPRESSION_GZIP: u8 = 1;
pub const COMPRESSION_SNAPPY: u8 = 2;
pub const COMPRESSION_LZ4: u8 = 3;
pub const COMPRESSION_ZSTD: u8 = 4;

// =============================================================================
// Timestamp Types
// =============================================================================

/// Records from message sets predating KIP-32 carry no timestamp.
pub const TIMESTAMP_TYPE_NONE: i8 = -1;

/// Timestamp assigned by the producing client.
pub const TIMESTAMP_TYPE_CREATE_TIME: i8 = 0;

/// Timestamp assigned by the broker when appending to the log.
pub const TIMESTAMP_TYPE_LOG_APPEND_TIME: i8 = 1;

// =============================================================================
// Sentinels
// =============================================================================

/// Watermark value reported for partitions that errored.
pub const UNKNOWN_WATERMARK: i64 = -1;

/// Leader epoch reported for records read from legacy message sets.
pub const NO_LEADER_EPOCH: i32 = -1;
