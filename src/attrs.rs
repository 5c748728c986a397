//! Per-record attribute flags.
//!
//! ```text
//! bit  7   6   5        4              3           2 1 0
//!      |   |   control  transactional  ts-type     compression
//!      no-timestamp
//! ```
//!
//! Bit 7 is never set by a v2 record batch; the decoding layer sets it on
//! records from message sets that predate timestamps.

use std::fmt;

use crate::constants::{
    ATTR_COMPRESSION_MASK, ATTR_CONTROL_MASK, ATTR_NO_TIMESTAMP_MASK, ATTR_TIMESTAMP_TYPE_MASK,
    ATTR_TRANSACTIONAL_MASK, COMPRESSION_GZIP, COMPRESSION_LZ4, COMPRESSION_NONE,
    COMPRESSION_SNAPPY, COMPRESSION_ZSTD, TIMESTAMP_TYPE_CREATE_TIME,
    TIMESTAMP_TYPE_LOG_APPEND_TIME, TIMESTAMP_TYPE_NONE,
};

/// Compression codec a record's batch was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
    None,
    Gzip,
    Snappy,
    Lz4,
    Zstd,
    /// A code outside 0-4. Not validated here; the protocol layer owns that.
    Unknown(u8),
}

impl From<u8> for Compression {
    fn from(code: u8) -> Self {
        match code {
            COMPRESSION_NONE => Compression::None,
            COMPRESSION_GZIP => Compression::Gzip,
            COMPRESSION_SNAPPY => Compression::Snappy,
            COMPRESSION_LZ4 => Compression::Lz4,
            COMPRESSION_ZSTD => Compression::Zstd,
            other => Compression::Unknown(other),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compression::None => write!(f, "none"),
            Compression::Gzip => write!(f, "gzip"),
            Compression::Snappy => write!(f, "snappy"),
            Compression::Lz4 => write!(f, "lz4"),
            Compression::Zstd => write!(f, "zstd"),
            Compression::Unknown(code) => write!(f, "unknown({code})"),
        }
    }
}

/// How a record's timestamp was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampType {
    /// Pre-0.10 message format; there is no timestamp.
    NotAvailable,
    /// Set by the producing client.
    CreateTime,
    /// Set by the broker on append.
    LogAppendTime,
}

impl TimestampType {
    /// The protocol's integer encoding (-1, 0 or 1).
    pub const fn code(self) -> i8 {
        match self {
            TimestampType::NotAvailable => TIMESTAMP_TYPE_NONE,
            TimestampType::CreateTime => TIMESTAMP_TYPE_CREATE_TIME,
            TimestampType::LogAppendTime => TIMESTAMP_TYPE_LOG_APPEND_TIME,
        }
    }
}

/// Packed attribute byte carried alongside every [`Record`](crate::record::Record).
///
/// A plain `Copy` value; every query is a pure function of the byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RecordAttrs(u8);

impl RecordAttrs {
    #[inline]
    pub const fn new(attrs: u8) -> Self {
        RecordAttrs(attrs)
    }

    /// The packed byte as decoded.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Compression code: 0 none, 1 gzip, 2 snappy, 3 lz4, 4 zstd.
    #[inline]
    pub const fn compression_kind(self) -> u8 {
        self.0 & ATTR_COMPRESSION_MASK
    }

    #[inline]
    pub fn compression(self) -> Compression {
        Compression::from(self.compression_kind())
    }

    /// Timestamp type: -1 if no timestamp, 0 for CreateTime, 1 for LogAppendTime.
    ///
    /// The no-timestamp bit wins regardless of the timestamp-type bit.
    #[inline]
    pub const fn timestamp_type(self) -> i8 {
        self.timestamp_kind().code()
    }

    pub const fn timestamp_kind(self) -> TimestampType {
        if self.0 & ATTR_NO_TIMESTAMP_MASK != 0 {
            TimestampType::NotAvailable
        } else if self.0 & ATTR_TIMESTAMP_TYPE_MASK != 0 {
            TimestampType::LogAppendTime
        } else {
            TimestampType::CreateTime
        }
    }

    /// Whether the record is part of a transaction.
    #[inline]
    pub const fn is_transactional(self) -> bool {
        self.0 & ATTR_TRANSACTIONAL_MASK != 0
    }

    /// Whether the record is a control record (transaction COMMIT or ABORT
    /// marker). These are normally hidden from consumers.
    #[inline]
    pub const fn is_control(self) -> bool {
        self.0 & ATTR_CONTROL_MASK != 0
    }
}

impl From<u8> for RecordAttrs {
    fn from(attrs: u8) -> Self {
        RecordAttrs(attrs)
    }
}
