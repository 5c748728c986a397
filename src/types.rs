//! Type-safe wrappers for record metadata primitives.
//!
//! These newtypes keep offsets, epochs and producer ids from being mixed up
//! even though they share an integer representation on the wire.

use std::fmt;

use crate::constants::NO_LEADER_EPOCH;

/// A Kafka message offset within a partition.
///
/// Records that have not been produced or fetched yet carry the default
/// offset of `0`; the value is only meaningful once the record has a home
/// in a partition log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Offset(pub i64);

impl Offset {
    /// Invalid offset, typically used to indicate an error or unset value.
    pub const INVALID: Self = Offset(-1);

    /// Create a new offset from a raw value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Offset(value)
    }

    /// Get the raw i64 value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Check if this is a valid (non-negative) offset.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl From<i64> for Offset {
    fn from(value: i64) -> Self {
        Offset(value)
    }
}

impl From<Offset> for i64 {
    fn from(offset: Offset) -> Self {
        offset.0
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Leader epoch of the broker at the time a record was written.
///
/// Records decoded from legacy message sets have no epoch and report
/// [`LeaderEpoch::NONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LeaderEpoch(pub i32);

impl LeaderEpoch {
    /// No leader epoch (message set v0/v1).
    pub const NONE: Self = LeaderEpoch(NO_LEADER_EPOCH);

    #[inline]
    pub const fn new(value: i32) -> Self {
        LeaderEpoch(value)
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether the record carried a real leader epoch.
    #[inline]
    pub const fn is_known(self) -> bool {
        self.0 >= 0
    }
}

impl From<i32> for LeaderEpoch {
    fn from(value: i32) -> Self {
        LeaderEpoch(value)
    }
}

impl fmt::Display for LeaderEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Kafka producer ID for idempotent/transactional producers.
///
/// Producer IDs are 64-bit signed integers assigned by the coordinator.
/// On a [`Record`](crate::record::Record), an id of `0` paired with an epoch
/// of `0` means the record was not produced with a producer id at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProducerId(pub i64);

impl ProducerId {
    /// Invalid/unknown producer ID.
    pub const INVALID: Self = ProducerId(-1);

    /// Create a new producer ID from a raw value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        ProducerId(value)
    }

    /// Get the raw i64 value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ProducerId {
    fn from(value: i64) -> Self {
        ProducerId(value)
    }
}

impl From<ProducerId> for i64 {
    fn from(id: ProducerId) -> Self {
        id.0
    }
}

impl fmt::Display for ProducerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Kafka producer epoch for idempotent/transactional producers.
///
/// Producer epochs are 16-bit signed integers that increment when
/// a producer is fenced or recovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ProducerEpoch(pub i16);

impl ProducerEpoch {
    /// Invalid/unknown producer epoch.
    pub const INVALID: Self = ProducerEpoch(-1);

    /// Create a new producer epoch from a raw value.
    #[inline]
    pub const fn new(value: i16) -> Self {
        ProducerEpoch(value)
    }

    /// Get the raw i16 value.
    #[inline]
    pub const fn value(self) -> i16 {
        self.0
    }
}

impl From<i16> for ProducerEpoch {
    fn from(value: i16) -> Self {
        ProducerEpoch(value)
    }
}

impl From<ProducerEpoch> for i16 {
    fn from(epoch: ProducerEpoch) -> Self {
        epoch.0
    }
}

impl fmt::Display for ProducerEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_valid() {
        assert!(Offset::new(0).is_valid());
        assert!(Offset::new(100).is_valid());
        assert!(!Offset::INVALID.is_valid());
    }

    #[test]
    fn test_offset_conversions() {
        let offset: Offset = 123i64.into();
        assert_eq!(offset.value(), 123);
        let raw: i64 = Offset::new(456).into();
        assert_eq!(raw, 456);
        assert_eq!(format!("{}", Offset::new(789)), "789");
    }

    #[test]
    fn test_leader_epoch_none() {
        assert_eq!(LeaderEpoch::NONE.value(), -1);
        assert!(!LeaderEpoch::NONE.is_known());
        assert!(LeaderEpoch::new(0).is_known());
    }

    #[test]
    fn test_producer_id_and_epoch() {
        assert_eq!(ProducerId::INVALID.value(), -1);
        assert_eq!(ProducerEpoch::INVALID.value(), -1);
        assert_eq!(ProducerId::from(7).value(), 7);
        assert_eq!(i16::from(ProducerEpoch::new(3)), 3);
    }

    #[test]
    fn test_defaults_are_zero() {
        assert_eq!(Offset::default().value(), 0);
        assert_eq!(LeaderEpoch::default().value(), 0);
        assert_eq!(ProducerId::default().value(), 0);
        assert_eq!(ProducerEpoch::default().value(), 0);
    }
}
