//! Fetch results and the walkers over them.
//!
//! A [`Fetches`] value is a read-only snapshot of one or more broker
//! responses:
//!
//! ```text
//! Fetches ─┬─ Fetch (broker 1) ─┬─ FetchTopic "a" ─┬─ FetchPartition 0 ─ [Record, ...]
//!          │                    │                  └─ FetchPartition 1 ─ [...]
//!          │                    └─ FetchTopic "b" ── ...
//!          └─ Fetch (broker 2) ─── FetchTopic "a" ─── FetchPartition 2 ─ [...]
//! ```
//!
//! Records can be pulled one at a time with [`Fetches::record_iter`] or pushed
//! to a callback per record, partition or topic. Per-partition errors are
//! data, surfaced by [`Fetches::each_err`] and [`Fetches::errors`]; nothing in
//! this module retries, skips or fails.
//!
//! ```
//! use kafkaesque_fetch::prelude::*;
//!
//! let fetches = Fetches::from(vec![Fetch::new(vec![FetchTopic::new(
//!     "events",
//!     vec![FetchPartition {
//!         partition: 0,
//!         records: vec![string_record("a"), string_record("b")],
//!         ..Default::default()
//!     }],
//! )])]);
//!
//! assert!(fetches.errors().is_empty());
//! let mut seen = Vec::new();
//! fetches.each_record(|r| seen.push(r.value.clone()));
//! assert_eq!(seen.len(), 2);
//! ```

use std::collections::HashMap;
use std::ops::Deref;

use crate::constants::UNKNOWN_WATERMARK;
use crate::error::{Error, FetchPartitionError, Result};
use crate::iter::FetchesRecordIter;
use crate::record::Record;

/// One partition's slice of a broker fetch response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchPartition {
    pub partition: i32,
    /// Error for this partition in the fetch.
    ///
    /// Fatal errors (data loss, non-retriable codes) mean the partition will
    /// not be fetched again by the layer driving fetches.
    pub err: Option<FetchPartitionError>,
    /// Offset replicated to all in-sync replicas.
    pub high_watermark: i64,
    /// Offset below which every record, transactional or not, is decided.
    /// Always at or under the high watermark.
    pub last_stable_offset: i64,
    /// Earliest offset still retained in the partition.
    pub log_start_offset: i64,
    pub records: Vec<Record>,
}

impl FetchPartition {
    /// A successful partition result.
    ///
    /// Rejects offsets that do not satisfy
    /// `log_start_offset <= last_stable_offset <= high_watermark`.
    pub fn success(
        partition: i32,
        high_watermark: i64,
        last_stable_offset: i64,
        log_start_offset: i64,
        records: Vec<Record>,
    ) -> Result<Self> {
        let fp = Self {
            partition,
            err: None,
            high_watermark,
            last_stable_offset,
            log_start_offset,
            records,
        };
        if !fp.offsets_consistent() {
            return Err(Error::InvalidOffsets {
                partition,
                log_start_offset,
                last_stable_offset,
                high_watermark,
            });
        }
        Ok(fp)
    }

    /// An errored partition result. Watermarks are unknown and set to -1.
    pub fn error(partition: i32, err: impl Into<FetchPartitionError>) -> Self {
        Self {
            partition,
            err: Some(err.into()),
            high_watermark: UNKNOWN_WATERMARK,
            last_stable_offset: UNKNOWN_WATERMARK,
            log_start_offset: UNKNOWN_WATERMARK,
            records: vec![],
        }
    }

    /// Whether `log_start_offset <= last_stable_offset <= high_watermark`.
    pub fn offsets_consistent(&self) -> bool {
        self.log_start_offset <= self.last_stable_offset
            && self.last_stable_offset <= self.high_watermark
    }

    pub fn each_record<'a, F: FnMut(&'a Record)>(&'a self, f: F) {
        self.records.iter().for_each(f);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

/// One topic's slice of a broker fetch response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchTopic {
    pub topic: String,
    pub partitions: Vec<FetchPartition>,
}

impl FetchTopic {
    pub fn new(topic: impl Into<String>, partitions: Vec<FetchPartition>) -> Self {
        Self {
            topic: topic.into(),
            partitions,
        }
    }

    pub fn each_record<'a, F: FnMut(&'a Record)>(&'a self, mut f: F) {
        for partition in &self.partitions {
            partition.records.iter().for_each(&mut f);
        }
    }

    pub fn num_records(&self) -> usize {
        self.partitions.iter().map(|p| p.records.len()).sum()
    }
}

/// A single broker's fetch response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fetch {
    pub topics: Vec<FetchTopic>,
}

impl Fetch {
    pub fn new(topics: Vec<FetchTopic>) -> Self {
        Self { topics }
    }
}

/// A topic name paired with one of its partitions, built by
/// [`Fetches::each_partition`].
#[derive(Debug, Clone, Copy)]
pub struct FetchTopicPartition<'a> {
    pub topic: &'a str,
    pub partition: &'a FetchPartition,
}

impl<'a> FetchTopicPartition<'a> {
    pub fn each_record<F: FnMut(&'a Record)>(&self, f: F) {
        self.partition.records.iter().for_each(f);
    }

    pub fn records(&self) -> &'a [Record] {
        &self.partition.records
    }
}

/// All partitions for one topic across every response in a batch, built by
/// [`Fetches::each_topic`].
#[derive(Debug, Clone)]
pub struct FetchTopicView<'a> {
    pub topic: &'a str,
    partitions: ViewPartitions<'a>,
}

#[derive(Debug, Clone)]
enum ViewPartitions<'a> {
    /// The topic came from a single response and is borrowed as is.
    Whole(&'a [FetchPartition]),
    Merged(Vec<&'a FetchPartition>),
}

impl<'a> FetchTopicView<'a> {
    /// Partitions in response order; a partition id may repeat if more than
    /// one response carried it.
    pub fn partitions(&self) -> impl Iterator<Item = &'a FetchPartition> {
        let (whole, merged): (&'a [FetchPartition], &[&'a FetchPartition]) =
            match &self.partitions {
                ViewPartitions::Whole(partitions) => (*partitions, &[]),
                ViewPartitions::Merged(partitions) => (&[], partitions.as_slice()),
            };
        whole.iter().chain(merged.iter().copied())
    }

    pub fn num_partitions(&self) -> usize {
        match &self.partitions {
            ViewPartitions::Whole(partitions) => partitions.len(),
            ViewPartitions::Merged(partitions) => partitions.len(),
        }
    }

    pub fn each_partition<F: FnMut(FetchTopicPartition<'a>)>(&self, mut f: F) {
        for partition in self.partitions() {
            f(FetchTopicPartition {
                topic: self.topic,
                partition,
            });
        }
    }

    pub fn each_record<F: FnMut(&'a Record)>(&self, mut f: F) {
        for partition in self.partitions() {
            partition.records.iter().for_each(&mut f);
        }
    }

    pub fn num_records(&self) -> usize {
        self.partitions().map(|p| p.records.len()).sum()
    }
}

/// A partition error along with the topic and partition it was on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub topic: String,
    pub partition: i32,
    pub err: FetchPartitionError,
}

/// A batch of fetch responses from one or more brokers.
///
/// Derefs to `[Fetch]`. Iterating `&Fetches` yields records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fetches(Vec<Fetch>);

impl Fetches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fetch: Fetch) {
        self.0.push(fetch);
    }

    pub fn into_inner(self) -> Vec<Fetch> {
        self.0
    }

    /// Every partition error in the batch, with its topic and partition.
    ///
    /// See [`crate::error`] for the three classes of error that can appear.
    pub fn errors(&self) -> Vec<FetchError> {
        let mut errs = Vec::new();
        self.each_err(|topic, partition, err| {
            errs.push(FetchError {
                topic: topic.to_string(),
                partition,
                err: err.clone(),
            })
        });
        if !errs.is_empty() {
            tracing::debug!(count = errs.len(), "fetch contains partition errors");
        }
        errs
    }

    /// Calls `f` for every partition that had a fetch error. Never stops
    /// early.
    pub fn each_err<F>(&self, mut f: F)
    where
        F: FnMut(&str, i32, &FetchPartitionError),
    {
        for fetch in &self.0 {
            for ft in &fetch.topics {
                for fp in &ft.partitions {
                    if let Some(err) = &fp.err {
                        f(&ft.topic, fp.partition, err);
                    }
                }
            }
        }
    }

    /// The first partition error in the batch, if any.
    pub fn first_err(&self) -> Option<FetchError> {
        self.0
            .iter()
            .flat_map(|f| &f.topics)
            .flat_map(|t| t.partitions.iter().map(move |p| (t, p)))
            .find_map(|(t, p)| {
                p.err.as_ref().map(|err| FetchError {
                    topic: t.topic.clone(),
                    partition: p.partition,
                    err: err.clone(),
                })
            })
    }

    /// Iterator over all records in the batch.
    ///
    /// Errors are not surfaced by the iterator; inspect [`errors`](Self::errors)
    /// as well.
    pub fn record_iter(&self) -> FetchesRecordIter<'_> {
        FetchesRecordIter::new(&self.0)
    }

    /// Calls `f` for each record, in the same order as
    /// [`record_iter`](Self::record_iter).
    pub fn each_record<'a, F: FnMut(&'a Record)>(&'a self, mut f: F) {
        let mut iter = self.record_iter();
        while !iter.done() {
            if let Some(record) = iter.next() {
                f(record);
            }
        }
    }

    /// Calls `f` for each partition of each topic of each response.
    ///
    /// A topic is visited once per response that carries it; no
    /// deduplication is done.
    pub fn each_partition<'a, F: FnMut(FetchTopicPartition<'a>)>(&'a self, mut f: F) {
        for fetch in &self.0 {
            for topic in &fetch.topics {
                for partition in &topic.partitions {
                    f(FetchTopicPartition {
                        topic: &topic.topic,
                        partition,
                    });
                }
            }
        }
    }

    /// Calls `f` once per distinct topic, with the partitions for that topic
    /// from every response grouped together.
    ///
    /// The order topics are visited in is unspecified. A batch with a single
    /// response is forwarded in its original order without grouping.
    pub fn each_topic<'a, F: FnMut(FetchTopicView<'a>)>(&'a self, mut f: F) {
        match self.0.as_slice() {
            [] => {}
            [only] => {
                for topic in &only.topics {
                    f(FetchTopicView {
                        topic: &topic.topic,
                        partitions: ViewPartitions::Whole(&topic.partitions),
                    });
                }
            }
            many => {
                let mut topics: HashMap<&'a str, Vec<&'a FetchPartition>> = HashMap::new();
                for fetch in many {
                    for topic in &fetch.topics {
                        topics
                            .entry(topic.topic.as_str())
                            .or_default()
                            .extend(topic.partitions.iter());
                    }
                }
                tracing::trace!(
                    responses = many.len(),
                    topics = topics.len(),
                    "grouped fetch partitions by topic"
                );
                for (topic, partitions) in topics {
                    f(FetchTopicView {
                        topic,
                        partitions: ViewPartitions::Merged(partitions),
                    });
                }
            }
        }
    }

    /// All records in the batch, in iteration order.
    pub fn records(&self) -> Vec<&Record> {
        self.record_iter().collect()
    }

    pub fn num_records(&self) -> usize {
        self.0
            .iter()
            .flat_map(|f| &f.topics)
            .map(FetchTopic::num_records)
            .sum()
    }

    /// Whether the batch has neither records nor errors.
    pub fn is_empty(&self) -> bool {
        self.0
            .iter()
            .flat_map(|f| &f.topics)
            .flat_map(|t| &t.partitions)
            .all(|p| p.records.is_empty() && p.err.is_none())
    }
}

impl Deref for Fetches {
    type Target = [Fetch];

    fn deref(&self) -> &[Fetch] {
        &self.0
    }
}

impl From<Vec<Fetch>> for Fetches {
    fn from(fetches: Vec<Fetch>) -> Self {
        Fetches(fetches)
    }
}

impl FromIterator<Fetch> for Fetches {
    fn from_iter<I: IntoIterator<Item = Fetch>>(iter: I) -> Self {
        Fetches(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Fetches {
    type Item = &'a Record;
    type IntoIter = FetchesRecordIter<'a>;

    fn into_iter(self) -> FetchesRecordIter<'a> {
        self.record_iter()
    }
}
