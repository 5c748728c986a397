//! Pull-style record iteration over a [`Fetches`](crate::fetch::Fetches) batch.

use std::iter::FusedIterator;

use crate::fetch::Fetch;
use crate::record::Record;

/// Iterates over every record in a batch of fetches, in response, topic,
/// partition and record order.
///
/// The iterator keeps a cursor per level and a shrinking view over the
/// responses not yet exhausted. Empty topics and partitions are skipped
/// eagerly after every step, so [`done`](Self::done) is accurate before each
/// call to [`next`](Iterator::next). Single pass; it cannot be rewound.
#[derive(Debug, Clone)]
pub struct FetchesRecordIter<'a> {
    fetches: &'a [Fetch],
    ti: usize, // topic in fetches[0]
    pi: usize, // partition in current topic
    ri: usize, // record in current partition
}

impl<'a> FetchesRecordIter<'a> {
    pub(crate) fn new(fetches: &'a [Fetch]) -> Self {
        let mut iter = Self {
            fetches,
            ti: 0,
            pi: 0,
            ri: 0,
        };
        iter.prepare_next();
        iter
    }

    /// Whether every record has been returned.
    #[inline]
    pub fn done(&self) -> bool {
        self.fetches.is_empty()
    }

    /// Moves the cursors forward until they address a record or the batch is
    /// exhausted.
    fn prepare_next(&mut self) {
        let mut fetches = self.fetches;
        while let Some((fetch, rest)) = fetches.split_first() {
            let Some(topic) = fetch.topics.get(self.ti) else {
                fetches = rest;
                self.ti = 0;
                continue;
            };
            let Some(partition) = topic.partitions.get(self.pi) else {
                self.ti += 1;
                self.pi = 0;
                continue;
            };
            if self.ri >= partition.records.len() {
                self.pi += 1;
                self.ri = 0;
                continue;
            }
            break;
        }
        self.fetches = fetches;
    }
}

impl<'a> Iterator for FetchesRecordIter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<&'a Record> {
        let fetches = self.fetches;
        let fetch = fetches.first()?;
        let record = &fetch.topics[self.ti].partitions[self.pi].records[self.ri];
        self.ri += 1;
        self.prepare_next();
        Some(record)
    }
}

impl FusedIterator for FetchesRecordIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchPartition, FetchTopic, Fetches};
    use crate::record::string_record;

    fn partition(id: i32, values: &[&'static str]) -> FetchPartition {
        FetchPartition {
            partition: id,
            records: values.iter().map(|v| string_record(*v)).collect(),
            ..Default::default()
        }
    }

    fn values(iter: FetchesRecordIter<'_>) -> Vec<&[u8]> {
        iter.map(|r| r.value.as_ref()).collect()
    }

    #[test]
    fn test_empty_batch_is_done_immediately() {
        let fetches = Fetches::default();
        let mut iter = fetches.record_iter();
        assert!(iter.done());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_batch_of_empty_responses_is_done_immediately() {
        let fetches = Fetches::from(vec![
            Fetch::default(),
            Fetch::new(vec![FetchTopic::new("a", vec![])]),
            Fetch::new(vec![FetchTopic::new("b", vec![partition(0, &[])])]),
        ]);
        assert!(fetches.record_iter().done());
    }

    #[test]
    fn test_skips_empty_levels_between_records() {
        let fetches = Fetches::from(vec![
            Fetch::new(vec![
                FetchTopic::new("empty", vec![]),
                FetchTopic::new(
                    "t",
                    vec![partition(0, &[]), partition(1, &["a"]), partition(2, &[])],
                ),
            ]),
            Fetch::default(),
            Fetch::new(vec![FetchTopic::new(
                "u",
                vec![partition(0, &["b", "c"]), partition(1, &[])],
            )]),
            Fetch::new(vec![FetchTopic::new("v", vec![])]),
        ]);

        assert_eq!(
            values(fetches.record_iter()),
            vec![&b"a"[..], &b"b"[..], &b"c"[..]]
        );
    }

    #[test]
    fn test_done_is_accurate_before_each_next() {
        let fetches = Fetches::from(vec![
            Fetch::new(vec![FetchTopic::new("t", vec![partition(0, &["a"])])]),
            Fetch::new(vec![FetchTopic::new("t", vec![partition(1, &[])])]),
        ]);
        let mut iter = fetches.record_iter();
        assert!(!iter.done());
        assert_eq!(iter.next().unwrap().value.as_ref(), b"a");
        // The trailing empty response has already been skipped.
        assert!(iter.done());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_iterator_does_not_touch_source() {
        let fetches = Fetches::from(vec![Fetch::new(vec![FetchTopic::new(
            "t",
            vec![partition(0, &["a", "b"])],
        )])]);
        let before = fetches.clone();
        let _ = fetches.record_iter().count();
        assert_eq!(fetches, before);
        assert_eq!(fetches.record_iter().count(), 2);
    }
}
