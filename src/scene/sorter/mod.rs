// scene/sorter/mod.rs
//! Recursive render-batch ordering.
//!
//! A [`Sorter`] splits a batch list into ordered partitions, each optionally
//! handed to a child sorter, and concatenates the results. Chains are wired
//! once at renderer setup and shared across frames through `Arc`, e.g.
//! blend separation -> program grouping -> depth sort.

pub mod binary;
pub mod compare;
pub mod grouping;

pub use binary::{BinaryPartitionSorter, BlendSorter, OpaqueFirst, Priority};
pub use compare::{ComparisonSorter, SortStability};
pub use grouping::{GroupingSorter, ProgramGroupingSorter};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// A required input was missing.
    InvalidArgument(&'static str),
    /// A batch was queued outside of `begin_frame` / `finish`.
    FrameNotStarted,
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::InvalidArgument(what) => write!(f, "Invalid argument: {}", what),
            SortError::FrameNotStarted => write!(f, "No frame in progress"),
        }
    }
}

impl std::error::Error for SortError {}

/// A sub-sequence produced by [`Sorter::partition`].
pub struct Partition<'s, B> {
    /// Sorter applied to `batches`; `None` keeps them in input order.
    pub sorter: Option<&'s dyn Sorter<B>>,
    pub batches: Vec<B>,
}

impl<'s, B> Partition<'s, B> {
    pub fn new(sorter: Option<&'s dyn Sorter<B>>, batches: Vec<B>) -> Self {
        Self { sorter, batches }
    }

    pub fn leaf(batches: Vec<B>) -> Self {
        Self::new(None, batches)
    }
}

impl<B> fmt::Debug for Partition<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partition")
            .field("sorted", &self.sorter.is_some())
            .field("len", &self.batches.len())
            .finish()
    }
}

pub trait Sorter<B>: Send + Sync {
    /// Splits `batches` into ordered sub-sequences. Every input batch must
    /// land in exactly one partition, and relative order inside a partition
    /// follows the input.
    fn partition<'s>(&'s self, batches: Vec<B>) -> Vec<Partition<'s, B>>;

    /// Returns a permutation of `batches`: partitions in order, each one
    /// sorted by its own sorter when it has one.
    fn sort(&self, batches: Vec<B>) -> Vec<B> {
        let total = batches.len();
        let mut sorted = Vec::with_capacity(total);

        for partition in self.partition(batches) {
            log::trace!("{:?}", partition);
            match partition.sorter {
                Some(sorter) => sorted.extend(sorter.sort(partition.batches)),
                None => sorted.extend(partition.batches),
            }
        }

        debug_assert_eq!(sorted.len(), total, "sorter dropped or duplicated batches");
        sorted
    }

    /// [`Sorter::sort`] for a batch list that may not exist.
    fn try_sort(&self, batches: Option<Vec<B>>) -> Result<Vec<B>, SortError> {
        let batches = batches.ok_or(SortError::InvalidArgument("batch list is missing"))?;
        Ok(self.sort(batches))
    }
}

/// Leaves batches in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsorted;

impl<B> Sorter<B> for Unsorted {
    fn partition<'s>(&'s self, batches: Vec<B>) -> Vec<Partition<'s, B>> {
        vec![Partition::leaf(batches)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on even/odd, evens first, and reverses the evens.
    struct EvensFirst {
        evens: Reverse,
    }

    struct Reverse;

    impl Sorter<u32> for Reverse {
        fn partition<'s>(&'s self, mut batches: Vec<u32>) -> Vec<Partition<'s, u32>> {
            batches.reverse();
            vec![Partition::leaf(batches)]
        }
    }

    impl Sorter<u32> for EvensFirst {
        fn partition<'s>(&'s self, batches: Vec<u32>) -> Vec<Partition<'s, u32>> {
            let (evens, odds): (Vec<u32>, Vec<u32>) = batches.into_iter().partition(|n| n % 2 == 0);
            vec![
                Partition::new(Some(&self.evens as &dyn Sorter<u32>), evens),
                Partition::leaf(odds),
            ]
        }
    }

    #[test]
    fn sort_recurses_and_concatenates_in_partition_order() {
        let sorter = EvensFirst { evens: Reverse };
        assert_eq!(sorter.sort(vec![1, 2, 3, 4, 5, 6]), vec![6, 4, 2, 1, 3, 5]);
    }

    #[test]
    fn sort_of_empty_list_is_empty() {
        let sorter = EvensFirst { evens: Reverse };
        assert!(sorter.sort(Vec::new()).is_empty());
    }

    #[test]
    fn try_sort_rejects_missing_list() {
        let sorter = EvensFirst { evens: Reverse };
        assert_eq!(
            sorter.try_sort(None),
            Err(SortError::InvalidArgument("batch list is missing"))
        );
        assert_eq!(sorter.try_sort(Some(vec![3, 2])), Ok(vec![2, 3]));
    }

    #[test]
    fn unsorted_is_identity() {
        assert_eq!(Unsorted.sort(vec![3, 1, 2]), vec![3, 1, 2]);
    }

    #[test]
    fn error_messages_are_readable() {
        let err = SortError::InvalidArgument("batch list is missing");
        assert_eq!(err.to_string(), "Invalid argument: batch list is missing");
        assert_eq!(SortError::FrameNotStarted.to_string(), "No frame in progress");
    }
}
