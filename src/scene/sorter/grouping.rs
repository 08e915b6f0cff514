// scene/sorter/grouping.rs
use super::{Partition, Sorter};
use crate::renderer::batch::SortableBatch;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

type KeyFn<B, K> = dyn Fn(&B) -> K + Send + Sync;

/// Groups batches sharing a key into one partition each.
///
/// Groups come out in the order their key was first seen, and every group is
/// handed to the same child sorter. Drawing a whole group back to back means
/// the keyed state (usually the shader program) is bound once per group.
pub struct GroupingSorter<B, K> {
    key: Box<KeyFn<B, K>>,
    child: Option<Arc<dyn Sorter<B>>>,
}

/// Groups batches by shader program.
pub type ProgramGroupingSorter<B> = GroupingSorter<B, <B as SortableBatch>::Program>;

impl<B, K: Eq + Hash> GroupingSorter<B, K> {
    pub fn by_key<F>(key: F, child: Option<Arc<dyn Sorter<B>>>) -> Self
    where
        F: Fn(&B) -> K + Send + Sync + 'static,
    {
        Self {
            key: Box::new(key),
            child,
        }
    }
}

impl<B: SortableBatch + 'static> GroupingSorter<B, B::Program> {
    pub fn by_program(child: Option<Arc<dyn Sorter<B>>>) -> Self {
        Self::by_key(|batch: &B| batch.program(), child)
    }
}

impl<B, K: Eq + Hash> Sorter<B> for GroupingSorter<B, K> {
    fn partition<'s>(&'s self, batches: Vec<B>) -> Vec<Partition<'s, B>> {
        // HashMap iteration order is arbitrary, so group order lives in `groups`.
        let mut lookup: HashMap<K, usize> = HashMap::new();
        let mut groups: Vec<Vec<B>> = Vec::new();

        for batch in batches {
            let index = *lookup.entry((self.key)(&batch)).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[index].push(batch);
        }

        log::trace!("grouped into {} partitions", groups.len());

        groups
            .into_iter()
            .map(|group| Partition::new(self.child.as_deref(), group))
            .collect()
    }
}
