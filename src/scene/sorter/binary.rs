// scene/sorter/binary.rs
use super::{Partition, Sorter};
use crate::renderer::batch::SortableBatch;
use std::sync::Arc;

/// Decides which branch of a [`BinaryPartitionSorter`] a batch goes to.
/// Branch A is drawn first, so `true` means "higher priority".
pub trait Priority<B>: Send + Sync {
    fn route_to_a(&self, batch: &B) -> bool;
}

impl<B, F> Priority<B> for F
where
    F: Fn(&B) -> bool + Send + Sync,
{
    fn route_to_a(&self, batch: &B) -> bool {
        self(batch)
    }
}

/// Two-way stable split. Group A always precedes group B in the output,
/// and an unset branch leaves its group in input order.
pub struct BinaryPartitionSorter<B, P> {
    priority: P,
    branch_a: Option<Arc<dyn Sorter<B>>>,
    branch_b: Option<Arc<dyn Sorter<B>>>,
}

impl<B, P: Priority<B>> BinaryPartitionSorter<B, P> {
    pub fn new(priority: P) -> Self {
        Self {
            priority,
            branch_a: None,
            branch_b: None,
        }
    }

    pub fn with_branch_a(mut self, sorter: Arc<dyn Sorter<B>>) -> Self {
        self.branch_a = Some(sorter);
        self
    }

    pub fn with_branch_b(mut self, sorter: Arc<dyn Sorter<B>>) -> Self {
        self.branch_b = Some(sorter);
        self
    }

    pub fn set_branch_a(&mut self, sorter: Option<Arc<dyn Sorter<B>>>) {
        self.branch_a = sorter;
    }

    pub fn set_branch_b(&mut self, sorter: Option<Arc<dyn Sorter<B>>>) {
        self.branch_b = sorter;
    }
}

impl<B, P: Priority<B>> Sorter<B> for BinaryPartitionSorter<B, P> {
    fn partition<'s>(&'s self, batches: Vec<B>) -> Vec<Partition<'s, B>> {
        let mut a = Vec::new();
        let mut b = Vec::new();

        for batch in batches {
            if self.priority.route_to_a(&batch) {
                a.push(batch);
            } else {
                b.push(batch);
            }
        }

        vec![
            Partition::new(self.branch_a.as_deref(), a),
            Partition::new(self.branch_b.as_deref(), b),
        ]
    }
}

/// Routes batches without an enabled blend state to branch A.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaqueFirst;

impl<B: SortableBatch> Priority<B> for OpaqueFirst {
    fn route_to_a(&self, batch: &B) -> bool {
        !batch.is_blended()
    }
}

/// Opaque batches (branch A) before blended batches (branch B), so depth
/// rejection works for the bulk of the frame and blending composites last.
pub type BlendSorter<B> = BinaryPartitionSorter<B, OpaqueFirst>;

impl<B: SortableBatch> BinaryPartitionSorter<B, OpaqueFirst> {
    pub fn opaque_first() -> Self {
        Self::new(OpaqueFirst)
    }
}
