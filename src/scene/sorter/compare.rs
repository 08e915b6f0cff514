// scene/sorter/compare.rs
use super::{Partition, Sorter};
use crate::renderer::batch::{RenderBatch, SortableBatch};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Tie handling for batches that compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStability {
    /// Equal batches keep their input order.
    #[default]
    Stable,
    /// Equal batches may end up in any order.
    Unstable,
}

type CompareFn<B> = dyn Fn(&B, &B) -> Ordering + Send + Sync;

/// Leaf sorter ordering a whole sequence with a comparison function.
/// Does not partition any further.
pub struct ComparisonSorter<B> {
    compare: Box<CompareFn<B>>,
    stability: SortStability,
}

impl<B> ComparisonSorter<B> {
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&B, &B) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Box::new(compare),
            stability: SortStability::Stable,
        }
    }

    pub fn with_stability(mut self, stability: SortStability) -> Self {
        self.stability = stability;
        self
    }

    pub fn sort_in_place(&self, batches: &mut [B]) {
        match self.stability {
            SortStability::Stable => batches.sort_by(|a, b| (self.compare)(a, b)),
            SortStability::Unstable => batches.sort_unstable_by(|a, b| (self.compare)(a, b)),
        }
    }
}

impl<B: SortableBatch + 'static> ComparisonSorter<B>
where
    B::Program: Ord,
{
    /// Ascending program id.
    pub fn by_program() -> Self {
        Self::new(|a: &B, b: &B| a.program().cmp(&b.program()))
    }
}

impl ComparisonSorter<RenderBatch> {
    pub fn by_mesh() -> Self {
        Self::new(|a: &RenderBatch, b: &RenderBatch| a.mesh.cmp(&b.mesh))
    }

    /// Farthest first, the order blended geometry has to be composited in.
    pub fn back_to_front(camera_pos: Vec3) -> Self {
        Self::new(move |a: &RenderBatch, b: &RenderBatch| {
            // total_cmp so a NaN distance cannot break the ordering
            b.view_distance_sq(camera_pos)
                .total_cmp(&a.view_distance_sq(camera_pos))
        })
    }

    /// Nearest first, maximizing early depth rejection for opaque geometry.
    pub fn front_to_back(camera_pos: Vec3) -> Self {
        Self::new(move |a: &RenderBatch, b: &RenderBatch| {
            a.view_distance_sq(camera_pos)
                .total_cmp(&b.view_distance_sq(camera_pos))
        })
    }
}

impl<B> Sorter<B> for ComparisonSorter<B> {
    fn partition<'s>(&'s self, batches: Vec<B>) -> Vec<Partition<'s, B>> {
        vec![Partition::leaf(self.sort(batches))]
    }

    fn sort(&self, mut batches: Vec<B>) -> Vec<B> {
        self.sort_in_place(&mut batches);
        batches
    }
}
