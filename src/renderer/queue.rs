// renderer/queue.rs
use super::batch::SortableBatch;
use super::stats::SortStats;
use crate::scene::sorter::{SortError, Sorter};
use log::{debug, warn};
use std::sync::Arc;

/// Consumer of the sorted batch list. Receives batches in draw order.
pub trait BatchSubmitter<B> {
    fn submit(&mut self, batch: &B);
}

impl<B, F: FnMut(&B)> BatchSubmitter<B> for F {
    fn submit(&mut self, batch: &B) {
        self(batch)
    }
}

/// Collects one frame of batches and orders them with the configured sorter.
pub struct RenderQueue<B> {
    sorter: Arc<dyn Sorter<B>>,
    pending: Option<Vec<B>>,
    frame_index: u64,
}

impl<B: SortableBatch> RenderQueue<B> {
    pub fn new(sorter: Arc<dyn Sorter<B>>) -> Self {
        Self {
            sorter,
            pending: None,
            frame_index: 0,
        }
    }

    pub fn begin_frame(&mut self) {
        if let Some(stale) = self.pending.take() {
            if !stale.is_empty() {
                warn!(
                    "Frame {} was never finished; dropping {} batches",
                    self.frame_index,
                    stale.len()
                );
            }
        }

        self.frame_index += 1;
        self.pending = Some(Vec::new());
    }

    pub fn is_recording(&self) -> bool {
        self.pending.is_some()
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn push(&mut self, batch: B) -> Result<(), SortError> {
        self.pending
            .as_mut()
            .ok_or(SortError::FrameNotStarted)?
            .push(batch);
        Ok(())
    }

    pub fn extend<I: IntoIterator<Item = B>>(&mut self, batches: I) -> Result<(), SortError> {
        self.pending
            .as_mut()
            .ok_or(SortError::FrameNotStarted)?
            .extend(batches);
        Ok(())
    }

    pub fn pending_len(&self) -> usize {
        self.pending.as_ref().map_or(0, Vec::len)
    }

    /// Closes the frame and returns its batches in draw order.
    pub fn finish(&mut self) -> Result<SortedFrame<B>, SortError> {
        let batches = self.sorter.try_sort(self.pending.take())?;
        let frame = SortedFrame::new(self.frame_index, batches);

        if log::log_enabled!(log::Level::Debug) {
            debug!("Frame {}: {}", frame.frame_index, frame.stats());
        }

        Ok(frame)
    }
}

/// Sorted batches of one frame.
#[derive(Debug)]
pub struct SortedFrame<B> {
    frame_index: u64,
    batches: Vec<B>,
    /// Start of the blended run, when every opaque batch precedes every
    /// blended one.
    blend_split: Option<usize>,
    blended_count: usize,
}

impl<B: SortableBatch> SortedFrame<B> {
    fn new(frame_index: u64, batches: Vec<B>) -> Self {
        let split = batches.partition_point(|b| !b.is_blended());
        let blend_split = batches[split..]
            .iter()
            .all(SortableBatch::is_blended)
            .then_some(split);
        let blended_count = batches.iter().filter(|b| b.is_blended()).count();

        Self {
            frame_index,
            batches,
            blend_split,
            blended_count,
        }
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn all(&self) -> &[B] {
        &self.batches
    }

    /// All opaque batches, or `None` if the chain left some of them after
    /// a blended batch.
    pub fn opaque(&self) -> Option<&[B]> {
        self.blend_split.map(|split| &self.batches[..split])
    }

    /// All blended batches, or `None` if they are not one trailing run.
    pub fn blended(&self) -> Option<&[B]> {
        self.blend_split.map(|split| &self.batches[split..])
    }

    pub fn opaque_count(&self) -> usize {
        self.batches.len() - self.blended_count
    }

    pub fn blended_count(&self) -> usize {
        self.blended_count
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn stats(&self) -> SortStats {
        SortStats::measure(&self.batches)
    }

    /// Hands every batch to `submitter` in draw order.
    pub fn submit_to<S: BatchSubmitter<B>>(&self, submitter: &mut S) -> usize {
        for batch in &self.batches {
            submitter.submit(batch);
        }
        self.batches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Handle;
    use crate::renderer::batch::RenderBatch;
    use crate::renderer::state::BlendState;
    use crate::scene::sorter::{BlendSorter, Unsorted};

    fn batch(program: u32, blended: bool) -> RenderBatch {
        let batch = RenderBatch::new(Handle::new(program), Handle::new(0));
        if blended {
            batch.with_state(BlendState::alpha())
        } else {
            batch
        }
    }

    fn queue() -> RenderQueue<RenderBatch> {
        let sorter: BlendSorter<RenderBatch> = BlendSorter::opaque_first();
        RenderQueue::new(Arc::new(sorter))
    }

    #[test]
    fn push_outside_frame_fails() {
        let mut queue = queue();
        assert_eq!(queue.push(batch(1, false)), Err(SortError::FrameNotStarted));
        assert_eq!(queue.extend(vec![batch(1, false)]), Err(SortError::FrameNotStarted));
    }

    #[test]
    fn finish_without_frame_is_invalid() {
        let mut queue = queue();
        assert!(matches!(
            queue.finish(),
            Err(SortError::InvalidArgument(_))
        ));
    }

    #[test]
    fn finish_closes_the_frame() {
        let mut queue = queue();
        queue.begin_frame();
        queue.push(batch(1, false)).unwrap();
        assert!(queue.finish().is_ok());
        assert!(!queue.is_recording());
        assert!(queue.finish().is_err());
    }

    #[test]
    fn begin_frame_discards_unfinished_batches() {
        let mut queue = queue();
        queue.begin_frame();
        queue.push(batch(1, false)).unwrap();
        queue.begin_frame();

        assert_eq!(queue.pending_len(), 0);
        assert_eq!(queue.frame_index(), 2);
    }

    #[test]
    fn frame_splits_opaque_and_blended_ranges() {
        let mut queue = queue();
        queue.begin_frame();
        queue
            .extend(vec![batch(1, true), batch(2, false), batch(3, true), batch(4, false)])
            .unwrap();

        let frame = queue.finish().unwrap();

        assert_eq!(frame.len(), 4);
        let opaque = frame.opaque().unwrap();
        let blended = frame.blended().unwrap();
        assert_eq!(opaque.len(), 2);
        assert_eq!(blended.len(), 2);
        assert!(opaque.iter().all(|b| !b.is_blended()));
        assert!(blended.iter().all(|b| b.is_blended()));
        assert_eq!(frame.opaque_count(), 2);
        assert_eq!(frame.blended_count(), 2);
        assert_eq!(frame.stats().blend_order_violations, 0);
    }

    #[test]
    fn interleaved_frame_has_no_blend_split() {
        let mut queue: RenderQueue<RenderBatch> = RenderQueue::new(Arc::new(Unsorted));
        queue.begin_frame();
        queue.extend(vec![batch(1, true), batch(2, false)]).unwrap();

        let frame = queue.finish().unwrap();

        assert!(frame.opaque().is_none());
        assert!(frame.blended().is_none());
        assert_eq!(frame.opaque_count(), 1);
        assert_eq!(frame.blended_count(), 1);
    }

    #[test]
    fn single_kind_frames_split_at_the_edge() {
        let mut queue: RenderQueue<RenderBatch> = RenderQueue::new(Arc::new(Unsorted));

        queue.begin_frame();
        queue.extend(vec![batch(1, false), batch(2, false)]).unwrap();
        let frame = queue.finish().unwrap();
        assert_eq!(frame.opaque().map(<[_]>::len), Some(2));
        assert_eq!(frame.blended().map(<[_]>::len), Some(0));

        queue.begin_frame();
        queue.extend(vec![batch(1, true), batch(2, true)]).unwrap();
        let frame = queue.finish().unwrap();
        assert_eq!(frame.opaque().map(<[_]>::len), Some(0));
        assert_eq!(frame.blended().map(<[_]>::len), Some(2));
    }

    #[test]
    fn submit_preserves_sorted_order() {
        let mut queue = queue();
        queue.begin_frame();
        queue
            .extend(vec![batch(1, true), batch(2, false), batch(3, false)])
            .unwrap();
        let frame = queue.finish().unwrap();

        let mut drawn = Vec::new();
        let submitted = frame.submit_to(&mut |b: &RenderBatch| drawn.push(b.program.index()));

        assert_eq!(submitted, 3);
        assert_eq!(drawn, vec![2, 3, 1]);
    }
}
