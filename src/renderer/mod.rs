pub mod batch;
pub mod queue;
pub mod state;
pub mod stats;

pub use batch::{RenderBatch, SortableBatch};
pub use queue::{BatchSubmitter, RenderQueue, SortedFrame};
pub use state::{BlendState, CullState, DepthState, RenderState, StateCategory, StateSet};
pub use stats::SortStats;
