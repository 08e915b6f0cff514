// renderer/batch.rs
use super::state::{BlendState, RenderState, StateCategory, StateSet};
use crate::asset::{MeshHandle, ProgramHandle};
use glam::Vec3;
use std::hash::Hash;

/// What a sorter needs to know about a batch.
///
/// Sorters only read through this trait and never modify a batch; they only
/// move batches around.
pub trait SortableBatch {
    /// Grouping key identifying the shader program.
    type Program: Eq + Hash + Clone;

    fn state_at(&self, category: StateCategory) -> Option<&RenderState>;

    fn program(&self) -> Self::Program;

    /// True when a blend state is present and enabled.
    fn is_blended(&self) -> bool {
        matches!(
            self.state_at(StateCategory::Blend),
            Some(RenderState::Blend(BlendState { enabled: true, .. }))
        )
    }
}

/// A single drawable unit produced by scene traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBatch {
    pub program: ProgramHandle,
    pub mesh: MeshHandle,
    pub state: StateSet,
    /// World-space center, used for depth ordering.
    pub center: Vec3,
    pub label: Option<String>,
}

impl RenderBatch {
    pub fn new(program: ProgramHandle, mesh: MeshHandle) -> Self {
        Self {
            program,
            mesh,
            state: StateSet::new(),
            center: Vec3::ZERO,
            label: None,
        }
    }

    pub fn with_state(mut self, state: impl Into<RenderState>) -> Self {
        self.state.set(state);
        self
    }

    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn view_distance_sq(&self, camera_pos: Vec3) -> f32 {
        (self.center - camera_pos).length_squared()
    }
}

impl SortableBatch for RenderBatch {
    type Program = ProgramHandle;

    fn state_at(&self, category: StateCategory) -> Option<&RenderState> {
        self.state.state_at(category)
    }

    fn program(&self) -> ProgramHandle {
        self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Handle;

    fn batch() -> RenderBatch {
        RenderBatch::new(Handle::new(1), Handle::new(0))
    }

    #[test]
    fn missing_blend_state_is_opaque() {
        assert!(!batch().is_blended());
    }

    #[test]
    fn disabled_blend_state_is_opaque() {
        assert!(!batch().with_state(BlendState::disabled()).is_blended());
    }

    #[test]
    fn enabled_blend_state_is_blended() {
        assert!(batch().with_state(BlendState::alpha()).is_blended());
        assert!(batch().with_state(BlendState::additive()).is_blended());
    }

    #[test]
    fn view_distance_is_squared() {
        let b = batch().with_center(Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(b.view_distance_sq(Vec3::ZERO), 25.0);
    }
}
