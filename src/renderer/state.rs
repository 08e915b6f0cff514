// renderer/state.rs

/// Slot of a render state inside a [`StateSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateCategory {
    Blend,
    Depth,
    Cull,
}

impl StateCategory {
    pub const COUNT: usize = 3;

    pub const ALL: [StateCategory; Self::COUNT] = [Self::Blend, Self::Depth, Self::Cull];

    pub const fn index(self) -> usize {
        match self {
            Self::Blend => 0,
            Self::Depth => 1,
            Self::Cull => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendEquation {
    Add,
    Subtract,
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendState {
    pub enabled: bool,
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
    pub equation: BlendEquation,
}

impl BlendState {
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::Zero,
            equation: BlendEquation::Add,
        }
    }

    /// Classic straight-alpha compositing.
    pub const fn alpha() -> Self {
        Self {
            enabled: true,
            src_factor: BlendFactor::SrcAlpha,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
            equation: BlendEquation::Add,
        }
    }

    pub const fn additive() -> Self {
        Self {
            enabled: true,
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::One,
            equation: BlendEquation::Add,
        }
    }
}

impl Default for BlendState {
    fn default() -> Self {
        Self::disabled()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthState {
    pub test: bool,
    pub write: bool,
}

impl Default for DepthState {
    fn default() -> Self {
        Self {
            test: true,
            write: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CullState {
    pub enabled: bool,
    pub front_face_ccw: bool,
}

impl Default for CullState {
    fn default() -> Self {
        Self {
            enabled: true,
            front_face_ccw: true,
        }
    }
}

/// One entry of a [`StateSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderState {
    Blend(BlendState),
    Depth(DepthState),
    Cull(CullState),
}

impl RenderState {
    pub const fn category(&self) -> StateCategory {
        match self {
            Self::Blend(_) => StateCategory::Blend,
            Self::Depth(_) => StateCategory::Depth,
            Self::Cull(_) => StateCategory::Cull,
        }
    }
}

impl From<BlendState> for RenderState {
    fn from(state: BlendState) -> Self {
        Self::Blend(state)
    }
}

impl From<DepthState> for RenderState {
    fn from(state: DepthState) -> Self {
        Self::Depth(state)
    }
}

impl From<CullState> for RenderState {
    fn from(state: CullState) -> Self {
        Self::Cull(state)
    }
}

/// Per-category render state attached to a batch.
///
/// Every slot is either empty (inherit the pipeline default) or holds a state
/// of its own category; [`StateSet::set`] routes by [`RenderState::category`],
/// so a slot can never contain a mismatched state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StateSet {
    slots: [Option<RenderState>; StateCategory::COUNT],
}

impl StateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, state: impl Into<RenderState>) -> Self {
        self.set(state);
        self
    }

    /// Stores `state` in its category slot, returning the previous entry.
    pub fn set(&mut self, state: impl Into<RenderState>) -> Option<RenderState> {
        let state = state.into();
        self.slots[state.category().index()].replace(state)
    }

    pub fn clear(&mut self, category: StateCategory) -> Option<RenderState> {
        self.slots[category.index()].take()
    }

    pub fn state_at(&self, category: StateCategory) -> Option<&RenderState> {
        self.slots[category.index()].as_ref()
    }

    pub fn blend(&self) -> Option<&BlendState> {
        match self.state_at(StateCategory::Blend) {
            Some(RenderState::Blend(blend)) => Some(blend),
            _ => None,
        }
    }

    pub fn depth(&self) -> Option<&DepthState> {
        match self.state_at(StateCategory::Depth) {
            Some(RenderState::Depth(depth)) => Some(depth),
            _ => None,
        }
    }

    pub fn cull(&self) -> Option<&CullState> {
        match self.state_at(StateCategory::Cull) {
            Some(RenderState::Cull(cull)) => Some(cull),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_indices_are_dense() {
        for (expected, category) in StateCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), expected);
        }
    }

    #[test]
    fn set_routes_state_to_its_category() {
        let set = StateSet::new()
            .with(BlendState::alpha())
            .with(DepthState {
                test: true,
                write: false,
            });

        assert_eq!(set.blend(), Some(&BlendState::alpha()));
        assert_eq!(set.depth().map(|d| d.write), Some(false));
        assert!(set.cull().is_none());
        assert!(matches!(
            set.state_at(StateCategory::Blend),
            Some(RenderState::Blend(_))
        ));
    }

    #[test]
    fn set_replaces_previous_entry() {
        let mut set = StateSet::new().with(BlendState::alpha());
        let previous = set.set(BlendState::disabled());

        assert_eq!(previous, Some(RenderState::Blend(BlendState::alpha())));
        assert_eq!(set.blend().map(|b| b.enabled), Some(false));
    }

    #[test]
    fn clear_empties_slot() {
        let mut set = StateSet::new().with(CullState::default());
        assert!(!set.is_empty());
        set.clear(StateCategory::Cull);
        assert!(set.is_empty());
    }
}
