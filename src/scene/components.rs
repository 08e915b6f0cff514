// scene/components.rs
// hecs components read by batch extraction

use crate::asset::{MeshHandle, ProgramHandle};
use crate::renderer::StateSet;
use glam::Vec3;

/// Shader program used to draw the entity
#[derive(Debug, Clone, Copy)]
pub struct ProgramComponent(pub ProgramHandle);

/// Mesh component
#[derive(Debug, Clone, Copy)]
pub struct MeshComponent(pub MeshHandle);

/// Render state overrides (blend, depth, cull)
#[derive(Debug, Clone, Default)]
pub struct StateComponent(pub StateSet);

/// World-space position (computed from hierarchy)
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldPosition(pub Vec3);

/// Visibility component
#[derive(Debug, Clone, Copy)]
pub struct Visible(pub bool);

impl Default for Visible {
    fn default() -> Self {
        Self(true)
    }
}

/// Name component for debugging
#[derive(Debug, Clone)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
