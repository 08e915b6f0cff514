// scene/extract.rs
use super::components::{
    MeshComponent, Name, ProgramComponent, StateComponent, Visible, WorldPosition,
};
use crate::renderer::{RenderBatch, StateSet};
use glam::Vec3;
use hecs::World;

/// Builds this frame's batch list from every drawable entity.
///
/// An entity is drawable when it has both a program and a mesh. Missing
/// `Visible` counts as visible, missing state means pipeline defaults and
/// missing position means the origin.
pub fn extract_batches(world: &World) -> Vec<RenderBatch> {
    let mut query = world.query::<(
        &ProgramComponent,
        &MeshComponent,
        Option<&StateComponent>,
        Option<&WorldPosition>,
        Option<&Visible>,
        Option<&Name>,
    )>();

    let batches: Vec<RenderBatch> = query
        .iter()
        .filter(|(_, (_, _, _, _, visible, _))| visible.map_or(true, |v| v.0))
        .map(
            |(_entity, (program, mesh, state, position, _visible, name))| RenderBatch {
                program: program.0,
                mesh: mesh.0,
                state: state.map(|s| s.0.clone()).unwrap_or_else(StateSet::new),
                center: position.map_or(Vec3::ZERO, |p| p.0),
                label: name.map(|n| n.0.clone()),
            },
        )
        .collect();

    log::trace!("extracted {} batches", batches.len());
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Handle;
    use crate::renderer::{BlendState, SortableBatch};

    #[test]
    fn entities_without_program_or_mesh_are_skipped() {
        let mut world = World::new();
        world.spawn((ProgramComponent(Handle::new(1)), MeshComponent(Handle::new(1))));
        world.spawn((ProgramComponent(Handle::new(2)),));
        world.spawn((MeshComponent(Handle::new(3)),));

        let batches = extract_batches(&world);

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].program.index(), 1);
    }

    #[test]
    fn hidden_entities_are_skipped() {
        let mut world = World::new();
        world.spawn((
            ProgramComponent(Handle::new(1)),
            MeshComponent(Handle::new(1)),
            Visible(false),
        ));
        world.spawn((
            ProgramComponent(Handle::new(2)),
            MeshComponent(Handle::new(2)),
            Visible(true),
        ));

        let batches = extract_batches(&world);

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].program.index(), 2);
    }

    #[test]
    fn optional_components_are_copied() {
        let mut world = World::new();
        world.spawn((
            ProgramComponent(Handle::new(4)),
            MeshComponent(Handle::new(9)),
            StateComponent(StateSet::new().with(BlendState::alpha())),
            WorldPosition(Vec3::new(1.0, 2.0, 3.0)),
            Name::new("glass"),
        ));

        let batches = extract_batches(&world);
        let batch = &batches[0];

        assert!(batch.is_blended());
        assert_eq!(batch.mesh.index(), 9);
        assert_eq!(batch.center, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(batch.label.as_deref(), Some("glass"));
    }
}
