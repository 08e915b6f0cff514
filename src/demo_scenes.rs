use glam::Vec3;
use hecs::World;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use scene_sorter::asset::Handle;
use scene_sorter::renderer::{BlendState, CullState, DepthState, StateSet};
use scene_sorter::scene::{
    MeshComponent, Name, ProgramComponent, StateComponent, Visible, WorldPosition,
};

/// Scene population used by the demo frame loop.
#[derive(Debug, Clone, Copy)]
pub struct DemoScene {
    pub seed: u64,
    pub entities: usize,
    pub programs: u32,
    pub meshes: u32,
    /// Chance for an entity to use alpha blending.
    pub blended_ratio: f64,
    pub extent: f32,
}

impl Default for DemoScene {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            entities: 2000,
            programs: 12,
            meshes: 40,
            blended_ratio: 0.2,
            extent: 50.0,
        }
    }
}

impl DemoScene {
    pub fn build(&self) -> World {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut world = World::new();

        for i in 0..self.entities {
            let blended = rng.gen_bool(self.blended_ratio);
            let state = if blended {
                StateSet::new()
                    .with(BlendState::alpha())
                    .with(DepthState {
                        test: true,
                        write: false,
                    })
            } else {
                StateSet::new().with(CullState::default())
            };

            let position = Vec3::new(
                rng.gen_range(-self.extent..self.extent),
                rng.gen_range(-self.extent..self.extent),
                rng.gen_range(-self.extent..self.extent),
            );

            world.spawn((
                ProgramComponent(Handle::new(rng.gen_range(0..self.programs))),
                MeshComponent(Handle::new(rng.gen_range(0..self.meshes))),
                StateComponent(state),
                WorldPosition(position),
                Visible(rng.gen_bool(0.95)),
                Name::new(format!("entity_{i}")),
            ));
        }

        world
    }
}
