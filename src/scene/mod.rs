// scene/mod.rs

pub mod components;
pub mod extract;
pub mod sorter;

// Re-export all components
pub use components::{MeshComponent, Name, ProgramComponent, StateComponent, Visible, WorldPosition};
pub use extract::extract_batches;
