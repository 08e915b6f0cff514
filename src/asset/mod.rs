pub mod handle;

pub use handle::Handle;

/// Marker for compiled shader program handles.
#[derive(Debug)]
pub enum ShaderProgram {}

/// Marker for mesh (vertex/index buffer) handles.
#[derive(Debug)]
pub enum Mesh {}

pub type ProgramHandle = Handle<ShaderProgram>;
pub type MeshHandle = Handle<Mesh>;
