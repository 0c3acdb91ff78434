//! The GPU independent part of the lighting demo: OBJ loading and vertex buffer building, object
//! transforms, shader uniform tables, scene configuration, controls, animations and the
//! per-frame scene script.

pub mod animation;
pub mod config;
pub mod controls;
pub mod mesh;
pub mod obj;
pub mod object;
pub mod scene;
pub mod uniform;

pub use mesh::{MeshData, MeshVertex};
pub use obj::{ObjData, ObjError};
pub use object::Object3D;
pub use scene::DemoState;
pub use uniform::{UniformTable, UniformValue};
