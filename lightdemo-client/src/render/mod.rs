//! Module for anything related to rendering.
//!
//! This module contains the [`RenderProgram`] which draws scene objects with a shader program,
//! the GPU side [`model::Model`] and the lookup of shader sources.

use std::rc::Rc;

use glam::{Mat4, Vec3};
use lightdemo_core::{Object3D, UniformTable, UniformValue};

use crate::abs::ShaderProgram;

pub mod model;
pub mod shaders;

use model::Model;

/// A shader program together with the uniform values it is drawn with.
///
/// Uniforms are kept in a table and uploaded each time the program is started, so values set
/// before a program is bound are not lost.
pub struct RenderProgram {
    program: Option<Rc<ShaderProgram>>,
    uniforms: UniformTable,
}

impl RenderProgram {
    pub fn new() -> Self {
        Self {
            program: None,
            uniforms: UniformTable::new(),
        }
    }

    /// Makes `program` the program used by subsequent draws, and binds it.
    pub fn use_program(&mut self, program: &Rc<ShaderProgram>) {
        program.use_program();
        self.program = Some(Rc::clone(program));
    }

    pub fn set_uniform(&mut self, name: &str, value: impl Into<UniformValue>) {
        self.uniforms.set(name, value);
    }

    #[cfg(test)]
    pub fn uniforms(&self) -> &UniformTable {
        &self.uniforms
    }

    /// Binds the current program and uploads every uniform of the table.
    pub fn start_program(&self) {
        if let Some(program) = &self.program {
            program.use_program();
            program.set_uniforms(&self.uniforms);
        }
    }

    /// Draws each object with the current program.
    pub fn render<'a>(
        &mut self,
        projection: Mat4,
        view: Mat4,
        camera_position: Vec3,
        objects: impl IntoIterator<Item = &'a Object3D<Model>>,
    ) {
        if self.program.is_none() {
            log::warn!("Render requested without a shader program");
            return;
        }

        self.set_uniform("projection", projection);
        self.set_uniform("view", view);
        self.set_uniform("cameraPosition", camera_position);

        for object in objects {
            self.set_uniform("model", object.model_matrix());
            self.start_program();
            object.mesh().draw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniforms_without_program() {
        let mut renderer = RenderProgram::new();
        renderer.set_uniform("shininess", 32.0_f32);
        renderer.set_uniform("baseTexture", 0_i32);
        renderer.set_uniform("shininess", 8.0_f32);

        // Nothing is bound, so this is a no-op.
        renderer.start_program();
        renderer.render(
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            Vec3::ZERO,
            Vec::<&Object3D<Model>>::new(),
        );

        let uniforms = renderer.uniforms();
        assert_eq!(uniforms.len(), 2);
        assert_eq!(uniforms.get("shininess"), Some(&UniformValue::Float(8.0)));
        assert_eq!(uniforms.get("projection"), None);
    }
}
