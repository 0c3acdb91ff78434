//! Module providing the `Scene` trait and all scene implementations.

use std::sync::Arc;

use crate::other::UpdateContext;

pub mod lightdemo;

pub enum SceneSwitch {
    None,
    Quit,
}

/// The Scene trait defines the common interface for all scenes of the client.
pub trait Scene {
    /// Called when the drawable area of the window changes size, in pixels.
    fn resize(&mut self, _gl: &Arc<glow::Context>, _width: u32, _height: u32) {}

    /// Updates the scene state.
    fn update(&mut self, _ctx: &UpdateContext) -> SceneSwitch {
        SceneSwitch::None
    }

    /// Renders the scene.
    fn render(&mut self, gl: &Arc<glow::Context>);
}

/// Owns the running scene and forwards the frame loop to it.
pub struct SceneManager {
    scene: Box<dyn Scene>,
}

impl SceneManager {
    pub fn new(scene: Box<dyn Scene>) -> Self {
        Self { scene }
    }

    pub fn resize(&mut self, gl: &Arc<glow::Context>, width: u32, height: u32) {
        self.scene.resize(gl, width, height);
    }

    /// Updates the current scene. Returns `false` once the scene asks to quit.
    pub fn update(&mut self, ctx: &UpdateContext) -> bool {
        match self.scene.update(ctx) {
            SceneSwitch::None => true,
            SceneSwitch::Quit => false,
        }
    }

    /// Renders the current scene.
    pub fn render(&mut self, gl: &Arc<glow::Context>) {
        self.scene.render(gl);
    }
}
