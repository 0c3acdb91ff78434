//! The lighting demo scene.
//!
//! Lit objects are drawn with the specular shader, unlit ones (the light's marker) with plain
//! texture mapping. What moves and when is decided by [`DemoState`], this scene only feeds it
//! the keyboard and draws the result.

use std::{rc::Rc, sync::Arc};

use glam::Vec3;
use glow::HasContext;
use lightdemo_core::{DemoState, Object3D, config::SceneConfig};
use sdl2::keyboard::Keycode;

use crate::{
    abs::ShaderProgram,
    input::Bindings,
    other::UpdateContext,
    render::{
        RenderProgram,
        model::{AssetCache, Model},
        shaders::{self, ShaderSources},
    },
    scenes::{Scene, SceneSwitch},
};

pub struct LightDemo {
    state: DemoState<Model>,
    /// Whether object `i` of the state is drawn with lighting.
    lit: Vec<bool>,
    renderer: RenderProgram,
    lit_program: Rc<ShaderProgram>,
    unlit_program: Rc<ShaderProgram>,
    bindings: Bindings,
}

impl LightDemo {
    pub fn new(
        gl: &Arc<glow::Context>,
        config: &SceneConfig,
        bindings: Bindings,
        aspect_ratio: f32,
    ) -> Result<Self, String> {
        let sources = ShaderSources::new(config.resolve(&config.shader_dir));
        let vertex = sources.read(shaders::PERSPECTIVE_VERT)?;
        let lit_program = Rc::new(
            ShaderProgram::from_sources(gl, &vertex, &sources.read(shaders::SPECULAR_FRAG)?)
                .map_err(|e| format!("{}: {}", shaders::SPECULAR_FRAG, e))?,
        );
        let unlit_program = Rc::new(
            ShaderProgram::from_sources(gl, &vertex, &sources.read(shaders::TEXTURE_FRAG)?)
                .map_err(|e| format!("{}: {}", shaders::TEXTURE_FRAG, e))?,
        );

        let mut assets = AssetCache::new(gl);
        let state = DemoState::new(config, aspect_ratio, |object| {
            let mesh = config.resolve(&object.mesh);
            let texture = object.texture.as_ref().map(|path| config.resolve(path));
            assets
                .model(&mesh, texture.as_deref())
                .map_err(|e| format!("Object '{}': {}", object.name, e))
        })?;
        let lit: Vec<bool> = config.objects.iter().map(|object| object.lit).collect();

        let lighting = &config.lighting;
        let mut renderer = RenderProgram::new();
        renderer.set_uniform("baseTexture", 0_i32);
        renderer.set_uniform("ambientColor", lighting.ambient());
        renderer.set_uniform("pointColor", Vec3::from(lighting.point_color));
        renderer.set_uniform("pointPosition", state.point_position());
        renderer.set_uniform("shininess", lighting.shininess);
        renderer.set_uniform("specularStrength", lighting.specular_strength);

        log::info!(
            "Scene ready: {} objects, {} lit",
            lit.len(),
            lit.iter().filter(|&&lit| lit).count()
        );

        Ok(Self {
            state,
            lit,
            renderer,
            lit_program,
            unlit_program,
            bindings,
        })
    }
}

/// The objects of `state` whose lighting flag equals `lit`.
fn lit_objects<'a>(
    state: &'a DemoState<Model>,
    flags: &'a [bool],
    lit: bool,
) -> impl Iterator<Item = &'a Object3D<Model>> {
    state
        .objects()
        .iter()
        .zip(flags)
        .filter(move |&(_, &flag)| flag == lit)
        .map(|(object, _)| object)
}

impl Scene for LightDemo {
    fn resize(&mut self, gl: &Arc<glow::Context>, width: u32, height: u32) {
        unsafe {
            gl.viewport(0, 0, width as i32, height as i32);
        }
        self.state.resize(width, height);
    }

    fn update(&mut self, ctx: &UpdateContext) -> SceneSwitch {
        if ctx.keyboard.pressed.contains(&Keycode::Escape) {
            return SceneSwitch::Quit;
        }

        let held = self.bindings.held(ctx.keyboard);
        let pressed = self.bindings.pressed(ctx.keyboard);
        let point_position = self.state.step(&held, &pressed);
        self.renderer.set_uniform("pointPosition", point_position);
        SceneSwitch::None
    }

    fn render(&mut self, gl: &Arc<glow::Context>) {
        let sky = self.state.sky_color();
        unsafe {
            gl.clear_color(sky.x, sky.y, sky.z, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let projection = self.state.projection();
        let view = self.state.view();
        let eye = self.state.eye();

        self.renderer.use_program(&self.lit_program);
        let objects = lit_objects(&self.state, &self.lit, true);
        self.renderer.render(projection, view, eye, objects);

        self.renderer.use_program(&self.unlit_program);
        let objects = lit_objects(&self.state, &self.lit, false);
        self.renderer.render(projection, view, eye, objects);
    }
}
