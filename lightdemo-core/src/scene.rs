//! The per-frame script of the demo.
//!
//! [`DemoState`] owns the scene objects and everything that moves them: the controls, the
//! turntable spin, the patrol, the light and the sky tint. The mesh handle `M` is opaque here,
//! so the whole script runs without a GPU.

use std::collections::{HashMap, HashSet};

use glam::{Mat4, Vec3, vec3};

use crate::{
    animation::{Patrol, SkyTint},
    config::{CameraConfig, ObjectConfig, SceneConfig},
    controls::{self, Action, ControlTuning, Role},
    object::Object3D,
};

pub struct DemoState<M> {
    objects: Vec<Object3D<M>>,
    roles: HashMap<Role, usize>,
    patrol: Option<(usize, Patrol)>,
    sky: Option<SkyTint>,
    tuning: ControlTuning,
    camera: CameraConfig,
    aspect_ratio: f32,
    point_position: Vec3,
    spinning: bool,
}

impl<M> DemoState<M> {
    /// Builds the objects of `config`, asking `load` for the mesh handle of each one.
    ///
    /// Object `i` of the state is `config.objects[i]`.
    pub fn new<E>(
        config: &SceneConfig,
        aspect_ratio: f32,
        mut load: impl FnMut(&ObjectConfig) -> Result<M, E>,
    ) -> Result<Self, E> {
        let mut objects = Vec::with_capacity(config.objects.len());
        for object in &config.objects {
            objects.push(Object3D::with_transform(
                load(object)?,
                Vec3::from(object.position),
                Vec3::from(object.rotation),
                Vec3::from(object.scale),
                Vec3::from(object.center),
            ));
        }

        let index_of = |name: &str| config.objects.iter().position(|o| o.name == name);
        let mut roles = HashMap::new();
        for role in [Role::Flyer, Role::Turntable, Role::Light] {
            if let Some(index) = config.roles.get(role).and_then(index_of) {
                roles.insert(role, index);
            }
        }
        let patrol = config.patrol.as_ref().and_then(|patrol| {
            index_of(patrol.object.as_str()).map(|index| (index, Patrol::new(patrol)))
        });

        let mut state = Self {
            objects,
            roles,
            patrol,
            sky: config.sky.as_ref().map(SkyTint::new),
            tuning: config.controls,
            camera: config.camera.clone(),
            aspect_ratio,
            point_position: Vec3::from(config.lighting.point_position),
            spinning: false,
        };
        state.follow_light();
        Ok(state)
    }

    /// Advances the scene by one frame and returns the point light position.
    ///
    /// `held` are the actions whose keys are down, `pressed` those whose keys went down this
    /// frame. The patrol runs after the controls.
    pub fn step(&mut self, held: &HashSet<Action>, pressed: &HashSet<Action>) -> Vec3 {
        if pressed.contains(&Action::ToggleSpin) {
            self.spinning = !self.spinning;
            log::info!("Turntable spin {}", if self.spinning { "on" } else { "off" });
        }

        for command in controls::resolve(held, &self.tuning) {
            if let Some(object) = self.role_object_mut(command.role) {
                object.move_by(command.translate);
                object.rotate(command.rotate);
            }
        }

        if self.spinning {
            let step = self.tuning.spin_step;
            if let Some(object) = self.role_object_mut(Role::Turntable) {
                object.rotate(vec3(0.0, step, 0.0));
            }
        }

        if let Some((index, patrol)) = &mut self.patrol {
            patrol.step(&mut self.objects[*index]);
        }

        self.follow_light();
        log::trace!("Point light at {}", self.point_position);
        self.point_position
    }

    /// Moves the point light onto the object playing the light and tints the sky accordingly.
    fn follow_light(&mut self) {
        let Some(&index) = self.roles.get(&Role::Light) else {
            return;
        };
        self.point_position = self.objects[index].position();
        if let Some(sky) = &mut self.sky {
            sky.update(self.point_position.x);
        }
    }

    fn role_object_mut(&mut self, role: Role) -> Option<&mut Object3D<M>> {
        let index = *self.roles.get(&role)?;
        Some(&mut self.objects[index])
    }

    pub fn role_object(&self, role: Role) -> Option<&Object3D<M>> {
        self.roles.get(&role).map(|&index| &self.objects[index])
    }

    pub fn objects(&self) -> &[Object3D<M>] {
        &self.objects
    }

    pub fn patrol(&self) -> Option<&Patrol> {
        self.patrol.as_ref().map(|(_, patrol)| patrol)
    }

    pub fn spinning(&self) -> bool {
        self.spinning
    }

    pub fn point_position(&self) -> Vec3 {
        self.point_position
    }

    /// The background color. Black without a sky tint.
    pub fn sky_color(&self) -> Vec3 {
        self.sky.as_ref().map_or(Vec3::ZERO, SkyTint::color)
    }

    /// Updates the projection for a new drawable size. A zero height is ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn eye(&self) -> Vec3 {
        self.camera.eye()
    }

    pub fn view(&self) -> Mat4 {
        self.camera.view()
    }

    pub fn projection(&self) -> Mat4 {
        self.camera.projection(self.aspect_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "objects": [
            { "name": "gem", "mesh": "gem.obj" },
            { "name": "light", "mesh": "cube.obj", "lit": false, "position": [0.5, 0, -1] },
            { "name": "bird", "mesh": "bird.obj", "position": [2.9, 4.5, -10] }
        ],
        "roles": { "flyer": "bird", "turntable": "gem", "light": "light" },
        "lighting": { "point_position": [9, 9, 9] },
        "controls": { "spin_step": 0.01, "light_step": 0.25 },
        "patrol": { "object": "bird", "turn_at_max": [0, 1, 0] },
        "sky": { "tint": [0.5, 0.8, 1.0] }
    }"#;

    fn state(source: &str) -> DemoState<()> {
        let config = SceneConfig::from_json(source).unwrap();
        DemoState::new(&config, 1.0, |_| Ok::<_, String>(())).unwrap()
    }

    fn actions(actions: &[Action]) -> HashSet<Action> {
        actions.iter().copied().collect()
    }

    fn gem(state: &DemoState<()>) -> &Object3D<()> {
        state.role_object(Role::Turntable).unwrap()
    }

    fn light(state: &DemoState<()>) -> &Object3D<()> {
        state.role_object(Role::Light).unwrap()
    }

    #[test]
    fn test_objects_follow_config() {
        let state = state(SCENE);
        assert_eq!(state.objects().len(), 3);
        assert_eq!(state.objects()[2].position(), vec3(2.9, 4.5, -10.0));
        assert_eq!(state.role_object(Role::Flyer).unwrap().position().x, 2.9);
        // The light object wins over the configured point position.
        assert_eq!(state.point_position(), vec3(0.5, 0.0, -1.0));
    }

    #[test]
    fn test_space_toggles_spin() {
        let mut state = state(SCENE);
        let none = HashSet::new();
        let space = actions(&[Action::ToggleSpin]);

        state.step(&none, &space);
        assert!(state.spinning());
        assert!((gem(&state).orientation().y - 0.01).abs() < 1e-6);

        // Holding the key does not toggle again.
        state.step(&space, &none);
        assert!((gem(&state).orientation().y - 0.02).abs() < 1e-6);

        state.step(&space, &space);
        assert!(!state.spinning());
        state.step(&none, &none);
        assert!((gem(&state).orientation().y - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_commands_move_only_their_role() {
        let mut state = state(SCENE);
        state.step(&actions(&[Action::FlyUp]), &HashSet::new());

        let bird = state.role_object(Role::Flyer).unwrap();
        assert!((bird.position().y - 4.6).abs() < 1e-5);
        assert!((bird.orientation().x + 0.001).abs() < 1e-6);
        assert_eq!(gem(&state).orientation(), Vec3::ZERO);
        assert_eq!(light(&state).position(), vec3(0.5, 0.0, -1.0));
    }

    #[test]
    fn test_turning_hides_light_controls() {
        let mut state = state(SCENE);
        let held = actions(&[Action::TurnLeft, Action::LightLeft]);
        let point = state.step(&held, &HashSet::new());

        assert_eq!(light(&state).position().x, 0.5);
        assert_eq!(point.x, 0.5);
        assert!((gem(&state).orientation().y + 0.001).abs() < 1e-6);
    }

    #[test]
    fn test_point_light_follows_light_object() {
        let mut state = state(SCENE);
        let point = state.step(&actions(&[Action::LightLeft]), &HashSet::new());
        assert_eq!(point, light(&state).position());
        assert_eq!(point, vec3(0.25, 0.0, -1.0));
        assert_eq!(state.point_position(), point);
    }

    #[test]
    fn test_sky_darkens_left_of_origin() {
        let mut state = state(SCENE);
        let left = actions(&[Action::LightLeft]);

        // 0.25, 0.0: still at or right of the origin.
        state.step(&left, &HashSet::new());
        state.step(&left, &HashSet::new());
        assert_eq!(state.sky_color(), Vec3::ZERO);

        // -0.25, -0.5
        state.step(&left, &HashSet::new());
        state.step(&left, &HashSet::new());
        assert_eq!(light(&state).position().x, -0.5);
        assert!(state.sky_color().abs_diff_eq(vec3(0.25, 0.4, 0.5), 1e-6));

        // Moving back right keeps the last tint.
        state.step(&actions(&[Action::LightRight]), &HashSet::new());
        state.step(&actions(&[Action::LightRight]), &HashSet::new());
        state.step(&actions(&[Action::LightRight]), &HashSet::new());
        assert!(state.sky_color().abs_diff_eq(vec3(0.375, 0.6, 0.75), 1e-6));
    }

    #[test]
    fn test_patrol_runs_after_controls() {
        let mut state = state(SCENE);
        // The controls take the bird to x = 3.0, then the patrol step crosses the bound.
        state.step(&actions(&[Action::FlyRight]), &HashSet::new());

        assert_eq!(state.patrol().unwrap().direction(), -1.0);
        let bird = state.role_object(Role::Flyer).unwrap();
        assert!((bird.orientation().y - 1.001).abs() < 1e-5);
    }

    #[test]
    fn test_without_light_role() {
        let source = r#"{ "objects": [ { "name": "gem", "mesh": "gem.obj" } ] }"#;
        let mut state = state(source);
        let point = state.step(&actions(&[Action::LightLeft]), &HashSet::new());
        assert_eq!(point, Vec3::ZERO);
        assert_eq!(state.sky_color(), Vec3::ZERO);
        assert!(state.patrol().is_none());
    }

    #[test]
    fn test_resize_updates_projection() {
        let mut state = state(SCENE);
        let square = state.projection();

        state.resize(1600, 800);
        assert_eq!(state.aspect_ratio(), 2.0);
        assert!((state.projection().x_axis.x * 2.0 - square.x_axis.x).abs() < 1e-6);

        state.resize(1600, 0);
        assert_eq!(state.aspect_ratio(), 2.0);
    }
}
