//! Scene configuration.
//!
//! A scene is described by a JSON file listing the window, camera, lighting, the objects to load
//! and how the controls and animations drive them. Relative paths in the file are resolved
//! against the directory the file lives in.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

use glam::{Mat4, Vec3};
use serde::Deserialize;

use crate::controls::{Action, ControlTuning, Role};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "specular lighting demo".to_string(),
            width: 800,
            height: 800,
            fullscreen: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 10.0],
            target: [0.0, 0.0, -10.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 30.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraConfig {
    pub fn eye(&self) -> Vec3 {
        Vec3::from(self.eye)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::from(self.target), Vec3::from(self.up))
    }

    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_degrees.to_radians(),
            aspect_ratio,
            self.near,
            self.far,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub point_color: [f32; 3],
    pub point_position: [f32; 3],
    pub shininess: f32,
    pub specular_strength: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.1,
            point_color: [1.0, 1.0, 1.0],
            point_position: [0.0, 0.0, 0.0],
            shininess: 32.0,
            specular_strength: 0.5,
        }
    }
}

impl LightingConfig {
    /// The ambient color scaled by its intensity.
    pub fn ambient(&self) -> Vec3 {
        Vec3::from(self.ambient_color) * self.ambient_intensity
    }
}

/// An object of the scene.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectConfig {
    pub name: String,
    pub mesh: PathBuf,
    #[serde(default)]
    pub texture: Option<PathBuf>,
    /// Whether the object is drawn with lighting.
    #[serde(default = "default_true")]
    pub lit: bool,
    #[serde(default)]
    pub center: [f32; 3],
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
}

/// Names of the objects playing each [`Role`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RolesConfig {
    pub flyer: Option<String>,
    pub turntable: Option<String>,
    pub light: Option<String>,
}

impl RolesConfig {
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Flyer => self.flyer.as_deref(),
            Role::Turntable => self.turntable.as_deref(),
            Role::Light => self.light.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatrolConfig {
    pub object: String,
    #[serde(default = "default_patrol_speed")]
    pub speed: f32,
    #[serde(default = "default_patrol_bound")]
    pub bound: f32,
    #[serde(default)]
    pub turn_at_max: [f32; 3],
    #[serde(default)]
    pub turn_at_min: [f32; 3],
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub initial: [f32; 3],
    pub tint: [f32; 3],
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            initial: [0.0, 0.0, 0.0],
            tint: [0.529, 0.808, 0.922],
        }
    }
}

/// The whole scene description.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub lighting: LightingConfig,
    #[serde(default = "default_shader_dir")]
    pub shader_dir: PathBuf,
    pub objects: Vec<ObjectConfig>,
    #[serde(default)]
    pub roles: RolesConfig,
    #[serde(default)]
    pub controls: ControlTuning,
    /// Key name to action overrides, on top of the default bindings.
    #[serde(default)]
    pub bindings: HashMap<String, Action>,
    #[serde(default)]
    pub patrol: Option<PatrolConfig>,
    #[serde(default)]
    pub sky: Option<SkyConfig>,
    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_true() -> bool {
    true
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_patrol_speed() -> f32 {
    0.001
}

fn default_patrol_bound() -> f32 {
    3.0
}

fn default_shader_dir() -> PathBuf {
    PathBuf::from("shaders")
}

impl SceneConfig {
    /// Parses and validates a scene. Relative paths resolve against the working directory.
    pub fn from_json(s: &str) -> Result<Self, String> {
        let config: SceneConfig = serde_json::from_str(s).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the scene file at `path`.
    pub fn load(path: &Path) -> Result<Self, String> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scene '{}': {}", path.display(), e))?;
        let mut config = Self::from_json(&source)
            .map_err(|e| format!("Invalid scene '{}': {}", path.display(), e))?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        log::info!(
            "Loaded scene '{}' with {} objects",
            path.display(),
            config.objects.len()
        );
        Ok(config)
    }

    /// Resolves a path from the scene file against the scene's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn object(&self, name: &str) -> Option<&ObjectConfig> {
        self.objects.iter().find(|object| object.name == name)
    }

    fn validate(&self) -> Result<(), String> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err("Window dimensions must be positive".to_string());
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return Err(format!(
                "Camera field of view must be between 0 and 180 degrees, got {}",
                self.camera.fov_degrees
            ));
        }

        let mut names = HashSet::new();
        for object in &self.objects {
            if !names.insert(object.name.as_str()) {
                return Err(format!("Duplicate object name '{}'", object.name));
            }
        }

        let referenced = [
            ("flyer role", self.roles.flyer.as_deref()),
            ("turntable role", self.roles.turntable.as_deref()),
            ("light role", self.roles.light.as_deref()),
            ("patrol", self.patrol.as_ref().map(|p| p.object.as_str())),
        ];
        for (what, name) in referenced {
            if let Some(name) = name
                && !names.contains(name)
            {
                return Err(format!("Unknown object '{}' used by the {}", name, what));
            }
        }

        Ok(())
    }
}
