//! Scripted per-frame animation.

use glam::{Vec3, vec3};

use crate::{
    config::{PatrolConfig, SkyConfig},
    object::Object3D,
};

/// Moves an object back and forth along the X axis, turning it around at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Patrol {
    speed: f32,
    bound: f32,
    turn_at_max: Vec3,
    turn_at_min: Vec3,
    direction: f32,
}

impl Patrol {
    pub fn new(config: &PatrolConfig) -> Self {
        Self {
            speed: config.speed,
            bound: config.bound,
            turn_at_max: Vec3::from(config.turn_at_max),
            turn_at_min: Vec3::from(config.turn_at_min),
            direction: 1.0,
        }
    }

    /// `1.0` while heading towards `+x`, `-1.0` otherwise.
    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Advances the patrol by one frame.
    pub fn step<M>(&mut self, object: &mut Object3D<M>) {
        object.move_by(vec3(self.speed * self.direction, 0.0, 0.0));

        let x = object.position().x;
        if x > self.bound {
            self.direction = -1.0;
            object.rotate(self.turn_at_max);
        } else if x < -self.bound {
            self.direction = 1.0;
            object.rotate(self.turn_at_min);
        }
    }
}

/// Background color that darkens as the light moves to the left of the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyTint {
    color: Vec3,
    tint: Vec3,
}

impl SkyTint {
    pub fn new(config: &SkyConfig) -> Self {
        Self {
            color: Vec3::from(config.initial),
            tint: Vec3::from(config.tint),
        }
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Updates the color for the light's current X position. Positions at or right of the origin
    /// keep the previous color.
    pub fn update(&mut self, light_x: f32) -> Vec3 {
        if light_x < 0.0 {
            let intensity = (1.0 + light_x).max(0.0);
            self.color = self.tint * intensity;
        }
        self.color
    }
}
