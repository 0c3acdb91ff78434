//! Keyboard controls of the demo.
//!
//! Keys map to [`Action`]s, and the set of held actions is turned into [`Command`]s for the
//! objects playing one of the [`Role`]s. Actions are grouped in precedence chains: within a
//! chain only the first held action has an effect.

use std::collections::HashSet;

use glam::{Vec3, vec3};
use serde::Deserialize;

/// Something the user can ask for by holding a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Action {
    FlyUp,
    FlyDown,
    FlyRight,
    FlyLeft,
    DriftLeft,
    DriftRight,
    PitchUp,
    TurnUp,
    TurnDown,
    TurnRight,
    TurnLeft,
    LightLeft,
    LightRight,
    /// Toggles the turntable spin. Reacts to presses, not to held keys.
    ToggleSpin,
}

/// The part an object plays in the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Flies around with the arrow keys.
    Flyer,
    /// Rotates in place.
    Turntable,
    /// Carries the point light.
    Light,
}

/// A translation and rotation to apply to the object playing `role` this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Command {
    pub role: Role,
    pub translate: Vec3,
    pub rotate: Vec3,
}

/// Per-frame step sizes of the controls.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlTuning {
    pub fly_step: f32,
    pub drift_step: f32,
    pub turn_step: f32,
    pub light_step: f32,
    pub spin_step: f32,
}

impl Default for ControlTuning {
    fn default() -> Self {
        Self {
            fly_step: 0.1,
            drift_step: 0.001,
            turn_step: 0.001,
            light_step: 0.1,
            spin_step: 0.001,
        }
    }
}

const CHAINS: [&[Action]; 4] = [
    &[Action::FlyUp, Action::FlyDown],
    &[
        Action::FlyRight,
        Action::FlyLeft,
        Action::DriftLeft,
        Action::DriftRight,
        Action::PitchUp,
    ],
    &[Action::TurnUp, Action::TurnDown],
    &[
        Action::TurnRight,
        Action::TurnLeft,
        Action::LightLeft,
        Action::LightRight,
    ],
];

/// Key names (as understood by SDL) and the action they trigger by default.
pub const DEFAULT_BINDINGS: [(&str, Action); 14] = [
    ("Up", Action::FlyUp),
    ("Down", Action::FlyDown),
    ("Right", Action::FlyRight),
    ("Left", Action::FlyLeft),
    ("A", Action::DriftLeft),
    ("D", Action::DriftRight),
    ("W", Action::PitchUp),
    ("I", Action::TurnUp),
    ("K", Action::TurnDown),
    ("L", Action::TurnRight),
    ("J", Action::TurnLeft),
    ("Z", Action::LightLeft),
    ("X", Action::LightRight),
    ("Space", Action::ToggleSpin),
];

/// Resolves the held actions into the commands to apply this frame.
pub fn resolve(held: &HashSet<Action>, tuning: &ControlTuning) -> Vec<Command> {
    CHAINS
        .iter()
        .filter_map(|chain| chain.iter().find(|action| held.contains(*action)))
        .filter_map(|&action| command_for(action, tuning))
        .collect()
}

fn command_for(action: Action, tuning: &ControlTuning) -> Option<Command> {
    let fly = tuning.fly_step;
    let drift = tuning.drift_step;
    let turn = tuning.turn_step;
    let light = tuning.light_step;
    let (role, translate, rotate) = match action {
        Action::FlyUp => (Role::Flyer, vec3(0.0, fly, 0.0), vec3(-turn, 0.0, 0.0)),
        Action::FlyDown => (Role::Flyer, vec3(0.0, -fly, 0.0), vec3(turn, 0.0, 0.0)),
        Action::FlyRight => (Role::Flyer, vec3(fly, 0.0, 0.0), vec3(0.0, turn, 0.0)),
        Action::FlyLeft => (Role::Flyer, vec3(-fly, 0.0, 0.0), vec3(0.0, -turn, 0.0)),
        Action::DriftLeft => (Role::Flyer, vec3(-drift, 0.0, 0.0), vec3(0.0, 0.0, -turn)),
        Action::DriftRight => (Role::Flyer, vec3(drift, 0.0, 0.0), vec3(0.0, 0.0, turn)),
        Action::PitchUp => (Role::Flyer, Vec3::ZERO, vec3(turn, 0.0, 0.0)),
        Action::TurnUp => (Role::Turntable, Vec3::ZERO, vec3(-turn, 0.0, 0.0)),
        Action::TurnDown => (Role::Turntable, Vec3::ZERO, vec3(turn, 0.0, 0.0)),
        Action::TurnRight => (Role::Turntable, Vec3::ZERO, vec3(0.0, turn, 0.0)),
        Action::TurnLeft => (Role::Turntable, Vec3::ZERO, vec3(0.0, -turn, 0.0)),
        Action::LightLeft => (Role::Light, vec3(-light, 0.0, 0.0), Vec3::ZERO),
        Action::LightRight => (Role::Light, vec3(light, 0.0, 0.0), Vec3::ZERO),
        Action::ToggleSpin => return None,
    };
    Some(Command {
        role,
        translate,
        rotate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(actions: &[Action]) -> HashSet<Action> {
        actions.iter().copied().collect()
    }

    #[test]
    fn test_nothing_held() {
        assert!(resolve(&HashSet::new(), &ControlTuning::default()).is_empty());
    }

    #[test]
    fn test_chains_are_independent() {
        let tuning = ControlTuning::default();
        let commands = resolve(
            &held(&[Action::FlyUp, Action::FlyRight, Action::TurnDown, Action::LightRight]),
            &tuning,
        );
        assert_eq!(commands.len(), 4);
        assert_eq!(
            commands[0],
            Command {
                role: Role::Flyer,
                translate: vec3(0.0, 0.1, 0.0),
                rotate: vec3(-0.001, 0.0, 0.0),
            }
        );
        assert_eq!(commands[1].rotate, vec3(0.0, 0.001, 0.0));
        assert_eq!(commands[2].role, Role::Turntable);
        assert_eq!(commands[3].role, Role::Light);
        assert_eq!(commands[3].translate, vec3(0.1, 0.0, 0.0));
    }

    #[test]
    fn test_first_action_in_chain_wins() {
        let tuning = ControlTuning::default();
        let commands = resolve(&held(&[Action::FlyDown, Action::FlyUp]), &tuning);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].translate.y, tuning.fly_step);

        // Turning the turntable shadows moving the light.
        let commands = resolve(&held(&[Action::LightLeft, Action::TurnLeft]), &tuning);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].role, Role::Turntable);

        let commands = resolve(&held(&[Action::PitchUp, Action::DriftRight]), &tuning);
        assert_eq!(commands[0].translate, vec3(tuning.drift_step, 0.0, 0.0));
        assert_eq!(commands[0].rotate, vec3(0.0, 0.0, tuning.turn_step));
    }

    #[test]
    fn test_toggle_spin_produces_no_command() {
        let commands = resolve(&held(&[Action::ToggleSpin]), &ControlTuning::default());
        assert!(commands.is_empty());
    }

    #[test]
    fn test_default_bindings_cover_every_action() {
        let bound: HashSet<Action> = DEFAULT_BINDINGS
            .iter()
            .map(|&(_, action)| action)
            .collect();
        assert_eq!(bound.len(), DEFAULT_BINDINGS.len());
    }
}
