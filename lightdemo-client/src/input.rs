//! Key bindings.

use std::collections::{HashMap, HashSet};

use lightdemo_core::controls::{Action, DEFAULT_BINDINGS};
use sdl2::keyboard::Keycode;

use crate::other::KeyboardState;

/// Maps keys to the actions they trigger.
pub struct Bindings {
    map: HashMap<Keycode, Action>,
}

impl Bindings {
    /// Builds the default bindings, then applies `overrides` (SDL key name to action) on top.
    ///
    /// Key names are case-insensitive, two overrides naming the same key are an error.
    pub fn new(overrides: &HashMap<String, Action>) -> Result<Self, String> {
        let mut map = HashMap::new();
        for &(name, action) in DEFAULT_BINDINGS.iter() {
            map.insert(keycode(name)?, action);
        }

        let mut names: Vec<&String> = overrides.keys().collect();
        names.sort();
        let mut overridden: HashMap<Keycode, &str> = HashMap::new();
        for name in names {
            let key = keycode(name)?;
            if let Some(previous) = overridden.insert(key, name) {
                return Err(format!("Key bound twice: '{}' and '{}'", previous, name));
            }
            map.insert(key, overrides[name]);
        }
        Ok(Self { map })
    }

    /// The actions whose keys are currently held down.
    pub fn held(&self, keyboard: &KeyboardState) -> HashSet<Action> {
        self.actions(&keyboard.down)
    }

    /// The actions whose keys were pressed this frame.
    pub fn pressed(&self, keyboard: &KeyboardState) -> HashSet<Action> {
        self.actions(&keyboard.pressed)
    }

    fn actions(&self, keys: &HashSet<Keycode>) -> HashSet<Action> {
        keys.iter()
            .filter_map(|keycode| self.map.get(keycode).copied())
            .collect()
    }
}

fn keycode(name: &str) -> Result<Keycode, String> {
    Keycode::from_name(name).ok_or_else(|| format!("Unknown key name '{}'", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = Bindings::new(&HashMap::new()).unwrap();
        let mut keyboard = KeyboardState::default();
        keyboard.down.insert(Keycode::Up);
        keyboard.down.insert(Keycode::X);
        keyboard.down.insert(Keycode::F1);
        keyboard.pressed.insert(Keycode::Space);

        assert_eq!(
            bindings.held(&keyboard),
            HashSet::from([Action::FlyUp, Action::LightRight])
        );
        assert_eq!(bindings.pressed(&keyboard), HashSet::from([Action::ToggleSpin]));
    }

    #[test]
    fn test_overrides() {
        let overrides = HashMap::from([
            ("Q".to_string(), Action::ToggleSpin),
            ("Up".to_string(), Action::TurnUp),
        ]);
        let bindings = Bindings::new(&overrides).unwrap();
        let mut keyboard = KeyboardState::default();
        keyboard.down.insert(Keycode::Up);
        keyboard.pressed.insert(Keycode::Q);

        assert_eq!(bindings.held(&keyboard), HashSet::from([Action::TurnUp]));
        assert_eq!(bindings.pressed(&keyboard), HashSet::from([Action::ToggleSpin]));
    }

    #[test]
    fn test_unknown_key_name() {
        let overrides = HashMap::from([("NotAKey".to_string(), Action::FlyUp)]);
        let err = Bindings::new(&overrides).err().unwrap();
        assert_eq!(err, "Unknown key name 'NotAKey'");
    }

    #[test]
    fn test_same_key_overridden_twice() {
        let overrides = HashMap::from([
            ("q".to_string(), Action::ToggleSpin),
            ("Q".to_string(), Action::FlyUp),
        ]);
        let err = Bindings::new(&overrides).err().unwrap();
        assert_eq!(err, "Key bound twice: 'Q' and 'q'");
    }
}
