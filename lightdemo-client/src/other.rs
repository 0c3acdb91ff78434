use std::collections::HashSet;

use sdl2::{event::Event, keyboard::Keycode};

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
    pub pressed: HashSet<Keycode>,
}

impl KeyboardState {
    /// Forgets the presses of the previous frame.
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
    }

    /// Records key presses and releases. Key repeats are ignored.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => {
                self.down.insert(*keycode);
                self.pressed.insert(*keycode);
            }
            Event::KeyUp {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => {
                self.down.remove(keycode);
            }
            _ => {}
        }
    }
}

/// Context provided to scenes during the update phase.
///
/// Animations advance by a fixed step per frame, so only the input is needed.
pub struct UpdateContext<'a> {
    pub keyboard: &'a KeyboardState,
}

impl<'a> UpdateContext<'a> {
    pub fn new(keyboard: &'a KeyboardState) -> Self {
        Self { keyboard }
    }
}
