//! Keyboard mapping from winit to game keys

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::screens::Key;

/// Map a physical key to the key the game sees
pub fn map_key(key: PhysicalKey) -> Key {
    match key {
        PhysicalKey::Code(KeyCode::Space) => Key::Space,
        PhysicalKey::Code(KeyCode::KeyY) => Key::Y,
        PhysicalKey::Code(KeyCode::KeyN) => Key::N,
        _ => Key::Other,
    }
}

/// Whether a key event counts as a press (releases and auto-repeat don't)
pub fn is_press(state: ElementState, repeat: bool) -> bool {
    state == ElementState::Pressed && !repeat
}

/// Game key for a winit key event, if it is a fresh press
pub fn map_key_event(event: &KeyEvent) -> Option<Key> {
    is_press(event.state, event.repeat).then(|| map_key(event.physical_key))
}
