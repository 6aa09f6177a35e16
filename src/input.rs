//! Input events delivered to screens once per frame, in arrival order

use glam::Vec2;

/// Keys the game reacts to; the platform maps its key codes onto these
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Commit the tile under the selector (space bar)
    Confirm,
    /// Back to the menu
    Escape,
    /// Quit the game (Q)
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    /// Pointer button pressed at a screen position
    PointerDown(Vec2),
    /// Pointer moved to a screen position
    PointerMoved(Vec2),
}

impl InputEvent {
    pub fn key(&self) -> Option<Key> {
        match self {
            InputEvent::KeyDown(key) => Some(*key),
            _ => None,
        }
    }
}
