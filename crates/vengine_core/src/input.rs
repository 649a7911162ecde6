//! Keyboard state tracking with both edge-triggered and level-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` returns true every frame the key
//!   is physically down. Walking and jumping read this.
//!
//! - **Edge-triggered (just_pressed):** true only during the frame the key
//!   went down. Pause and restart read these so that holding
//!   the key does not toggle every frame. They are cleared by `end_frame()`,
//!   which the main loop calls after the frame's tick has consumed them.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Escape,
    P,
    X,
    F3,
}

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        // OS key repeat arrives as further presses of a held key; ignore them.
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Drop every held key, e.g. when the window loses focus and release
    /// events will never arrive.
    pub fn release_all(&mut self) {
        if !self.held.is_empty() {
            log::debug!("Releasing {} held key(s)", self.held.len());
        }
        self.held.clear();
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        assert!(input.is_held(Key::Left));
        assert!(input.is_just_pressed(Key::Left));
    }

    #[test]
    fn test_key_up_clears_held_keeps_press_edge() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_up(Key::Left);
        assert!(!input.is_held(Key::Left));
        // A tap inside one frame still counts as a press for that frame.
        assert!(input.is_just_pressed(Key::Left));
    }

    #[test]
    fn test_repeat_press_after_end_frame_is_not_an_edge() {
        let mut input = InputState::new();
        input.key_down(Key::P);
        input.end_frame();
        // Key repeat while still held must not produce a second edge.
        input.key_down(Key::P);
        assert!(input.is_held(Key::P));
        assert!(!input.is_just_pressed(Key::P));
    }

    #[test]
    fn test_key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::X);
        assert!(!input.is_just_pressed(Key::X));
        assert!(!input.is_held(Key::X));
    }

    #[test]
    fn test_end_frame_clears_transient_state() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        input.key_down(Key::Up);
        input.end_frame();
        assert!(!input.is_just_pressed(Key::Right));
        assert!(!input.is_just_pressed(Key::Up));
        // Held state persists across frames.
        assert!(input.is_held(Key::Right));
        assert!(input.is_held(Key::Up));
    }

    #[test]
    fn test_release_all_drops_held_keys() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_down(Key::Up);
        input.end_frame();
        input.release_all();
        assert!(!input.is_held(Key::Left));
        assert!(!input.is_held(Key::Up));
        // A fresh press after refocus is an edge again.
        input.key_down(Key::Up);
        assert!(input.is_just_pressed(Key::Up));
    }

    #[test]
    fn test_multiple_keys_independent() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_down(Key::Up);
        input.key_up(Key::Left);
        assert!(!input.is_held(Key::Left));
        assert!(input.is_held(Key::Up));
    }
}
