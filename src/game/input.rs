//! Keyboard/pointer/touch input, reduced to logical keys
//!
//! Browser handlers write into `InputState`; the host reads it during fixed
//! steps and clears one-shot presses afterwards.

use std::collections::HashSet;

use glam::Vec2;

/// Minimum pointer travel (px) for a release to count as a swipe
pub const SWIPE_THRESHOLD: f32 = 30.0;

/// Logical keys shared by every game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Space / Enter: start, jump, fire, rotate
    Action,
    /// Escape / P
    Pause,
}

impl Key {
    /// Map a `KeyboardEvent.key` value
    pub fn from_browser(key: &str) -> Option<Key> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            " " | "Enter" => Some(Key::Action),
            "Escape" | "p" | "P" => Some(Key::Pause),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    /// Last known pointer position in surface coordinates
    pub pointer: Option<Vec2>,
    pub pointer_down: bool,
    /// Tap/click since the last step
    tapped: bool,
    drag_start: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        // Key repeat fires keydown again; only the first counts as a press
        if self.held.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Press and release in one go (on-screen buttons)
    pub fn tap_key(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Pressed since the last step
    pub fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Vertical intent from held keys (-1 up, +1 down)
    pub fn vertical_axis(&self) -> f32 {
        (self.is_held(Key::Down) as i8 - self.is_held(Key::Up) as i8) as f32
    }

    /// Horizontal intent from held keys (-1 left, +1 right)
    pub fn horizontal_axis(&self) -> f32 {
        (self.is_held(Key::Right) as i8 - self.is_held(Key::Left) as i8) as f32
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    pub fn pointer_press(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
        self.pointer_down = true;
        self.tapped = true;
        self.drag_start = Some(pos);
    }

    /// Release; a long enough drag becomes a direction press
    pub fn pointer_release(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
        self.pointer_down = false;
        if let Some(start) = self.drag_start.take() {
            if let Some(dir) = swipe_direction(pos - start) {
                self.pressed.insert(dir);
            }
        }
    }

    pub fn tapped(&self) -> bool {
        self.tapped
    }

    /// Forget one-shot input after a step consumed it
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.tapped = false;
    }

    /// Drop everything (focus loss, new round)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Dominant direction of a drag, if long enough
pub fn swipe_direction(delta: Vec2) -> Option<Key> {
    if delta.length() < SWIPE_THRESHOLD {
        return None;
    }
    Some(if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 { Key::Right } else { Key::Left }
    } else if delta.y > 0.0 {
        Key::Down
    } else {
        Key::Up
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_key_mapping() {
        assert_eq!(Key::from_browser("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_browser("W"), Some(Key::Up));
        assert_eq!(Key::from_browser(" "), Some(Key::Action));
        assert_eq!(Key::from_browser("Escape"), Some(Key::Pause));
        assert_eq!(Key::from_browser("q"), None);
    }

    #[test]
    fn test_key_repeat_counts_once() {
        let mut input = InputState::new();
        input.key_down(Key::Action);
        assert!(input.just_pressed(Key::Action));
        input.end_frame();
        input.key_down(Key::Action);
        assert!(!input.just_pressed(Key::Action));
        assert!(input.is_held(Key::Action));
        input.key_up(Key::Action);
        assert!(!input.is_held(Key::Action));
    }

    #[test]
    fn test_axes() {
        let mut input = InputState::new();
        input.key_down(Key::Up);
        assert_eq!(input.vertical_axis(), -1.0);
        input.key_down(Key::Down);
        assert_eq!(input.vertical_axis(), 0.0);
        input.key_down(Key::Right);
        assert_eq!(input.horizontal_axis(), 1.0);
    }

    #[test]
    fn test_swipe_detection() {
        assert_eq!(swipe_direction(Vec2::new(10.0, 5.0)), None);
        assert_eq!(swipe_direction(Vec2::new(-40.0, 10.0)), Some(Key::Left));
        assert_eq!(swipe_direction(Vec2::new(5.0, 60.0)), Some(Key::Down));

        let mut input = InputState::new();
        input.pointer_press(Vec2::new(100.0, 100.0));
        assert!(input.tapped());
        input.pointer_release(Vec2::new(100.0, 40.0));
        assert!(input.just_pressed(Key::Up));
        input.end_frame();
        assert!(!input.tapped());
        assert!(!input.just_pressed(Key::Up));
    }
}
