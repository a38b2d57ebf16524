//! Keyboard and pointer input collection
//!
//! Platform events land here between frames; the session turns them into one
//! `TickInput` per simulation tick.

use glam::Vec2;

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// P
    Pause,
    /// M
    Mute,
    /// Enter
    Confirm,
    /// Escape
    Quit,
    /// I
    IdleToggle,
    /// + or =
    SkipLevel,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_web_key(key: &str) -> Option<Key> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "p" | "P" => Some(Key::Pause),
            "m" | "M" => Some(Key::Mute),
            "Enter" => Some(Key::Confirm),
            "Escape" => Some(Key::Quit),
            "i" | "I" => Some(Key::IdleToggle),
            "+" | "=" => Some(Key::SkipLevel),
            _ => None,
        }
    }
}

/// Input accumulated since the last tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    pointer: Option<Vec2>,
    click: Option<Vec2>,
    confirm: bool,
    pause: bool,
    mute: bool,
    quit: bool,
    skip_level: bool,
    idle_mode: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed; auto-repeat only affects held keys
    pub fn key_down(&mut self, key: Key, repeat: bool) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            _ if repeat => {}
            Key::Pause => self.pause = true,
            Key::Mute => self.mute = true,
            Key::Confirm => self.confirm = true,
            Key::Quit => self.quit = true,
            Key::SkipLevel => self.skip_level = true,
            Key::IdleToggle => {
                self.idle_mode = !self.idle_mode;
                log::info!("Idle mode: {}", self.idle_mode);
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            _ => {}
        }
    }

    /// Cursor moved, in field coordinates
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    /// Primary button pressed, in field coordinates
    pub fn clicked(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
        self.click = Some(pos);
    }

    /// Forget held keys (focus lost)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode
    }

    /// Snapshot for one tick, then clear one-shot commands
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            pointer: self.pointer.take(),
            click: self.click.take(),
            confirm: std::mem::take(&mut self.confirm),
            pause: std::mem::take(&mut self.pause),
            mute: std::mem::take(&mut self.mute),
            quit: std::mem::take(&mut self.quit),
            skip_level: std::mem::take(&mut self.skip_level),
            idle_mode: self.idle_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_key_mapping() {
        assert_eq!(Key::from_web_key("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_web_key("P"), Some(Key::Pause));
        assert_eq!(Key::from_web_key("m"), Some(Key::Mute));
        assert_eq!(Key::from_web_key("="), Some(Key::SkipLevel));
        assert_eq!(Key::from_web_key(" "), None);
    }

    #[test]
    fn test_one_shots_fire_once() {
        let mut input = InputState::new();
        input.key_down(Key::Pause, false);
        input.key_down(Key::Confirm, false);
        input.clicked(Vec2::new(5.0, 6.0));

        let first = input.take_tick_input();
        assert!(first.pause && first.confirm);
        assert_eq!(first.click, Some(Vec2::new(5.0, 6.0)));
        assert_eq!(first.pointer, Some(Vec2::new(5.0, 6.0)));

        let second = input.take_tick_input();
        assert_eq!(second, TickInput::default());
    }

    #[test]
    fn test_held_keys_persist() {
        let mut input = InputState::new();
        input.key_down(Key::Left, false);
        assert!(input.take_tick_input().left);
        assert!(input.take_tick_input().left);
        input.key_up(Key::Left);
        assert!(!input.take_tick_input().left);
    }

    #[test]
    fn test_auto_repeat_ignored_for_commands() {
        let mut input = InputState::new();
        input.key_down(Key::Mute, true);
        input.key_down(Key::IdleToggle, true);
        input.key_down(Key::Right, true);
        let tick = input.take_tick_input();
        assert!(!tick.mute);
        assert!(!tick.idle_mode);
        assert!(tick.right);
    }

    #[test]
    fn test_idle_toggle_is_sticky() {
        let mut input = InputState::new();
        input.key_down(Key::IdleToggle, false);
        assert!(input.take_tick_input().idle_mode);
        assert!(input.take_tick_input().idle_mode);
        input.key_down(Key::IdleToggle, false);
        assert!(!input.idle_mode());
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new();
        input.key_down(Key::Left, false);
        input.key_down(Key::Right, false);
        input.release_all();
        let tick = input.take_tick_input();
        assert!(!tick.left && !tick.right);
    }
}
