use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current keyboard state for the window.
///
/// With sticky keys enabled, a press is remembered until it has been observed
/// once through [`InputState::poll_key`], so a tap that starts and ends between
/// two polls is never lost.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    sticky_keys: bool,

    /// Presses not yet observed by `poll_key`. Only filled with sticky keys on.
    latched: HashSet<Key>,
}

impl InputState {
    pub fn new(sticky_keys: bool) -> Self {
        Self {
            sticky_keys,
            ..Self::default()
        }
    }

    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoids stuck keys when focus changes mid-press. Latched
                    // presses already happened and stay pending.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(*key);
                    if self.sticky_keys {
                        self.latched.insert(*key);
                    }
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },
        }
    }

    /// Live "is held" query. Does not consume latched presses.
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Reports `Pressed` if the key is held or, with sticky keys, was pressed
    /// since the last poll. Consumes the latch.
    pub fn poll_key(&mut self, key: Key) -> KeyState {
        let latched = self.latched.remove(&key);
        if latched || self.key_down(key) {
            KeyState::Pressed
        } else {
            KeyState::Released
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state }
    }

    #[test]
    fn held_key_polls_pressed() {
        let mut input = InputState::new(false);
        input.apply_event(&key(Key::Escape, KeyState::Pressed));

        assert_eq!(input.poll_key(Key::Escape), KeyState::Pressed);
        assert_eq!(input.poll_key(Key::Escape), KeyState::Pressed);
    }

    #[test]
    fn tap_is_lost_without_sticky_keys() {
        let mut input = InputState::new(false);
        input.apply_event(&key(Key::Escape, KeyState::Pressed));
        input.apply_event(&key(Key::Escape, KeyState::Released));

        assert_eq!(input.poll_key(Key::Escape), KeyState::Released);
    }

    #[test]
    fn sticky_tap_reports_once() {
        let mut input = InputState::new(true);
        input.apply_event(&key(Key::Escape, KeyState::Pressed));
        input.apply_event(&key(Key::Escape, KeyState::Released));

        assert!(!input.key_down(Key::Escape));
        assert_eq!(input.poll_key(Key::Escape), KeyState::Pressed);
        assert_eq!(input.poll_key(Key::Escape), KeyState::Released);
    }

    #[test]
    fn latches_are_per_key() {
        let mut input = InputState::new(true);
        input.apply_event(&key(Key::Space, KeyState::Pressed));
        input.apply_event(&key(Key::Space, KeyState::Released));

        assert_eq!(input.poll_key(Key::Escape), KeyState::Released);
        assert_eq!(input.poll_key(Key::Space), KeyState::Pressed);
    }

    #[test]
    fn focus_loss_clears_held_keys_but_keeps_latches() {
        let mut input = InputState::new(true);
        input.apply_event(&InputEvent::Focused(true));
        input.apply_event(&key(Key::Escape, KeyState::Pressed));
        input.apply_event(&InputEvent::Focused(false));

        assert!(!input.key_down(Key::Escape));
        assert_eq!(input.poll_key(Key::Escape), KeyState::Pressed);
        assert_eq!(input.poll_key(Key::Escape), KeyState::Released);
    }
}
