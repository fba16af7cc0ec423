use crate::input::{InputState, Key, KeyState};

/// Frame loop exit condition: Escape is pressed or the window was asked to close.
///
/// Polls Escape through the sticky latch, so a tap between two frames counts.
pub fn should_exit(input: &mut InputState, close_requested: bool) -> bool {
    let escape = input.poll_key(Key::Escape) == KeyState::Pressed;
    escape || close_requested
}
