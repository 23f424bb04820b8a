//! Unlock progress and authentication state.
//!
//! Two orthogonal enumerations: [`UnlockState`] tracks the most recent
//! input action (mutated by the input collaborator), [`AuthState`] tracks
//! the authentication backend's phase. The renderer keys its colours and
//! text on `AuthState` first and falls back to `UnlockState` only while
//! the backend is idle.

/// Transient visual emphasis tied to the most recent input action.
///
/// The pad variants deliberately carry no digit identity; the only thing
/// the visual layer learns is "a key was pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnlockState {
    /// Default state, nothing typed yet.
    #[default]
    Started,
    /// Key was pressed at some point, show the unlock indicator.
    KeyPressed,
    /// A key was pressed recently, highlight part of the indicator.
    KeyActive,
    /// Backspace was pressed recently, highlight in red.
    BackspaceActive,
    /// Backspace was pressed, but there is nothing to delete.
    NothingToDelete,
    /// A pin-pad key was pressed recently.
    PadActive,
    /// The pin-pad backspace was pressed recently.
    PadBackspaceActive,
}

/// The authentication backend's current phase. Mutated only by the
/// authentication collaborator; `Wrong` and `LoadFailed` are terminal per
/// attempt and must be visually distinct from `Idle` without revealing
/// anything about the password itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Idle,
    Verifying,
    Locking,
    Wrong,
    LoadFailed,
}

/// The two state axes bundled into one explicitly owned value, passed into
/// every render call instead of living in module globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndicatorState {
    pub unlock: UnlockState,
    pub auth: AuthState,
}

impl IndicatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A keystroke advanced the password buffer.
    pub fn key_pressed(&mut self) {
        self.unlock = UnlockState::KeyActive;
    }

    /// Backspace was pressed while the buffer held `buffer_len` characters.
    pub fn backspace(&mut self, buffer_len: usize) {
        self.unlock = if buffer_len > 0 {
            UnlockState::BackspaceActive
        } else {
            UnlockState::NothingToDelete
        };
    }

    /// A pin-pad digit or submit press. No digit identity is recorded here.
    pub fn pad_pressed(&mut self) {
        self.unlock = UnlockState::PadActive;
    }

    /// The pin-pad backspace button.
    pub fn pad_backspace(&mut self, buffer_len: usize) {
        self.unlock = if buffer_len > 0 {
            UnlockState::PadBackspaceActive
        } else {
            UnlockState::NothingToDelete
        };
    }

    /// The transient emphasis expired (timer tick); settle back onto a
    /// steady state that only depends on whether the buffer is empty.
    pub fn settle(&mut self, buffer_len: usize) {
        self.unlock = if buffer_len == 0 {
            UnlockState::Started
        } else {
            UnlockState::KeyPressed
        };
    }

    /// Whether the classic wheel should be drawn at all: hidden while
    /// nothing was typed and the backend is idle.
    pub fn shows_indicator(&self) -> bool {
        self.unlock != UnlockState::Started || self.auth != AuthState::Idle
    }

    /// Whether the auth phase is terminal for the current attempt.
    pub fn auth_is_terminal(&self) -> bool {
        matches!(
            self.auth,
            AuthState::Locking | AuthState::Wrong | AuthState::LoadFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backspace_on_empty_buffer_is_nothing_to_delete() {
        let mut state = IndicatorState::new();
        state.backspace(0);
        assert_eq!(state.unlock, UnlockState::NothingToDelete);

        state.pad_backspace(0);
        assert_eq!(state.unlock, UnlockState::NothingToDelete);
    }

    #[test]
    fn test_backspace_on_nonempty_buffer_is_active() {
        let mut state = IndicatorState::new();
        state.backspace(3);
        assert_eq!(state.unlock, UnlockState::BackspaceActive);

        state.pad_backspace(1);
        assert_eq!(state.unlock, UnlockState::PadBackspaceActive);
    }

    #[test]
    fn test_settle_depends_only_on_buffer() {
        let mut state = IndicatorState::new();
        state.key_pressed();
        state.settle(4);
        assert_eq!(state.unlock, UnlockState::KeyPressed);

        state.settle(0);
        assert_eq!(state.unlock, UnlockState::Started);
    }

    #[test]
    fn test_indicator_hidden_only_when_started_and_idle() {
        let mut state = IndicatorState::new();
        assert!(!state.shows_indicator());

        state.key_pressed();
        assert!(state.shows_indicator());

        state.settle(0);
        assert!(!state.shows_indicator());

        state.auth = AuthState::Verifying;
        assert!(state.shows_indicator());
    }

    #[test]
    fn test_auth_axis_is_orthogonal_to_unlock() {
        let mut state = IndicatorState::new();
        state.auth = AuthState::Wrong;
        state.key_pressed();
        assert_eq!(state.auth, AuthState::Wrong);
        state.settle(0);
        assert_eq!(state.auth, AuthState::Wrong);
        assert!(state.auth_is_terminal());
    }
}
