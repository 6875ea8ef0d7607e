//! Keys understood by the suggestion overlay

/// Keyboard input handled while the overlay is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKey {
    /// Move the active row up
    Up,
    /// Move the active row down
    Down,
    /// Confirm the active row
    Enter,
    /// Dismiss the overlay
    Escape,
}

impl OverlayKey {
    /// Map a terminal key event to an overlay key
    ///
    /// Key releases and keys the overlay does not handle map to `None`.
    #[cfg(feature = "tui")]
    #[must_use]
    pub fn from_key_event(key: &crossterm::event::KeyEvent) -> Option<Self> {
        use crossterm::event::{KeyCode, KeyEventKind};

        if key.kind == KeyEventKind::Release {
            return None;
        }

        match key.code {
            KeyCode::Up => Some(Self::Up),
            KeyCode::Down => Some(Self::Down),
            KeyCode::Enter => Some(Self::Enter),
            KeyCode::Esc => Some(Self::Escape),
            _ => None,
        }
    }
}

/// What the host should do with a key after the controller saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// The overlay is closed; the key belongs to the host field
    PassThrough,
    /// The overlay consumed the key
    Consumed,
    /// The overlay consumed the key and the field's default action
    /// (e.g. form submit on Enter) must not run
    PreventDefault,
}
