//! Suggestion overlay session
//!
//! An [`OverlaySession`] is the state of one open overlay, from creation to
//! teardown. It is owned by the input controller and exists at most once per
//! controller.
//!
//! # State machine
//!
//! ```text
//!            query / force load
//!   Closed ─────────────────────→ Loading ──┐ newer query
//!     ↑                              │  ↑───┘
//!     │ confirm, Escape,             │ accepted result
//!     │ blur expiry,                 ▼
//!     │ forced-choice resolve    Populated ──→ Loading (newer query)
//!     └──────────────────────────────┘
//! ```
//!
//! The session never closes itself. Keyboard and pointer handling produce
//! [`OverlayMessage`]s which the controller consumes synchronously, in order.

mod keys;
mod view;

pub use keys::{KeyResponse, OverlayKey};
pub use view::OverlayView;

use crate::item::Item;

/// Externally visible overlay state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    /// No session exists
    Closed,
    /// Session open, waiting for a query result
    Loading,
    /// Session open with the latest accepted result
    Populated,
}

/// Message emitted by the overlay towards its controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayMessage {
    /// The session produced its decision (possibly no item)
    Select(Option<Item>),
    /// The overlay asks to be torn down
    RequestClose,
}

/// One open overlay
#[derive(Debug, Clone)]
pub struct OverlaySession {
    items: Vec<Item>,
    loading: bool,
    active_index: Option<usize>,
    selected: bool,
    forced_choice: bool,
}

impl OverlaySession {
    /// Open a new session in the loading state
    #[must_use]
    pub const fn new(forced_choice: bool) -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            active_index: None,
            selected: false,
            forced_choice,
        }
    }

    /// Items of the latest accepted result
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Whether a query is pending
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Index of the highlighted row, if any
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// The highlighted item, if any
    #[must_use]
    pub fn active_item(&self) -> Option<&Item> {
        self.items.get(self.active_index?)
    }

    /// Whether this session already produced its decision
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> OverlayState {
        if self.loading {
            OverlayState::Loading
        } else {
            OverlayState::Populated
        }
    }

    /// Enter the loading state for a newer query
    pub(crate) fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Apply an accepted query result
    pub(crate) fn populate(&mut self, items: Vec<Item>) {
        self.items = items;
        self.active_index = None;
        self.loading = false;
    }

    /// First item whose `field` text equals `value` exactly
    #[must_use]
    pub fn find_by_field(&self, field: &str, value: &str) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.text(field).as_deref() == Some(value))
    }

    /// Handle a key press
    ///
    /// Returns the messages to deliver to the controller and whether the key
    /// was a confirming/dismissing key whose default action must be suppressed.
    pub fn handle_key(&mut self, key: OverlayKey) -> (Vec<OverlayMessage>, KeyResponse) {
        match key {
            OverlayKey::Down => {
                if let Some(last) = self.items.len().checked_sub(1) {
                    self.active_index = Some(self.active_index.map_or(0, |i| (i + 1).min(last)));
                }
                (Vec::new(), KeyResponse::Consumed)
            }
            OverlayKey::Up => {
                self.active_index = self.active_index.and_then(|i| i.checked_sub(1));
                (Vec::new(), KeyResponse::Consumed)
            }
            OverlayKey::Enter => {
                let choice = match self.active_item() {
                    Some(item) => Some(item.clone()),
                    None if self.forced_choice => self.items.first().cloned(),
                    None => None,
                };
                let mut messages: Vec<_> = self.select(choice).into_iter().collect();
                messages.push(OverlayMessage::RequestClose);
                (messages, KeyResponse::PreventDefault)
            }
            OverlayKey::Escape => {
                let mut messages: Vec<_> = self.select(None).into_iter().collect();
                messages.push(OverlayMessage::RequestClose);
                (messages, KeyResponse::PreventDefault)
            }
        }
    }

    /// Pointer selection of a row
    ///
    /// Returns `None` if `index` is out of range.
    pub fn click(&mut self, index: usize) -> Option<Vec<OverlayMessage>> {
        let item = self.items.get(index)?.clone();
        let mut messages: Vec<_> = self.select(Some(item)).into_iter().collect();
        messages.push(OverlayMessage::RequestClose);
        Some(messages)
    }

    /// Decision to emit when the session is torn down
    ///
    /// Only a forced-choice session that never produced a decision resolves
    /// on close: to the first item, or to no item when the list is empty.
    pub(crate) fn closing_selection(&mut self) -> Option<OverlayMessage> {
        if self.forced_choice && !self.selected {
            let first = self.items.first().cloned();
            self.select(first)
        } else {
            None
        }
    }

    /// Record the session's decision; a session decides at most once
    fn select(&mut self, item: Option<Item>) -> Option<OverlayMessage> {
        if self.selected {
            return None;
        }
        self.selected = true;
        Some(OverlayMessage::Select(item))
    }
}
