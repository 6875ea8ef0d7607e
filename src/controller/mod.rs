//! Input controller
//!
//! Bridges the host field's edit stream to the search source, owns the
//! overlay session, and reconciles the final choice back into the form.
//!
//! # Architecture
//!
//! - **Gating**: edits on untouched fields, empty values and values shorter
//!   than `min_chars` never reach the source
//! - **Debounce**: a single slot holding the latest qualifying edit; a newer
//!   edit restarts the wait
//! - **Generations**: every issued query gets a fresh [`Generation`]; only the
//!   latest one may update the overlay (last request wins)
//! - **Reconciliation**: every decision a session produces goes through
//!   exactly one call to [`InputController::finalize`]
//!
//! # Driving the controller
//!
//! All handlers are synchronous. Timers and search completions are delivered
//! by awaiting [`InputController::tick`], typically in a host loop:
//!
//! ```no_run
//! # async fn host(mut controller: typeahead::InputController<typeahead::BoundField, typeahead::StaticSource>) {
//! loop {
//!     tokio::select! {
//!         _wake = controller.tick() => {}
//!         () = tokio::time::sleep(std::time::Duration::from_millis(16)) => {}
//!     }
//!     for event in controller.drain_events() {
//!         println!("{event:?}");
//!     }
//! }
//! # }
//! ```
//!
//! `tick` is cancel safe: dropping it before it resolves leaves the
//! controller untouched.

mod query;


pub use query::Generation;

use crate::binding::{FormBinding, ITEM_NOT_EXIST};
use crate::config::AutocompleteConfig;
use crate::item::Item;
use crate::overlay::{
    KeyResponse, OverlayKey, OverlayMessage, OverlaySession, OverlayState, OverlayView,
};
use crate::source::{self, SearchSource};
use futures::FutureExt;
use futures::StreamExt;
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use query::{Debouncer, QueryTracker};
use serde_json::Value;
use std::collections::VecDeque;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

type Completion = (Generation, source::Result<Vec<Item>>);

/// Notification emitted by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutocompleteEvent {
    /// A session produced its decision (possibly no item)
    Selection(Option<Item>),
    /// The overlay was created (`true`) or torn down (`false`)
    OverlayActive(bool),
}

/// What a call to [`InputController::tick`] processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// The debounce window elapsed and a query was issued
    QueryIssued(Generation),
    /// A search finished; `accepted` is false when it was superseded
    QueryCompleted {
        /// Generation of the finished query
        generation: Generation,
        /// Whether the result reached the overlay
        accepted: bool,
    },
    /// A blur grace delay elapsed and teardown ran
    BlurExpired,
}

/// Autocomplete controller for one bound field
pub struct InputController<B, S> {
    config: AutocompleteConfig,
    source_field: String,
    binding: B,
    source: S,
    session: Option<OverlaySession>,
    debounce: Debouncer,
    queries: QueryTracker,
    in_flight: FuturesUnordered<LocalBoxFuture<'static, Completion>>,
    blur_timers: VecDeque<Instant>,
    events: VecDeque<AutocompleteEvent>,
    detached: bool,
}

impl<B: FormBinding, S: SearchSource> InputController<B, S> {
    /// Attach a controller to a bound field
    ///
    /// The source field defaults to the bound field's name. Configuration
    /// warnings are logged, never returned.
    pub fn attach(config: AutocompleteConfig, binding: B, source: S) -> Self {
        let field_name = binding.field_name().to_string();
        for warning in config.warnings(&field_name) {
            warn!(field = %field_name, "autocomplete configuration: {warning}");
        }

        let source_field = config.resolve_source_field(&field_name);
        let debounce = Debouncer::new(config.timings.debounce());

        Self {
            config,
            source_field,
            binding,
            source,
            session: None,
            debounce,
            queries: QueryTracker::default(),
            in_flight: FuturesUnordered::new(),
            blur_timers: VecDeque::new(),
            events: VecDeque::new(),
            detached: false,
        }
    }

    /// Configuration the controller was attached with
    #[must_use]
    pub const fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    /// Item field used for display, matching and commit
    #[must_use]
    pub fn source_field(&self) -> &str {
        &self.source_field
    }

    /// The bound field
    #[must_use]
    pub const fn binding(&self) -> &B {
        &self.binding
    }

    /// The bound field, mutably (for host edits)
    pub fn binding_mut(&mut self) -> &mut B {
        &mut self.binding
    }

    /// The open overlay session, if any
    #[must_use]
    pub const fn session(&self) -> Option<&OverlaySession> {
        self.session.as_ref()
    }

    /// Current overlay state
    #[must_use]
    pub fn state(&self) -> OverlayState {
        self.session
            .as_ref()
            .map_or(OverlayState::Closed, OverlaySession::state)
    }

    /// Render snapshot of the open overlay
    #[must_use]
    pub fn overlay_view(&self) -> Option<OverlayView<'_>> {
        let session = self.session.as_ref()?;
        Some(OverlayView {
            items: session.items(),
            loading: session.is_loading(),
            active_index: session.active_index(),
            label_field: &self.source_field,
            list_size: self.config.list_size,
            text_transform: self.config.text_transform,
            button_name: self.config.button_name.as_deref(),
            button_link: self.config.button_link.as_deref(),
        })
    }

    /// Whether no timer or search is outstanding
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.debounce.is_pending() && self.blur_timers.is_empty() && self.in_flight.is_empty()
    }

    /// Take all notifications emitted since the last call
    pub fn drain_events(&mut self) -> Vec<AutocompleteEvent> {
        self.events.drain(..).collect()
    }

    /// Handle an edit of the host field
    ///
    /// Call only for user edits; values written by the controller itself
    /// (see [`finalize`](Self::finalize)) must not be fed back.
    pub fn on_value_change(&mut self, raw: &str) {
        if self.detached {
            return;
        }
        if !self.binding.is_touched() {
            trace!(raw, "ignoring change of untouched field");
            return;
        }
        if raw.is_empty() || raw.chars().count() < self.config.min_chars {
            trace!(raw, min_chars = self.config.min_chars, "value below query threshold");
            return;
        }

        match self.session.as_mut() {
            Some(session) => session.begin_loading(),
            None => self.open_session(),
        }
        self.debounce.schedule(raw.to_string(), Instant::now());
    }

    /// Open the overlay on an explicit gesture and query the current value
    ///
    /// Bypasses debounce and `min_chars`. No-op while a session exists.
    pub fn force_load(&mut self) {
        if self.detached || self.session.is_some() {
            return;
        }

        self.open_session();
        let raw = self.binding.value();
        self.issue(raw);
    }

    /// Handle a key press while the host field has focus
    pub fn on_key(&mut self, key: OverlayKey) -> KeyResponse {
        let Some(session) = self.session.as_mut() else {
            return KeyResponse::PassThrough;
        };

        let (messages, response) = session.handle_key(key);
        self.dispatch(messages);
        response
    }

    /// Pointer selection of an overlay row
    ///
    /// Ignored when no session is open or `index` is out of range.
    pub fn pointer_select(&mut self, index: usize) {
        let Some(messages) = self.session.as_mut().and_then(|s| s.click(index)) else {
            return;
        };
        self.dispatch(messages);
    }

    /// The view asked to close the overlay
    pub fn request_close(&mut self) {
        self.dispatch(vec![OverlayMessage::RequestClose]);
    }

    /// The host field lost focus
    ///
    /// Teardown is delayed by the blur grace period so that a pointer
    /// selection on the overlay is processed first.
    pub fn on_blur(&mut self) {
        if self.detached {
            return;
        }
        self.blur_timers
            .push_back(Instant::now() + self.config.timings.blur_grace());
    }

    /// Reconcile a decision into the bound field and record
    ///
    /// With no item, the current raw value is looked up in the session's items
    /// by exact match on the source field. An unresolved decision under forced
    /// choice sets the `itemNotExist` validation error and leaves the value as
    /// typed. Focus always returns to the field and a selection event is
    /// emitted.
    pub fn finalize(&mut self, item: Option<Item>) {
        let item = item.or_else(|| {
            let raw = self.binding.value();
            self.session
                .as_ref()
                .and_then(|session| session.find_by_field(&self.source_field, &raw))
                .cloned()
        });

        match &item {
            None if self.config.forced_choice => {
                debug!(field = self.binding.field_name(), "no item resolved, flagging field");
                self.binding
                    .set_error(ITEM_NOT_EXIST, &self.config.errors.item_not_exist);
            }
            None => {}
            Some(item) if self.config.update_form_group => {
                match self.binding.patch_record(item) {
                    Ok(written) => debug!(written, "patched record with selected item"),
                    Err(e) => warn!("failed to patch record with selected item: {e}"),
                }
                self.binding.mark_dirty();
                self.binding.clear_error(ITEM_NOT_EXIST);
            }
            Some(item) => {
                let value = item.get(&self.source_field).cloned().unwrap_or(Value::Null);
                self.binding.set_value(value);
                self.binding.clear_error(ITEM_NOT_EXIST);
            }
        }

        self.binding.focus();
        self.events.push_back(AutocompleteEvent::Selection(item));
    }

    /// Tear down the overlay session
    ///
    /// A forced-choice session that never decided resolves first. Idempotent:
    /// without a session this does nothing and emits nothing.
    pub fn destroy_session(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Some(OverlayMessage::Select(item)) = session.closing_selection() {
            debug!("forced choice resolving on close");
            self.finalize(item);
        }

        self.session = None;
        self.debounce.cancel();
        self.queries.invalidate();
        debug!("overlay session destroyed");
        self.events.push_back(AutocompleteEvent::OverlayActive(false));
    }

    /// Stop reacting to the field
    ///
    /// Drops the session, timers and in-flight searches without emitting
    /// anything. Every later call is a no-op.
    pub fn detach(&mut self) {
        self.detached = true;
        self.session = None;
        self.debounce.cancel();
        self.queries.invalidate();
        self.blur_timers.clear();
        self.in_flight.clear();
    }

    /// Wait for the next timer expiry or search completion and apply it
    ///
    /// Never resolves while the controller is idle.
    pub async fn tick(&mut self) -> Wake {
        let debounce_at = self.debounce.deadline();
        let blur_at = self.blur_timers.front().copied();

        let fired = {
            let in_flight = &mut self.in_flight;
            tokio::select! {
                biased;
                Some(completion) = in_flight.next(), if !in_flight.is_empty() => Fired::Query(completion),
                () = sleep_until(debounce_at) => Fired::Debounce,
                () = sleep_until(blur_at) => Fired::Blur,
            }
        };

        match fired {
            Fired::Query((generation, result)) => {
                let accepted = self.complete(generation, result);
                Wake::QueryCompleted {
                    generation,
                    accepted,
                }
            }
            Fired::Debounce => {
                let raw = self.debounce.take().unwrap_or_default();
                Wake::QueryIssued(self.issue(raw))
            }
            Fired::Blur => {
                self.blur_timers.pop_front();
                self.destroy_session();
                Wake::BlurExpired
            }
        }
    }

    /// Process wake-ups until nothing is outstanding
    pub async fn settle(&mut self) -> Vec<Wake> {
        let mut wakes = Vec::new();
        while !self.is_idle() {
            wakes.push(self.tick().await);
        }
        wakes
    }

    fn open_session(&mut self) {
        self.session = Some(OverlaySession::new(self.config.forced_choice));
        debug!(field = self.binding.field_name(), "overlay session created");
        self.events.push_back(AutocompleteEvent::OverlayActive(true));
    }

    fn issue(&mut self, raw: String) -> Generation {
        let generation = self.queries.next();
        debug!(%generation, raw = %raw, "issuing search");

        let search = self.source.search(&raw);
        self.in_flight
            .push(async move { (generation, search.await) }.boxed_local());
        generation
    }

    fn complete(&mut self, generation: Generation, result: source::Result<Vec<Item>>) -> bool {
        let items = result.unwrap_or_else(|e| {
            warn!(%generation, "search source failed, treating as no match: {e}");
            Vec::new()
        });

        if !self.queries.is_current(generation) {
            debug!(%generation, "discarding superseded search result");
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        debug!(%generation, count = items.len(), "search result accepted");
        session.populate(items);
        true
    }

    fn dispatch(&mut self, messages: Vec<OverlayMessage>) {
        for message in messages {
            match message {
                OverlayMessage::Select(item) => self.finalize(item),
                OverlayMessage::RequestClose => self.destroy_session(),
            }
        }
    }
}

enum Fired {
    Query(Completion),
    Debounce,
    Blur,
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
