//! Testing utilities for typeahead
//!
//! Provides a scripted search source that records every query it receives,
//! plus helpers to build a controller bound to a small city record.
//!
//! Only available when compiled with `cfg(test)`.

use crate::binding::{BoundField, FormRecord};
use crate::config::AutocompleteConfig;
use crate::controller::InputController;
use crate::item::Item;
use crate::source::{SearchFuture, SearchSource, SourceError};
use futures::FutureExt;
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tokio::time::Instant;

/// Controller type used throughout the tests
pub type TestController = InputController<BoundField, ScriptedSource>;

#[derive(Debug, Clone)]
enum Reply {
    Items(Vec<Item>),
    Failure(String),
}

#[derive(Debug, Default)]
struct Script {
    replies: HashMap<String, (Duration, Reply)>,
    calls: Vec<String>,
}

/// Search source answering from a script, recording every call
///
/// Unscripted queries resolve immediately with no items. The delay runs from
/// the moment the search is issued. Clones share the same script and call log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: Rc<RefCell<Script>>,
}

impl ScriptedSource {
    /// Create a source with an empty script
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` after `delay_ms` with items named `names`
    #[must_use]
    pub fn respond(self, query: &str, delay_ms: u64, names: &[&str]) -> Self {
        let items = names.iter().map(|n| named(n)).collect();
        self.respond_items(query, delay_ms, items)
    }

    /// Answer `query` after `delay_ms` with the given items
    #[must_use]
    pub fn respond_items(self, query: &str, delay_ms: u64, items: Vec<Item>) -> Self {
        self.script.borrow_mut().replies.insert(
            query.to_string(),
            (Duration::from_millis(delay_ms), Reply::Items(items)),
        );
        self
    }

    /// Fail `query` after `delay_ms`
    #[must_use]
    pub fn fail(self, query: &str, delay_ms: u64) -> Self {
        self.script.borrow_mut().replies.insert(
            query.to_string(),
            (
                Duration::from_millis(delay_ms),
                Reply::Failure(format!("backend refused '{query}'")),
            ),
        );
        self
    }

    /// Every query received so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.script.borrow().calls.clone()
    }
}

impl SearchSource for ScriptedSource {
    fn search(&self, raw: &str) -> SearchFuture {
        let mut script = self.script.borrow_mut();
        script.calls.push(raw.to_string());
        let (delay, reply) = script
            .replies
            .get(raw)
            .cloned()
            .unwrap_or((Duration::ZERO, Reply::Items(Vec::new())));

        let ready_at = Instant::now() + delay;

        async move {
            tokio::time::sleep_until(ready_at).await;
            match reply {
                Reply::Items(items) => Ok(items),
                Reply::Failure(message) => Err(SourceError::Failed(message)),
            }
        }
        .boxed_local()
    }
}

/// Item with a single `name` field
#[must_use]
pub fn named(name: &str) -> Item {
    Item::with_field("name", name)
}

/// Record `{name, code, country}` bound on `name`
#[must_use]
pub fn city_field() -> BoundField {
    let record = FormRecord::from_value(json!({"name": "", "code": null, "country": "NO"}))
        .expect("city record is an object");
    BoundField::new(record, "name").expect("city record has a name field")
}

/// Controller over [`city_field`] using a clone of `source`
#[must_use]
pub fn controller(config: AutocompleteConfig, source: &ScriptedSource) -> TestController {
    InputController::attach(config, city_field(), source.clone())
}

/// Simulate the user typing `text` into the bound field
pub fn type_text(controller: &mut TestController, text: &str) {
    controller.binding_mut().input(text);
    controller.on_value_change(text);
}
