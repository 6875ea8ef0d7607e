//! Search source abstraction
//!
//! A search source is supplied by the integrator. Each invocation must
//! eventually produce exactly one batch of items; ranking and filtering are
//! entirely the source's business. The controller never aborts an in-flight
//! search, it only discards results that have been superseded.
//!
//! Any closure `Fn(String) -> impl Future<Output = Result<Vec<Item>>>` is a
//! search source:
//!
//! ```
//! use typeahead::Item;
//! use typeahead::source::{SearchSource, SourceError};
//!
//! let source = |query: String| async move {
//!     Ok::<_, SourceError>(vec![Item::with_field("name", format!("{query}1"))])
//! };
//! let _pending = source.search("abc");
//! ```

mod error;

pub use error::{Result, SourceError};

use crate::item::Item;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

/// Future returned by a search invocation
pub type SearchFuture = LocalBoxFuture<'static, Result<Vec<Item>>>;

/// Trait for asynchronous suggestion providers
///
/// The returned future owns everything it needs; the controller may keep it
/// alive after the query that produced it has been superseded.
pub trait SearchSource {
    /// Start a search for the given raw field value
    fn search(&self, raw: &str) -> SearchFuture;
}

impl<F, Fut> SearchSource for F
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<Item>>> + 'static,
{
    fn search(&self, raw: &str) -> SearchFuture {
        self(raw.to_string()).boxed_local()
    }
}

/// Search source over a fixed list of items
///
/// Returns every item whose `field` text contains the query, ignoring case,
/// in list order. Intended for demos and tests; real integrations usually
/// call a backend.
#[derive(Debug, Clone)]
pub struct StaticSource {
    items: Rc<Vec<Item>>,
    field: String,
    latency: Duration,
}

impl StaticSource {
    /// Create a source over `items`, matching on `field`
    #[must_use]
    pub fn new(items: Vec<Item>, field: impl Into<String>) -> Self {
        Self {
            items: Rc::new(items),
            field: field.into(),
            latency: Duration::ZERO,
        }
    }

    /// Simulate backend latency before each response
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of items in the list
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl SearchSource for StaticSource {
    fn search(&self, raw: &str) -> SearchFuture {
        let needle = raw.to_lowercase();
        let matches: Vec<Item> = self
            .items
            .iter()
            .filter(|item| {
                item.text(&self.field)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        let latency = self.latency;

        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            Ok(matches)
        }
        .boxed_local()
    }
}
