//! Fetch state machine for one paginated list view.
//!
//! Every request gets a [`RequestToken`]; only the response carrying the
//! latest token is applied. Older responses are dropped when they arrive,
//! they are never cancelled in flight.

use std::mem;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::Result;
use crate::filter::{FilterChange, FilterSet, Selection};
use crate::pagination::{Cursor, DEFAULT_PAGE_SIZE};
use crate::table::Row;

use super::{ListQuery, ListSource, Page};

/// Shown when the latest fetch failed.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load data";

/// Shown when a fetch succeeded but nothing is visible.
pub const NO_RESULTS_MESSAGE: &str = "No results";

/// Identifies one issued request. Later requests carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success {
        items: Vec<Row>,
        cursor: Cursor,
    },
    Error {
        message: String,
    },
}

/// A finished background fetch, delivered back to the controller.
#[derive(Debug)]
pub struct FetchOutcome {
    pub token: RequestToken,
    pub result: Result<Page<Row>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request was issued after this one
    Discarded,
}

#[derive(Debug, Clone)]
pub struct ListController {
    state: FetchState,
    /// Items of the last successful page while a newer fetch is loading or failed
    last_good: Option<(Vec<Row>, Cursor)>,
    filters: FilterSet,
    cursor: Cursor,
    page_size: u32,
    latest: u64,
    loaded: bool,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, FilterSet::default())
    }
}

impl ListController {
    pub fn new(page_size: u32, filters: FilterSet) -> Self {
        let page_size = page_size.max(1);
        Self {
            state: FetchState::Idle,
            last_good: None,
            filters,
            cursor: Cursor::new(1, page_size, 0),
            page_size,
            latest: 0,
            loaded: false,
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Issue a request for `page`.
    ///
    /// The page is clamped into the known page range; until a page has
    /// arrived only the lower bound is known.
    pub fn begin(&mut self, page: u32) -> (RequestToken, ListQuery) {
        let page = if self.loaded {
            self.cursor.clamp(page)
        } else {
            page.max(1)
        };

        if let FetchState::Success { items, cursor } =
            mem::replace(&mut self.state, FetchState::Loading)
        {
            self.last_good = Some((items, cursor));
        }

        self.latest += 1;
        let token = RequestToken(self.latest);
        tracing::debug!(token = token.0, page, "list fetch issued");

        let mut query = ListQuery::new(page, self.page_size);
        query.filters = self.filters.query_params();
        (token, query)
    }

    /// Apply the result of request `token` unless a newer request exists.
    pub fn complete(&mut self, token: RequestToken, result: Result<Page<Row>>) -> Completion {
        if token.0 != self.latest {
            tracing::warn!(
                token = token.0,
                latest = self.latest,
                "discarding stale list response"
            );
            return Completion::Discarded;
        }

        match result {
            Ok(page) => {
                let cursor = page.cursor(self.page_size);
                self.cursor = cursor;
                self.loaded = true;
                self.last_good = None;
                self.state = FetchState::Success {
                    items: page.items,
                    cursor,
                };
            }
            Err(err) => {
                tracing::warn!(error = %err, "list fetch failed");
                self.state = FetchState::Error {
                    message: LOAD_ERROR_MESSAGE.to_string(),
                };
            }
        }
        Completion::Applied
    }

    pub fn apply(&mut self, outcome: FetchOutcome) -> Completion {
        self.complete(outcome.token, outcome.result)
    }

    /// Fetch `page` from `source` and apply it.
    pub async fn fetch_page<S: ListSource>(&mut self, source: &S, page: u32) -> Completion {
        let (token, query) = self.begin(page);
        let result = source.load(&query).await;
        self.complete(token, result)
    }

    /// Re-fetch the current page with current filters.
    pub async fn refresh<S: ListSource>(&mut self, source: &S) -> Completion {
        self.fetch_page(source, self.cursor.page()).await
    }

    /// `None` when already on the last page.
    pub async fn next_page<S: ListSource>(&mut self, source: &S) -> Option<Completion> {
        let page = self.cursor.next_page()?;
        Some(self.fetch_page(source, page).await)
    }

    /// `None` when already on the first page.
    pub async fn previous_page<S: ListSource>(&mut self, source: &S) -> Option<Completion> {
        let page = self.cursor.previous_page()?;
        Some(self.fetch_page(source, page).await)
    }

    /// Change a filter without fetching. A `Server` change means the caller
    /// must fetch page 1.
    pub fn set_filter(&mut self, name: &str, selection: Selection) -> FilterChange {
        self.filters.set(name, selection)
    }

    /// Change a filter; server-side changes restart at page 1.
    pub async fn apply_filter<S: ListSource>(
        &mut self,
        source: &S,
        name: &str,
        selection: Selection,
    ) -> FilterChange {
        let change = self.set_filter(name, selection);
        if change == FilterChange::Server {
            self.fetch_page(source, 1).await;
        }
        change
    }

    /// Load `page` on a background task; the outcome arrives on `tx`.
    pub fn spawn_fetch<S>(
        &mut self,
        source: Arc<S>,
        page: u32,
        tx: mpsc::UnboundedSender<FetchOutcome>,
    ) -> RequestToken
    where
        S: ListSource + 'static,
    {
        let (token, query) = self.begin(page);
        tokio::spawn(async move {
            let result = source.load(&query).await;
            if tx.send(FetchOutcome { token, result }).is_err() {
                tracing::debug!(token = token.0, "list view dropped before fetch finished");
            }
        });
        token
    }

    fn held_items(&self) -> &[Row] {
        match (&self.state, &self.last_good) {
            (FetchState::Success { items, .. }, _) => items,
            (_, Some((items, _))) => items,
            _ => &[],
        }
    }

    /// Held items narrowed by the client-side filters.
    pub fn visible_items(&self) -> Vec<&Row> {
        self.filters.apply(self.held_items())
    }

    /// Error message, or the empty-results message when nothing is visible.
    pub fn status_message(&self) -> Option<&str> {
        match &self.state {
            FetchState::Error { message } => Some(message),
            FetchState::Success { .. } if self.visible_items().is_empty() => {
                Some(NO_RESULTS_MESSAGE)
            }
            _ => None,
        }
    }
}
