//! Free-text news search.
//!
//! A search asks the backend to look up and ingest matching articles; the
//! news list is then reloaded from page 1 so the new items show up.

use std::future::Future;

use crate::api::ApiClient;
use crate::config::DEFAULT_SEARCH_LANGUAGE;
use crate::error::Result;
use crate::filter::Selection;
use crate::list::{Completion, ListController, ListSource};
use crate::models::SearchRequest;

/// Shown when the search request fails.
pub const SEARCH_ERROR_MESSAGE: &str = "Search failed";

/// Anything that can run a search-and-ingest request.
pub trait SearchBackend: Send + Sync {
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<serde_json::Value>> + Send;
}

impl SearchBackend for ApiClient {
    async fn search(&self, request: &SearchRequest) -> Result<serde_json::Value> {
        self.search_news(request).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Blank query, nothing was sent
    Skipped,
    Completed {
        response: serde_json::Value,
        refresh: Completion,
    },
    Failed,
}

#[derive(Debug, Clone)]
pub struct SearchDispatcher {
    language: String,
    searching: bool,
    error: Option<String>,
}

impl Default for SearchDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_LANGUAGE)
    }
}

impl SearchDispatcher {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            searching: false,
            error: None,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Independent of the list's loading flag.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a search. `None` for a blank query.
    pub fn begin(&mut self, query: &str, competitor: &Selection) -> Option<SearchRequest> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.searching = true;
        self.error = None;

        let competitors = match competitor {
            Selection::Value(name) => Some(vec![name.clone()]),
            Selection::All | Selection::Flag(_) => None,
        };
        Some(SearchRequest {
            query: query.to_string(),
            competitors,
            language: self.language.clone(),
        })
    }

    /// Record the result of the request issued by [`SearchDispatcher::begin`].
    /// Returns whether it succeeded.
    pub fn finish(&mut self, result: &Result<serde_json::Value>) -> bool {
        self.searching = false;
        match result {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %err, "news search failed");
                self.error = Some(SEARCH_ERROR_MESSAGE.to_string());
                false
            }
        }
    }

    /// Run a search, then reload `list` from page 1 on success.
    ///
    /// On failure the list is left untouched.
    pub async fn search<B, S>(
        &mut self,
        backend: &B,
        list: &mut ListController,
        source: &S,
        query: &str,
        competitor: &Selection,
    ) -> SearchOutcome
    where
        B: SearchBackend,
        S: ListSource,
    {
        let Some(request) = self.begin(query, competitor) else {
            return SearchOutcome::Skipped;
        };

        let result = backend.search(&request).await;
        if !self.finish(&result) {
            return SearchOutcome::Failed;
        }

        let response = result.unwrap_or_default();
        let refresh = list.fetch_page(source, 1).await;
        SearchOutcome::Completed { response, refresh }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::ScopeError;
    use crate::filter::FilterSet;
    use crate::list::LocalSource;
    use crate::table::Row;

    struct RecordingBackend {
        requests: Mutex<Vec<SearchRequest>>,
        fail: bool,
    }

    impl RecordingBackend {
        fn new(fail: bool) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl SearchBackend for RecordingBackend {
        async fn search(&self, request: &SearchRequest) -> Result<serde_json::Value> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                Err(ScopeError::Api {
                    status: 502,
                    message: "upstream".to_string(),
                })
            } else {
                Ok(serde_json::json!({"saved": 3}))
            }
        }
    }

    fn source() -> LocalSource {
        LocalSource::new((1..=30).map(|i| Row::new().with("id", i as u32)).collect())
    }

    #[tokio::test]
    async fn test_blank_query_is_a_no_op() {
        let backend = RecordingBackend::new(false);
        let mut dispatcher = SearchDispatcher::default();
        let mut list = ListController::default();

        let outcome = dispatcher
            .search(&backend, &mut list, &source(), "   ", &Selection::All)
            .await;

        assert_eq!(outcome, SearchOutcome::Skipped);
        assert!(backend.requests.lock().unwrap().is_empty());
        assert_eq!(list.state(), &crate::list::FetchState::Idle);
    }

    #[tokio::test]
    async fn test_success_refreshes_first_page() {
        let backend = RecordingBackend::new(false);
        let source = source();
        let mut dispatcher = SearchDispatcher::default();
        let mut list = ListController::new(10, FilterSet::default());
        list.fetch_page(&source, 2).await;

        let outcome = dispatcher
            .search(
                &backend,
                &mut list,
                &source,
                " tarifas uber ",
                &Selection::Value("uber".into()),
            )
            .await;

        assert!(matches!(
            outcome,
            SearchOutcome::Completed {
                refresh: Completion::Applied,
                ..
            }
        ));
        assert_eq!(list.cursor().page(), 1);
        assert!(!dispatcher.is_searching());

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests[0].query, "tarifas uber");
        assert_eq!(requests[0].competitors, Some(vec!["uber".to_string()]));
        assert_eq!(requests[0].language, "es");
    }

    #[tokio::test]
    async fn test_failure_leaves_list_untouched() {
        let backend = RecordingBackend::new(true);
        let source = source();
        let mut dispatcher = SearchDispatcher::default();
        let mut list = ListController::new(10, FilterSet::default());
        list.fetch_page(&source, 3).await;
        let before = list.state().clone();

        let outcome = dispatcher
            .search(&backend, &mut list, &source, "didi", &Selection::All)
            .await;

        assert_eq!(outcome, SearchOutcome::Failed);
        assert_eq!(dispatcher.error(), Some(SEARCH_ERROR_MESSAGE));
        assert_eq!(list.state(), &before);
        assert_eq!(list.error(), None);
    }

    #[test]
    fn test_searching_flag_spans_the_request() {
        let mut dispatcher = SearchDispatcher::new("en");
        let request = dispatcher.begin("bolt", &Selection::All).unwrap();
        assert!(dispatcher.is_searching());
        assert_eq!(request.language, "en");
        assert_eq!(request.competitors, None);

        dispatcher.finish(&Ok(serde_json::Value::Null));
        assert!(!dispatcher.is_searching());
    }

    #[test]
    fn test_new_search_clears_previous_error() {
        let mut dispatcher = SearchDispatcher::default();
        dispatcher.begin("x", &Selection::All);
        dispatcher.finish(&Err(ScopeError::Other("boom".into())));
        assert!(dispatcher.error().is_some());

        dispatcher.begin("y", &Selection::All);
        assert_eq!(dispatcher.error(), None);
    }
}
