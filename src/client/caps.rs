//! Callback-based searches running on the Tokio runtime.
use log::debug;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::SearchClient;
use crate::error::SearchError;
use crate::search_result::SearchResult;

/// Handle to a search started by [`AsyncSearch`].
///
/// Dropping the handle detaches the search, it does not cancel it.
#[derive(Debug)]
pub struct SearchHandle {
    task: JoinHandle<()>,
}

impl SearchHandle {
    /// Cancels the search.
    ///
    /// The completion callback of a cancelled search is never invoked. If the callback is
    /// already running, it runs to completion and cancelling does nothing.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the search to end. Returns `true` if the callback was invoked.
    pub async fn join(self) -> bool {
        self.task.await.is_ok()
    }
}

/// Capability for a shared client to run searches in the background and report through a callback.
///
/// The callback is invoked exactly once, with either a result or an error, unless the search is
/// [cancelled](SearchHandle::cancel). Searches started concurrently on the same client complete
/// in no particular order.
///
/// Must be called from within a Tokio runtime.
pub trait AsyncSearch {
    fn search_async<F>(&self, tags: &str, callback: F) -> SearchHandle
    where
        F: FnOnce(Result<SearchResult, SearchError>) + Send + 'static,
    {
        self.search_page_async(tags, 0, callback)
    }

    fn search_page_async<F>(&self, tags: &str, page: u32, callback: F) -> SearchHandle
    where
        F: FnOnce(Result<SearchResult, SearchError>) + Send + 'static;
}

impl<C> AsyncSearch for Arc<C>
where
    C: SearchClient + ?Sized + 'static,
{
    fn search_page_async<F>(&self, tags: &str, page: u32, callback: F) -> SearchHandle
    where
        F: FnOnce(Result<SearchResult, SearchError>) + Send + 'static,
    {
        let client = Arc::clone(self);
        let tags = tags.to_string();

        let task = tokio::spawn(async move {
            let result = client.search_page(&tags, page).await;
            debug!("Background search for \"{tags}\" (page {page}) finished");
            callback(result);
        });

        SearchHandle { task }
    }
}
