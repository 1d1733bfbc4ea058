//! The common search interface exposed by every supported backend.
//! # Search clients
//!
//! All backends implement [`SearchClient`]: they connect to an imageboard API, search for
//! images with the tags supplied and parse them into a [`SearchResult`].
//!
//! Clients are created from a [`Settings`] record with
//! [`Settings::create_search_client`](crate::client_config::Settings::create_search_client)
//! and can be turned back into one at any time with [`SearchClient::settings`].
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::client_config::Settings;
use crate::error::SearchError;
use crate::search_result::SearchResult;

pub mod caps;

/// Whether a backend needs credentials to be usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthenticationType {
    /// The API refuses requests without credentials.
    Required,
    /// Credentials unlock more content, but anonymous searches work.
    Optional,
    /// The API doesn't support authentication at all.
    None,
}

impl Display for AuthenticationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Optional => write!(f, "optional"),
            Self::None => write!(f, "none"),
        }
    }
}

/// This trait should be the only interface other code depends on when searching.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Fetches the first page of results for a space-separated tag query.
    async fn search(&self, tags: &str) -> Result<SearchResult, SearchError> {
        self.search_page(tags, 0).await
    }

    /// Fetches one page of results.
    ///
    /// `page` always starts at 0, whatever indexing the backend's API uses.
    async fn search_page(&self, tags: &str, page: u32) -> Result<SearchResult, SearchError>;

    /// A query to run on first load. May be empty.
    fn default_query(&self) -> &str;

    /// Whether a credential prompt should be shown for this client. Never performs I/O.
    fn requires_authentication(&self) -> AuthenticationType;

    /// Returns a [`Settings`] record that recreates an equivalent client.
    fn settings(&self) -> Settings;
}
