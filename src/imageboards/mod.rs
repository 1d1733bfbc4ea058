//! Backend adapters.
//! # Imageboards
//!
//! Every supported API is described by a zero-sized type implementing [`SiteApi`]: its request
//! URL, its authentication style, its paging and a table mapping wire fields to [`Image`]
//! fields. The generic [`BooruClient`] turns any of them into a [`SearchClient`].
//!
//! | Backend | Records | Paging | Auth |
//! |---|---|---|---|
//! | [`Danbooru`] | child elements | 1-based | HTTP Basic (login, API key) |
//! | [`DanbooruLegacy`] | attributes | 1-based | HTTP Basic |
//! | [`Gelbooru`] | attributes | 0-based | HTTP Basic |
//! | [`Shimmie`] | attributes | 1-based | HTTP Basic |
//! | [`E621`] | child elements | 1-based | none |
//! | [`Flickr`], [`FlickrUser`] | `<photo>` attributes | 1-based | API key (required) |
//!
//! [`Image`]: crate::image::Image
//! [`Danbooru`]: danbooru::Danbooru
//! [`DanbooruLegacy`]: moebooru::DanbooruLegacy
//! [`Gelbooru`]: gelbooru::Gelbooru
//! [`Shimmie`]: shimmie::Shimmie
//! [`E621`]: e621::E621
//! [`Flickr`]: flickr::Flickr
//! [`FlickrUser`]: flickr::FlickrUser
use async_trait::async_trait;
use log::debug;
use roxmltree::Node;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::client::{AuthenticationType, SearchClient};
use crate::client_config::{ApiType, Settings};
use crate::error::{ExtractorError, SearchError};
use crate::image::tags::{Tag, TagType};
use crate::search_result::SearchResult;
use crate::transport::{redact_url, HttpRequest, HttpTransport};

use self::common::{parse_records, Field, ImageRecord, PageIndexing, RecordEncoding};
use self::dates::DateFormat;

pub mod common;
pub mod danbooru;
pub mod dates;
pub mod e621;
pub mod flickr;
pub mod gelbooru;
pub mod moebooru;
pub mod prelude;
pub mod shimmie;

/// Time allowed for a whole search request, body included.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Static description of one backend API.
pub trait SiteApi: Send + Sync + 'static {
    const API_TYPE: ApiType;
    const AUTHENTICATION: AuthenticationType;
    /// Send credentials with HTTP Basic auth instead of in the URL.
    const BASIC_AUTH: bool = false;
    const DEFAULT_QUERY: &'static str = "";
    const PAGE_INDEXING: PageIndexing = PageIndexing::OneBased;
    const ROOT_TAG: &'static str = "posts";
    const RECORD_TAG: &'static str = "post";
    const ENCODING: RecordEncoding;
    /// Wire field name to [`Field`] table. Names missing from the table are ignored.
    const FIELDS: &'static [(&'static str, Field)];
    const DATE_FORMATS: &'static [DateFormat];

    /// Builds the search URL. `page` is already remapped with [`Self::PAGE_INDEXING`].
    fn search_url(settings: &Settings, tags: &str, page: u32) -> String;

    fn web_url(settings: &Settings, record: &ImageRecord) -> String;

    /// Fills values the API doesn't return, before the record is validated.
    fn complete(_record: &mut ImageRecord) {}

    /// Rejects documents that aren't a post list of this API.
    fn validate(root: Node) -> Result<(), ExtractorError> {
        if root.has_tag_name(Self::ROOT_TAG) {
            Ok(())
        } else {
            debug!("Unexpected root element <{}>", root.tag_name().name());
            Err(ExtractorError::InvalidServerResponse)
        }
    }

    /// Total number of results for the query, when the API reports it.
    fn total_count(root: Node) -> Option<u64> {
        root.attribute("count").and_then(|c| c.parse().ok())
    }
}

/// [`SearchClient`] for any [`SiteApi`].
pub struct BooruClient<A: SiteApi> {
    settings: Settings,
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
    api: PhantomData<fn() -> A>,
}

impl<A: SiteApi> BooruClient<A> {
    pub fn new(settings: Settings, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            settings,
            transport,
            timeout: DEFAULT_SEARCH_TIMEOUT,
            api: PhantomData,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Request URL for a caller-facing, 0-based page.
    pub fn search_url(&self, tags: &str, page: u32) -> String {
        A::search_url(
            &self.settings,
            tags.trim(),
            A::PAGE_INDEXING.remap(page),
        )
    }

    /// Parses one response body into a [`SearchResult`] for `page`.
    pub fn parse(&self, body: &str, tags: &str, page: u32) -> Result<SearchResult, ExtractorError> {
        let parsed = parse_records::<A>(body, &self.settings, page)?;

        let mut result = SearchResult::new(
            parsed.images,
            Tag::array_from_string(tags, TagType::General),
            page,
        )
        .with_total_count(parsed.total_count);

        if parsed.records == 0 {
            result.on_last_page();
        }

        Ok(result)
    }

    async fn fetch(&self, tags: &str, page: u32) -> Result<SearchResult, ExtractorError> {
        let url = self.search_url(tags, page);

        if Url::parse(&url).is_err() {
            return Err(ExtractorError::InvalidEndpoint {
                url: redact_url(&url),
            });
        }

        debug!("{} search URL: {}", A::API_TYPE, redact_url(&url));

        let mut request = HttpRequest::get(&url).timeout(self.timeout);

        if A::BASIC_AUTH {
            if let Some((username, password)) = self.settings.credentials() {
                request = request.basic_auth(username, Some(password));
            }
        }

        let response = self.transport.get(request).await?;

        if !response.is_success() {
            return Err(ExtractorError::HttpStatus {
                status: response.status,
            });
        }

        self.parse(&response.body, tags, page)
    }
}

#[async_trait]
impl<A: SiteApi> SearchClient for BooruClient<A> {
    async fn search_page(&self, tags: &str, page: u32) -> Result<SearchResult, SearchError> {
        Ok(self.fetch(tags, page).await?)
    }

    fn default_query(&self) -> &str {
        A::DEFAULT_QUERY
    }

    fn requires_authentication(&self) -> AuthenticationType {
        A::AUTHENTICATION
    }

    fn settings(&self) -> Settings {
        self.settings.clone()
    }
}

/// Percent-encodes a tag query for use in a URL.
pub(crate) fn encode_tags(tags: &str) -> String {
    urlencoding::encode(tags).into_owned()
}
