//! Accumulated search session
//!
//! # SearchResult
//! A [`SearchResult`] is created from the first page returned by a
//! [`SearchClient`](crate::client::SearchClient) and grows as more pages are fetched.
//!
//! It can be filtered by tag or by rating at any time. Filtering is permanent: removed
//! images are never brought back, and the per-page positions of the remaining images are
//! recomputed so they stay dense and 0-based within each page.
//!
//! ```rust
//! use imageboard_search::prelude::*;
//!
//! let mut result = SearchResult::new(Vec::new(), Tag::array_from_string("duck", TagType::General), 0);
//!
//! // A fetch that returned nothing means there are no more pages.
//! result.merge_page(SearchResult::new(Vec::new(), Vec::new(), 1));
//! assert!(!result.has_next_page());
//! ```
use ahash::AHashSet;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::image::{rating::SafeSearchRating, tags::Tag, Image};

/// Search result received from the API, possibly extended with more pages.
///
/// This is a plain value with no internal locking. When several fetches run at once, their
/// pages must be merged into one `SearchResult` from a single place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Images in fetch order, then by position within their page.
    images: Vec<Image>,
    /// Tags originally used to retrieve this result.
    query: Vec<Tag>,
    /// Last paging offset used. Its meaning depends on the backend.
    offset: u32,
    /// `false` once the last page has been fetched.
    has_next_page: bool,
    /// Total number of matching images across all pages, when the backend reports it.
    total_count: Option<u64>,
}

impl SearchResult {
    #[must_use]
    pub fn new(images: Vec<Image>, query: Vec<Tag>, offset: u32) -> Self {
        Self {
            images,
            query,
            offset,
            has_next_page: true,
            total_count: None,
        }
    }

    #[must_use]
    pub(crate) fn with_total_count(mut self, total_count: Option<u64>) -> Self {
        self.total_count = total_count;
        self
    }

    /// Images contained in this result.
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn into_images(self) -> Vec<Image> {
        self.images
    }

    /// Tags used to retrieve this result.
    pub fn query(&self) -> &[Tag] {
        &self.query
    }

    /// Last paging offset used.
    ///
    /// Some APIs use page numbers, some use row offsets. Don't show it to the user unless
    /// you know which backend produced it.
    pub const fn current_offset(&self) -> u32 {
        self.offset
    }

    /// `true` if another page of images could still be fetched.
    pub const fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Total number of matching images, if the backend reported one.
    pub const fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Marks this result as having reached its final page.
    ///
    /// Must be called whenever a fetch returns no images. Don't rely on the length of
    /// [`images`](Self::images) for that, since filtering changes it.
    pub fn on_last_page(&mut self) {
        self.has_next_page = false;
    }

    /// Appends a freshly fetched page and records its paging offset.
    ///
    /// Does not touch [`has_next_page`](Self::has_next_page).
    pub fn add_images(&mut self, images: Vec<Image>, offset: u32) {
        self.images.extend(images);
        self.offset = offset;
    }

    /// Appends the images of `page`, or marks this result as complete when `page` is empty.
    pub fn merge_page(&mut self, page: Self) {
        if page.images.is_empty() {
            debug!("Page {} returned no images, no more pages to fetch", page.offset);
            self.on_last_page();
            return;
        }

        if page.total_count.is_some() {
            self.total_count = page.total_count;
        }
        self.add_images(page.images, page.offset);
    }

    /// Removes every image tagged with any of `tags`.
    ///
    /// Tags that are part of the original query are never used for filtering.
    /// Returns the number of removed images.
    pub fn filter_tags(&mut self, tags: &[Tag]) -> usize {
        if tags.is_empty() {
            return 0;
        }

        let blacklist: AHashSet<&Tag> = tags.iter().filter(|t| !self.query.contains(t)).collect();
        if blacklist.is_empty() {
            return 0;
        }

        let original_size = self.images.len();
        debug!("Removing images with tags {blacklist:?}");
        self.images
            .retain(|image| !image.tags.iter().any(|t| blacklist.contains(t)));

        let removed = original_size - self.images.len();
        debug!("Tag filter removed {removed} images");

        self.reorder_image_positions();
        removed
    }

    /// Keeps only images rated with one of `ratings`.
    ///
    /// Unlike [`filter_tags`](Self::filter_tags), this is an inclusion filter.
    /// Returns the number of removed images.
    pub fn filter_ratings(&mut self, ratings: &[SafeSearchRating]) -> usize {
        if ratings.is_empty() {
            return 0;
        }

        let original_size = self.images.len();
        debug!("Selected ratings: {ratings:?}");
        self.images
            .retain(|image| ratings.contains(&image.safe_search_rating));

        let removed = original_size - self.images.len();
        debug!("Removed {removed} images with non-selected ratings");

        self.reorder_image_positions();
        removed
    }

    /// Recomputes page positions after filtering so they stay dense within each page.
    fn reorder_image_positions(&mut self) {
        let mut current_page = None;
        let mut position = 0;

        for image in self.images.iter_mut().filter(|i| i.search_page.is_some()) {
            if image.search_page != current_page {
                current_page = image.search_page;
                position = 0;
            }
            image.search_page_position = Some(position);
            position += 1;
        }
    }

    /// Creates a smaller result holding only the images fetched for `page`.
    ///
    /// Keeps payloads small when handing results over to another process.
    #[must_use]
    pub fn search_result_for_page(&self, page: u32) -> Self {
        let images = self
            .images
            .iter()
            .filter(|i| i.search_page == Some(page))
            .cloned()
            .collect();

        Self::new(images, self.query.clone(), page)
    }

    /// Encodes this result for transfer to another process.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
