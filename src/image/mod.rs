//! Main representation of an image returned by a search
//!
//! # Image
//! An [`Image` struct](Image) is the canonical representation of one post (or photo) returned by any
//! of the supported backends.
//!
//! Images are only ever created while parsing an API response. The two position fields
//! ([`search_page`](Image::search_page) and [`search_page_position`](Image::search_page_position))
//! are the only ones rewritten afterwards, by [`SearchResult`](crate::search_result::SearchResult)
//! when it filters its images.
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use std::fmt::Debug;

use self::{rating::SafeSearchRating, tags::Tag};

pub mod rating;
pub mod tags;

static PIXIV_ID_FROM_URL: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"https?://(?:www|i\d)\.pixiv\.net/.+?(?:illust_id=|img/.+?/)(\d+)").ok()
});

/// Metadata received from the API for each image.
///
/// Every URL, when not empty, is absolute.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    /// Image ID. Numeric on every known backend, but kept opaque.
    pub id: String,
    /// ID of the parent image, used when there are multiple similar images.
    pub parent_id: Option<String>,
    /// Pixiv illustration ID, when the image was sourced from Pixiv.
    pub pixiv_id: Option<String>,

    /// Full-resolution image URL.
    pub file_url: String,
    pub width: u32,
    pub height: u32,

    /// Medium-resolution sample, usually no more than ~1000px wide.
    ///
    /// Falls back to the full-resolution file when the backend doesn't provide one.
    pub sample_url: String,
    pub sample_width: u32,
    pub sample_height: u32,

    /// Thumbnail URL.
    pub preview_url: String,
    pub preview_width: u32,
    pub preview_height: u32,

    pub safe_search_rating: SafeSearchRating,
    pub tags: Vec<Tag>,
    /// Popularity score.
    pub score: i64,
    /// Source URL, as entered by the uploader.
    pub source: String,
    /// MD5 hash of the original file, 32 hex characters when present.
    pub md5: String,
    /// Upload date. Unset when the backend's date couldn't be parsed.
    pub created_at: Option<DateTime<Utc>>,
    /// URL for viewing the image in a web browser.
    pub web_url: String,

    /// Search result page that contains this image.
    pub search_page: Option<u32>,
    /// Position of the image on its search result page.
    pub search_page_position: Option<u32>,
}

impl Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("ID", &self.id)
            .field("File URL", &self.file_url)
            .field("Web URL", &self.web_url)
            .field("MD5 Hash", &self.md5)
            .field("Rating", &self.safe_search_rating)
            .field("Tag List", &self.tags)
            .field("Page", &self.search_page)
            .field("Position", &self.search_page_position)
            .finish_non_exhaustive()
    }
}

/// Extract a Pixiv ID from the URL of an image's Pixiv page.
///
/// Returns `None` when the URL is empty or doesn't point to Pixiv.
pub fn pixiv_id_from_url(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    PIXIV_ID_FROM_URL
        .as_ref()?
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
