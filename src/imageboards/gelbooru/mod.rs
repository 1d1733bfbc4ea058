//! Gelbooru DAPI (`/index.php?page=dapi&s=post&q=index`).
//!
//! Same attribute layout as Danbooru 1.x, but pages are 0-indexed through the `pid` parameter.
use crate::client::AuthenticationType;
use crate::client_config::{ApiType, Settings};
use crate::imageboards::common::{Field, ImageRecord, PageIndexing, RecordEncoding, PAGE_LIMIT};
use crate::imageboards::dates::DateFormat;
use crate::imageboards::moebooru::LEGACY_FIELDS;
use crate::imageboards::{encode_tags, SiteApi};

pub struct Gelbooru;

impl SiteApi for Gelbooru {
    const API_TYPE: ApiType = ApiType::Gelbooru;
    const AUTHENTICATION: AuthenticationType = AuthenticationType::Optional;
    const BASIC_AUTH: bool = true;
    const PAGE_INDEXING: PageIndexing = PageIndexing::ZeroBased;
    const ENCODING: RecordEncoding = RecordEncoding::Attributes;
    const FIELDS: &'static [(&'static str, Field)] = LEGACY_FIELDS;
    // Sat Jan 03 12:00:00 -0500 2015
    const DATE_FORMATS: &'static [DateFormat] =
        &[DateFormat::WithOffset("%a %b %d %H:%M:%S %z %Y")];

    fn search_url(settings: &Settings, tags: &str, page: u32) -> String {
        format!(
            "{}/index.php?page=dapi&s=post&q=index&tags={}&pid={page}&limit={PAGE_LIMIT}",
            settings.endpoint,
            encode_tags(tags)
        )
    }

    fn web_url(settings: &Settings, record: &ImageRecord) -> String {
        format!(
            "{}/index.php?page=post&s=view&id={}",
            settings.endpoint, record.id
        )
    }
}
