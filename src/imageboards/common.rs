//! Shared parsing algorithm for every XML backend.
//!
//! Each backend describes its wire format with a field table (see [`SiteApi::FIELDS`]). The
//! table drives one generic walk over the response: one [`ImageRecord`] per record element,
//! completed by the backend, then turned into an [`Image`] or dropped.
use log::{debug, warn};
use roxmltree::{Document, Node};
use std::str::FromStr;
use url::Url;

use super::dates::parse_date;
use super::SiteApi;
use crate::client_config::Settings;
use crate::error::ExtractorError;
use crate::image::{
    pixiv_id_from_url,
    rating::SafeSearchRating,
    tags::{Tag, TagType},
    Image,
};

/// Number of images requested per page.
pub const PAGE_LIMIT: u32 = 100;

/// Where a record's fields live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordEncoding {
    /// `<post id="1" file_url="..." />`
    Attributes,
    /// `<post><id>1</id><file_url>...</file_url></post>`
    ChildElements,
}

/// How the caller-facing page (always 0 for the first page) maps to the API's paging parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageIndexing {
    ZeroBased,
    OneBased,
}

impl PageIndexing {
    pub const fn remap(self, page: u32) -> u32 {
        match self {
            Self::ZeroBased => page,
            Self::OneBased => page.saturating_add(1),
        }
    }
}

/// Destination of a wire field inside an [`ImageRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FileUrl,
    Width,
    Height,
    SampleUrl,
    SampleWidth,
    SampleHeight,
    PreviewUrl,
    PreviewWidth,
    PreviewHeight,
    /// Medium size used as a fallback for both the file and the sample.
    MediumUrl,
    MediumWidth,
    MediumHeight,
    /// Space-separated tag list of the given type.
    Tags(TagType),
    Id,
    ParentId,
    PixivId,
    Rating,
    Score,
    Source,
    Md5,
    CreatedAt,
    /// Uploader ID, used to build web URLs.
    Owner,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSlot {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl MediaSlot {
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}

/// Raw values collected from one record, before URL resolution and fallbacks.
#[derive(Debug, Clone, Default)]
pub struct ImageRecord {
    pub id: String,
    pub parent_id: Option<String>,
    pub pixiv_id: Option<String>,
    pub file: MediaSlot,
    pub sample: MediaSlot,
    pub preview: MediaSlot,
    pub medium: MediaSlot,
    pub rating: SafeSearchRating,
    pub tags: Vec<Tag>,
    pub score: i64,
    pub source: String,
    pub md5: String,
    pub created_at: String,
    pub owner: String,
}

impl ImageRecord {
    /// Stores `value` into `field`. `nil` marks an explicitly null value.
    ///
    /// Malformed numbers become 0.
    pub fn set(&mut self, name: &str, field: Field, value: &str, nil: bool) {
        let value = value.trim();

        match field {
            Field::FileUrl => self.file.url = value.to_string(),
            Field::Width => self.file.width = parse_number(name, value),
            Field::Height => self.file.height = parse_number(name, value),
            Field::SampleUrl => self.sample.url = value.to_string(),
            Field::SampleWidth => self.sample.width = parse_number(name, value),
            Field::SampleHeight => self.sample.height = parse_number(name, value),
            Field::PreviewUrl => self.preview.url = value.to_string(),
            Field::PreviewWidth => self.preview.width = parse_number(name, value),
            Field::PreviewHeight => self.preview.height = parse_number(name, value),
            Field::MediumUrl => self.medium.url = value.to_string(),
            Field::MediumWidth => self.medium.width = parse_number(name, value),
            Field::MediumHeight => self.medium.height = parse_number(name, value),
            Field::Tags(tag_type) => self
                .tags
                .extend(Tag::array_from_string(value, tag_type)),
            Field::Id => self.id = value.to_string(),
            Field::ParentId => self.parent_id = optional(value, nil),
            Field::PixivId => self.pixiv_id = optional(value, nil),
            Field::Rating => self.rating = SafeSearchRating::from_code(value),
            Field::Score => self.score = parse_number(name, value),
            Field::Source => self.source = value.to_string(),
            Field::Md5 => self.md5 = value.to_string(),
            Field::CreatedAt => {
                if !value.is_empty() {
                    self.created_at = value.to_string();
                }
            }
            Field::Owner => self.owner = value.to_string(),
        }
    }

    /// Turns the record into an [`Image`], or `None` when it has no file URL.
    pub fn into_image<A: SiteApi>(
        mut self,
        settings: &Settings,
        page: u32,
        position: u32,
    ) -> Option<Image> {
        if self.file.is_empty() {
            debug!("Dropping image {} without file URL", self.id);
            return None;
        }

        for slot in [&mut self.file, &mut self.sample, &mut self.preview] {
            slot.url = normalize_url(&settings.endpoint, &slot.url);
        }

        if self.sample.is_empty() {
            self.sample = self.file.clone();
        }

        let pixiv_id = self.pixiv_id.take().or_else(|| pixiv_id_from_url(&self.source));

        let created_at = parse_date(&self.created_at, A::DATE_FORMATS);
        if created_at.is_none() && !self.created_at.is_empty() {
            warn!(
                "Unknown date format \"{}\" on image {}",
                self.created_at, self.id
            );
        }

        let web_url = A::web_url(settings, &self);

        Some(Image {
            id: self.id,
            parent_id: self.parent_id,
            pixiv_id,
            file_url: self.file.url,
            width: self.file.width,
            height: self.file.height,
            sample_url: self.sample.url,
            sample_width: self.sample.width,
            sample_height: self.sample.height,
            preview_url: self.preview.url,
            preview_width: self.preview.width,
            preview_height: self.preview.height,
            safe_search_rating: self.rating,
            tags: self.tags,
            score: self.score,
            source: self.source,
            md5: self.md5,
            created_at,
            web_url,
            search_page: Some(page),
            search_page_position: Some(position),
        })
    }
}

/// Images parsed from one response page.
#[derive(Debug)]
pub struct ParsedPage {
    pub images: Vec<Image>,
    /// Number of record elements found, including dropped ones.
    pub records: usize,
    pub total_count: Option<u64>,
}

/// Walks every record of a response body and maps it through the backend's field table.
pub fn parse_records<A: SiteApi>(
    body: &str,
    settings: &Settings,
    page: u32,
) -> Result<ParsedPage, ExtractorError> {
    if body.trim().is_empty() {
        return Err(ExtractorError::EmptyResponse);
    }

    // Some PHP boards emit whitespace before the XML declaration.
    let doc = Document::parse(body.trim_start())?;
    let root = doc.root_element();

    A::validate(root)?;

    let mut images = Vec::with_capacity(PAGE_LIMIT as usize);
    let mut records = 0;
    let mut position = 0;

    for node in root
        .descendants()
        .filter(|n| n.has_tag_name(A::RECORD_TAG))
    {
        records += 1;

        let mut record = ImageRecord::default();
        read_fields::<A>(node, &mut record);
        A::complete(&mut record);

        if let Some(image) = record.into_image::<A>(settings, page, position) {
            images.push(image);
            position += 1;
        }
    }

    debug!(
        "Mapped {} images out of {records} records on page {page}",
        images.len()
    );

    Ok(ParsedPage {
        images,
        records,
        total_count: A::total_count(root),
    })
}

fn read_fields<A: SiteApi>(node: Node, record: &mut ImageRecord) {
    match A::ENCODING {
        RecordEncoding::Attributes => {
            for attr in node.attributes() {
                if let Some(field) = lookup::<A>(attr.name()) {
                    record.set(attr.name(), field, attr.value(), false);
                }
            }
        }
        RecordEncoding::ChildElements => {
            for child in node.children().filter(Node::is_element) {
                let name = child.tag_name().name();
                if let Some(field) = lookup::<A>(name) {
                    let nil = child.attribute("nil") == Some("true");
                    record.set(name, field, child.text().unwrap_or_default(), nil);
                }
            }
        }
    }
}

fn lookup<A: SiteApi>(name: &str) -> Option<Field> {
    A::FIELDS
        .iter()
        .find(|(wire, _)| *wire == name)
        .map(|(_, field)| *field)
}

fn parse_number<T: FromStr + Default>(name: &str, value: &str) -> T {
    if value.is_empty() {
        return T::default();
    }

    value.parse().unwrap_or_else(|_| {
        debug!("Invalid number \"{value}\" in field {name}, using default");
        T::default()
    })
}

fn optional(value: &str, nil: bool) -> Option<String> {
    if nil || value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Resolves a possibly relative or protocol-relative URL against the API endpoint.
///
/// Relative paths, with or without a leading slash, stay under the endpoint's path, so boards
/// installed in a subdirectory resolve correctly.
pub fn normalize_url(endpoint: &str, url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    if Url::parse(url).is_ok() {
        return url.to_string();
    }

    let resolved = if url.starts_with("//") {
        Url::parse(endpoint).and_then(|base| base.join(url))
    } else {
        Url::parse(&format!("{}/", endpoint.trim_end_matches('/')))
            .and_then(|base| base.join(url.trim_start_matches('/')))
    };

    resolved
        .map(String::from)
        .unwrap_or_else(|_| url.to_string())
}
