//! E621 and E926 legacy XML API (`/post/index.xml`).
//!
//! Posts are `<post>` elements with one child element per field. Searches here are always
//! anonymous: credentials in [`Settings`] are ignored and never sent.
use crate::client::AuthenticationType;
use crate::client_config::{ApiType, Settings};
use crate::image::tags::TagType;
use crate::imageboards::common::{Field, ImageRecord, RecordEncoding, PAGE_LIMIT};
use crate::imageboards::dates::DateFormat;
use crate::imageboards::{encode_tags, SiteApi};

pub struct E621;

impl SiteApi for E621 {
    const API_TYPE: ApiType = ApiType::E621;
    const AUTHENTICATION: AuthenticationType = AuthenticationType::None;
    const ENCODING: RecordEncoding = RecordEncoding::ChildElements;
    const FIELDS: &'static [(&'static str, Field)] = &[
        ("file_url", Field::FileUrl),
        ("width", Field::Width),
        ("height", Field::Height),
        ("preview_url", Field::PreviewUrl),
        ("preview_width", Field::PreviewWidth),
        ("preview_height", Field::PreviewHeight),
        ("sample_url", Field::SampleUrl),
        ("sample_width", Field::SampleWidth),
        ("sample_height", Field::SampleHeight),
        ("tags", Field::Tags(TagType::General)),
        ("id", Field::Id),
        ("parent_id", Field::ParentId),
        ("rating", Field::Rating),
        ("score", Field::Score),
        ("source", Field::Source),
        ("md5", Field::Md5),
        ("created_at", Field::CreatedAt),
    ];
    const DATE_FORMATS: &'static [DateFormat] = &[
        DateFormat::Rfc3339,
        DateFormat::WithOffset("%Y-%m-%dT%H:%M:%S%z"),
        DateFormat::UnixSeconds,
    ];

    fn search_url(settings: &Settings, tags: &str, page: u32) -> String {
        format!(
            "{}/post/index.xml?tags={}&limit={PAGE_LIMIT}&page={page}",
            settings.endpoint,
            encode_tags(tags)
        )
    }

    fn web_url(settings: &Settings, record: &ImageRecord) -> String {
        format!("{}/post/show/{}", settings.endpoint, record.id)
    }
}
