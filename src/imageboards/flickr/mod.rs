//! Flickr REST API.
//!
//! [`Flickr`] searches every public photo, [`FlickrUser`] the photos of the user whose page is
//! used as endpoint (`https://www.flickr.com/photos/<user id>`). Both need an API key, stored
//! as the password in [`Settings`]. No key is bundled with the crate, so both report
//! [`AuthenticationType::Required`]. The key travels in the query string and is masked in logs.
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::Node;

use crate::client::AuthenticationType;
use crate::client_config::{ApiType, Settings};
use crate::error::ExtractorError;
use crate::image::{rating::SafeSearchRating, tags::TagType};
use crate::imageboards::common::{Field, ImageRecord, RecordEncoding, PAGE_LIMIT};
use crate::imageboards::dates::DateFormat;
use crate::imageboards::SiteApi;

pub const FLICKR_API_ENDPOINT: &str = "https://api.flickr.com/services/rest";

const EXTRAS: &str = "date_upload,owner_name,media,tags,path_alias,icon_server,o_dims,path_alias,original_format,url_q,url_m,url_l,url_o";

static FLICKR_USER_URL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^https?://(?:www\.)?flickr\.com/photos/(.+?)/?$").ok());

const PHOTO_FIELDS: &[(&str, Field)] = &[
    ("id", Field::Id),
    ("owner", Field::Owner),
    ("tags", Field::Tags(TagType::General)),
    ("dateupload", Field::CreatedAt),
    ("url_o", Field::FileUrl),
    ("width_o", Field::Width),
    ("height_o", Field::Height),
    ("url_l", Field::SampleUrl),
    ("width_l", Field::SampleWidth),
    ("height_l", Field::SampleHeight),
    ("url_m", Field::MediumUrl),
    ("width_m", Field::MediumWidth),
    ("height_m", Field::MediumHeight),
    ("url_q", Field::PreviewUrl),
    ("width_q", Field::PreviewWidth),
    ("height_q", Field::PreviewHeight),
];

/// Extracts the user ID from a Flickr user page URL.
pub fn flickr_user_id(url: &str) -> Option<&str> {
    FLICKR_USER_URL
        .as_ref()?
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn rest_url(endpoint: &str, params: &[(&str, String)]) -> String {
    let query: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect();

    format!("{endpoint}?{}", query.join("&"))
}

fn search_params(
    settings: &Settings,
    method: &str,
    tags: &str,
    page: u32,
) -> Vec<(&'static str, String)> {
    vec![
        ("api_key", settings.password.clone().unwrap_or_default()),
        ("method", method.to_string()),
        ("text", tags.to_string()),
        ("per_page", PAGE_LIMIT.to_string()),
        ("extras", EXTRAS.to_string()),
        ("page", page.to_string()),
    ]
}

fn validate_rsp(root: Node) -> Result<(), ExtractorError> {
    if root.has_tag_name("rsp") && root.attribute("stat") == Some("ok") {
        return Ok(());
    }

    if let Some(err) = root.children().find(|n| n.has_tag_name("err")) {
        debug!(
            "Flickr error {}: {}",
            err.attribute("code").unwrap_or_default(),
            err.attribute("msg").unwrap_or_default()
        );
    }

    Err(ExtractorError::InvalidServerResponse)
}

fn photos_total(root: Node) -> Option<u64> {
    root.descendants()
        .find(|n| n.has_tag_name("photos"))
        .and_then(|n| n.attribute("total"))
        .and_then(|t| t.parse().ok())
}

fn complete_photo(record: &mut ImageRecord) {
    if record.sample.is_empty() {
        record.sample = record.medium.clone();
    }
    if record.file.is_empty() {
        record.file = record.sample.clone();
    }
    record.rating = SafeSearchRating::Safe;
}

fn photo_web_url(record: &ImageRecord) -> String {
    format!("https://www.flickr.com/photos/{}/{}", record.owner, record.id)
}

pub struct Flickr;

impl SiteApi for Flickr {
    const API_TYPE: ApiType = ApiType::Flickr;
    const AUTHENTICATION: AuthenticationType = AuthenticationType::Required;
    const ROOT_TAG: &'static str = "rsp";
    const RECORD_TAG: &'static str = "photo";
    const ENCODING: RecordEncoding = RecordEncoding::Attributes;
    const FIELDS: &'static [(&'static str, Field)] = PHOTO_FIELDS;
    const DATE_FORMATS: &'static [DateFormat] = &[DateFormat::UnixSeconds];

    fn search_url(settings: &Settings, tags: &str, page: u32) -> String {
        let method = if tags.is_empty() {
            "flickr.photos.getRecent"
        } else {
            "flickr.photos.search"
        };

        rest_url(
            &settings.endpoint,
            &search_params(settings, method, tags, page),
        )
    }

    fn web_url(_settings: &Settings, record: &ImageRecord) -> String {
        photo_web_url(record)
    }

    fn complete(record: &mut ImageRecord) {
        complete_photo(record);
    }

    fn validate(root: Node) -> Result<(), ExtractorError> {
        validate_rsp(root)
    }

    fn total_count(root: Node) -> Option<u64> {
        photos_total(root)
    }
}

pub struct FlickrUser;

impl SiteApi for FlickrUser {
    const API_TYPE: ApiType = ApiType::FlickrUser;
    const AUTHENTICATION: AuthenticationType = AuthenticationType::Required;
    const ROOT_TAG: &'static str = "rsp";
    const RECORD_TAG: &'static str = "photo";
    const ENCODING: RecordEncoding = RecordEncoding::Attributes;
    const FIELDS: &'static [(&'static str, Field)] = PHOTO_FIELDS;
    const DATE_FORMATS: &'static [DateFormat] = &[DateFormat::UnixSeconds];

    fn search_url(settings: &Settings, tags: &str, page: u32) -> String {
        let Some(user_id) = flickr_user_id(&settings.endpoint) else {
            debug!(
                "{} is not a Flickr user page, searching all photos",
                settings.endpoint
            );
            let method = if tags.is_empty() {
                "flickr.photos.getRecent"
            } else {
                "flickr.photos.search"
            };
            return rest_url(
                FLICKR_API_ENDPOINT,
                &search_params(settings, method, tags, page),
            );
        };

        let method = if tags.is_empty() {
            "flickr.people.getPhotos"
        } else {
            "flickr.photos.search"
        };

        let mut params = search_params(settings, method, tags, page);
        params.insert(1, ("user_id", user_id.to_string()));

        rest_url(FLICKR_API_ENDPOINT, &params)
    }

    fn web_url(_settings: &Settings, record: &ImageRecord) -> String {
        photo_web_url(record)
    }

    fn complete(record: &mut ImageRecord) {
        complete_photo(record);
    }

    fn validate(root: Node) -> Result<(), ExtractorError> {
        validate_rsp(root)
    }

    fn total_count(root: Node) -> Option<u64> {
        photos_total(root)
    }
}
