//! Danbooru 1.x API (`/post/index.xml`), also served by Moebooru forks such as yande.re
//! and Konachan.
//!
//! Posts are `<post>` elements carrying every field as an attribute.
use crate::client::AuthenticationType;
use crate::client_config::{ApiType, Settings};
use crate::image::tags::TagType;
use crate::imageboards::common::{Field, ImageRecord, RecordEncoding, PAGE_LIMIT};
use crate::imageboards::dates::DateFormat;
use crate::imageboards::{encode_tags, SiteApi};

/// Attribute table shared by the Danbooru 1.x family.
pub(crate) const LEGACY_FIELDS: &[(&str, Field)] = &[
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
    ("date", Field::CreatedAt),
];

/// Moebooru uses Unix timestamps, upstream Danbooru 1.x a plain UTC date.
pub(crate) const LEGACY_DATE_FORMATS: &[DateFormat] = &[
    DateFormat::UnixSeconds,
    DateFormat::Naive("%Y-%m-%d %H:%M:%S"),
];

pub struct DanbooruLegacy;

impl SiteApi for DanbooruLegacy {
    const API_TYPE: ApiType = ApiType::DanbooruLegacy;
    const AUTHENTICATION: AuthenticationType = AuthenticationType::Optional;
    const BASIC_AUTH: bool = true;
    const ENCODING: RecordEncoding = RecordEncoding::Attributes;
    const FIELDS: &'static [(&'static str, Field)] = LEGACY_FIELDS;
    const DATE_FORMATS: &'static [DateFormat] = LEGACY_DATE_FORMATS;

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

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::DanbooruLegacy;
    use crate::client::{AuthenticationType, SearchClient};
    use crate::client_config::{ApiType, Settings};
    use crate::image::rating::SafeSearchRating;
    use crate::imageboards::BooruClient;
    use crate::transport::mock::MockTransport;

    const PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<posts count="2" offset="0">
  <post id="313131" tags="landscape sky" created_at="1420286400" creator_id="1" author="someone" change="1" source="" score="12" md5="0f1e2d3c4b5a69788796a5b4c3d2e1f0" file_size="1024" file_url="https://files.yande.re/image/0f1e.jpg" is_shown_in_index="true" preview_url="https://assets.yande.re/data/preview/0f1e.jpg" preview_width="150" preview_height="100" actual_preview_width="300" actual_preview_height="200" sample_url="https://files.yande.re/sample/0f1e.jpg" sample_width="1500" sample_height="1000" sample_file_size="512" jpeg_url="https://files.yande.re/jpeg/0f1e.jpg" jpeg_width="3000" jpeg_height="2000" rating="s" has_children="false" parent_id="" status="active" width="3000" height="2000"/>
  <post id="313130" tags="city" date="2015-01-03 12:00:00" score="x" md5="" file_url="/data/313130.png" preview_url="/data/preview/313130.png" width="800" height="600" rating="Questionable" parent_id="313000"/>
</posts>"#;

    fn settings() -> Settings {
        Settings::new(ApiType::DanbooruLegacy, "yande.re", "https://yande.re")
    }

    #[test]
    fn search_url() {
        let client = BooruClient::<DanbooruLegacy>::new(settings(), Arc::new(MockTransport::new()));

        assert_eq!(
            client.search_url("sky", 0),
            "https://yande.re/post/index.xml?tags=sky&limit=100&page=1"
        );
        assert_eq!(client.requires_authentication(), AuthenticationType::Optional);
    }

    #[test]
    fn parse_page() {
        let client = BooruClient::<DanbooruLegacy>::new(settings(), Arc::new(MockTransport::new()));
        let result = client.parse(PAGE, "", 1).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.total_count(), Some(2));
        assert!(result.query().is_empty());

        let image = &result.images()[0];
        assert_eq!(image.id, "313131");
        assert_eq!(image.file_url, "https://files.yande.re/image/0f1e.jpg");
        assert_eq!((image.width, image.height), (3000, 2000));
        assert_eq!((image.sample_width, image.sample_height), (1500, 1000));
        assert_eq!((image.preview_width, image.preview_height), (150, 100));
        assert_eq!(image.parent_id, None);
        assert_eq!(image.pixiv_id, None);
        assert_eq!(image.score, 12);
        assert_eq!(image.web_url, "https://yande.re/post/show/313131");
        assert_eq!(
            image.created_at,
            Some(Utc.with_ymd_and_hms(2015, 1, 3, 12, 0, 0).unwrap())
        );
        assert_eq!(image.search_page, Some(1));

        let image = &result.images()[1];
        assert_eq!(image.file_url, "https://yande.re/data/313130.png");
        assert_eq!(image.sample_url, image.file_url);
        assert_eq!(image.preview_url, "https://yande.re/data/preview/313130.png");
        assert_eq!(image.safe_search_rating, SafeSearchRating::Questionable);
        assert_eq!(image.parent_id.as_deref(), Some("313000"));
        assert_eq!(image.score, 0);
        assert_eq!(
            image.created_at,
            Some(Utc.with_ymd_and_hms(2015, 1, 3, 12, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn sends_basic_auth() {
        let transport = Arc::new(
            MockTransport::new().route("https://yande.re/post/index.xml", 200, PAGE),
        );
        let client = settings()
            .with_credentials("user", "pass")
            .create_search_client(transport.clone());

        let result = client.search("sky").await.unwrap();
        assert_eq!(result.len(), 2);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].basic_auth,
            Some(("user".to_string(), Some("pass".to_string())))
        );
    }
}
