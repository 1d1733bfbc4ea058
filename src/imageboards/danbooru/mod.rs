//! Danbooru 2.x XML API (`/posts.xml`).
//!
//! Each post is a `<post>` element with one child element per field, named with hyphens.
//! The login and API key are sent with HTTP Basic auth, so they never appear in a URL.
use crate::client::AuthenticationType;
use crate::client_config::{ApiType, Settings};
use crate::image::tags::TagType;
use crate::imageboards::common::{Field, ImageRecord, RecordEncoding, PAGE_LIMIT};
use crate::imageboards::dates::DateFormat;
use crate::imageboards::{encode_tags, SiteApi};

/// The API doesn't return thumbnail sizes.
const THUMBNAIL_SIZE: u32 = 150;
/// The API doesn't return sample sizes.
const SAMPLE_SIZE: u32 = 850;

pub struct Danbooru;

impl SiteApi for Danbooru {
    const API_TYPE: ApiType = ApiType::Danbooru;
    const AUTHENTICATION: AuthenticationType = AuthenticationType::Optional;
    const BASIC_AUTH: bool = true;
    const ENCODING: RecordEncoding = RecordEncoding::ChildElements;
    const FIELDS: &'static [(&'static str, Field)] = &[
        ("large-file-url", Field::FileUrl),
        ("image-width", Field::Width),
        ("image-height", Field::Height),
        ("file-url", Field::SampleUrl),
        ("preview-file-url", Field::PreviewUrl),
        ("tag-string-general", Field::Tags(TagType::General)),
        ("tag-string-artist", Field::Tags(TagType::Artist)),
        ("tag-string-character", Field::Tags(TagType::Character)),
        ("tag-string-copyright", Field::Tags(TagType::Copyright)),
        ("id", Field::Id),
        ("parent-id", Field::ParentId),
        ("pixiv-id", Field::PixivId),
        ("rating", Field::Rating),
        ("score", Field::Score),
        ("source", Field::Source),
        ("md5", Field::Md5),
        ("created-at", Field::CreatedAt),
    ];
    const DATE_FORMATS: &'static [DateFormat] = &[
        DateFormat::Rfc3339,
        DateFormat::WithOffset("%Y-%m-%dT%H:%M:%S%.f%z"),
    ];

    fn search_url(settings: &Settings, tags: &str, page: u32) -> String {
        format!(
            "{}/posts.xml?tags={}&page={page}&limit={PAGE_LIMIT}",
            settings.endpoint,
            encode_tags(tags)
        )
    }

    fn web_url(settings: &Settings, record: &ImageRecord) -> String {
        format!("{}/posts/{}", settings.endpoint, record.id)
    }

    fn complete(record: &mut ImageRecord) {
        record.preview.width = THUMBNAIL_SIZE;
        record.preview.height = THUMBNAIL_SIZE;
        record.sample.width = SAMPLE_SIZE;
        record.sample.height = SAMPLE_SIZE;
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::Danbooru;
    use crate::client_config::{ApiType, Settings};
    use crate::image::{
        rating::SafeSearchRating,
        tags::{Tag, TagType},
    };
    use crate::imageboards::BooruClient;
    use crate::transport::mock::MockTransport;

    const PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<posts type="array">
  <post>
    <id type="integer">1868516</id>
    <created-at type="datetime">2015-01-03T12:00:00.000-05:00</created-at>
    <score type="integer">4</score>
    <source>http://www.pixiv.net/member_illust.php?mode=medium&amp;illust_id=47940413</source>
    <md5>2aa5f3d4b5e6bb1a7e6c0e8b6a9d27c1</md5>
    <rating>s</rating>
    <image-width type="integer">1200</image-width>
    <image-height type="integer">1600</image-height>
    <parent-id type="integer" nil="true"/>
    <pixiv-id type="integer" nil="true"/>
    <tag-string-general>1girl solo</tag-string-general>
    <tag-string-artist>some_artist</tag-string-artist>
    <tag-string-character>hatsune_miku</tag-string-character>
    <tag-string-copyright>vocaloid</tag-string-copyright>
    <file-url>/data/sample/sample-2aa5f3d4.jpg</file-url>
    <large-file-url>/data/2aa5f3d4.jpg</large-file-url>
    <preview-file-url>/data/preview/2aa5f3d4.jpg</preview-file-url>
  </post>
  <post>
    <id type="integer">1868515</id>
    <created-at type="datetime">not a date</created-at>
    <rating>e</rating>
    <parent-id type="integer">1868500</parent-id>
    <pixiv-id type="integer">47940000</pixiv-id>
    <tag-string-general>gold_only</tag-string-general>
  </post>
  <post>
    <id type="integer">1868514</id>
    <created-at type="datetime">bad</created-at>
    <rating>q</rating>
    <score type="integer">many</score>
    <tag-string-general>cat</tag-string-general>
    <large-file-url>https://cdn.donmai.us/cat.png</large-file-url>
  </post>
</posts>"#;

    fn client(settings: Settings) -> BooruClient<Danbooru> {
        BooruClient::new(settings, Arc::new(MockTransport::new()))
    }

    fn settings() -> Settings {
        Settings::new(ApiType::Danbooru, "Danbooru", "https://danbooru.donmai.us")
    }

    #[test]
    fn search_url() {
        let client = client(settings());

        assert_eq!(
            client.search_url("duck rating:s", 0),
            "https://danbooru.donmai.us/posts.xml?tags=duck%20rating%3As&page=1&limit=100"
        );
        assert_eq!(
            client.search_url("", 2),
            "https://danbooru.donmai.us/posts.xml?tags=&page=3&limit=100"
        );
    }

    #[tokio::test]
    async fn credentials_stay_out_of_the_url() {
        let transport = Arc::new(
            MockTransport::new().route("https://danbooru.donmai.us/posts.xml", 200, PAGE),
        );
        let client = settings()
            .with_credentials("user", "s3cr3t")
            .create_search_client(transport.clone());

        client.search("duck").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].url.contains("user"));
        assert!(!requests[0].url.contains("s3cr3t"));
        assert_eq!(
            requests[0].basic_auth,
            Some(("user".to_string(), Some("s3cr3t".to_string())))
        );
    }

    #[test]
    fn parse_page() {
        let result = client(settings()).parse(PAGE, "1girl", 0).unwrap();

        // The gold-only post has no file URL.
        assert_eq!(result.len(), 2);
        assert!(result.has_next_page());
        assert_eq!(result.query(), [Tag::general("1girl")]);

        let image = &result.images()[0];
        assert_eq!(image.id, "1868516");
        assert_eq!(image.file_url, "https://danbooru.donmai.us/data/2aa5f3d4.jpg");
        assert_eq!(
            image.sample_url,
            "https://danbooru.donmai.us/data/sample/sample-2aa5f3d4.jpg"
        );
        assert_eq!(
            image.preview_url,
            "https://danbooru.donmai.us/data/preview/2aa5f3d4.jpg"
        );
        assert_eq!((image.width, image.height), (1200, 1600));
        assert_eq!((image.preview_width, image.sample_width), (150, 850));
        assert_eq!(image.parent_id, None);
        assert_eq!(image.pixiv_id.as_deref(), Some("47940413"));
        assert_eq!(image.safe_search_rating, SafeSearchRating::Safe);
        assert_eq!(image.score, 4);
        assert_eq!(image.web_url, "https://danbooru.donmai.us/posts/1868516");
        assert_eq!(
            image.created_at,
            Some(Utc.with_ymd_and_hms(2015, 1, 3, 17, 0, 0).unwrap())
        );
        assert!(image.tags.contains(&Tag::new("some_artist", TagType::Artist)));
        assert!(image.tags.contains(&Tag::new("vocaloid", TagType::Copyright)));
        assert_eq!(image.tags.len(), 5);
        assert_eq!((image.search_page, image.search_page_position), (Some(0), Some(0)));

        let image = &result.images()[1];
        assert_eq!(image.id, "1868514");
        assert_eq!(image.created_at, None);
        assert_eq!(image.score, 0);
        assert_eq!(image.sample_url, image.file_url);
        assert_eq!(image.search_page_position, Some(1));
    }

    #[test]
    fn empty_page_is_last() {
        let result = client(settings())
            .parse(r#"<posts type="array"></posts>"#, "", 4)
            .unwrap();

        assert!(result.is_empty());
        assert!(!result.has_next_page());
        assert_eq!(result.current_offset(), 4);
    }
}
