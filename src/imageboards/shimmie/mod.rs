//! Shimmie2, through the Danbooru-compatible API extension (`/api/danbooru/find_posts`).
use crate::client::AuthenticationType;
use crate::client_config::{ApiType, Settings};
use crate::imageboards::common::{Field, ImageRecord, RecordEncoding, PAGE_LIMIT};
use crate::imageboards::dates::DateFormat;
use crate::imageboards::moebooru::{LEGACY_DATE_FORMATS, LEGACY_FIELDS};
use crate::imageboards::{encode_tags, SiteApi};

pub struct Shimmie;

impl SiteApi for Shimmie {
    const API_TYPE: ApiType = ApiType::Shimmie;
    const AUTHENTICATION: AuthenticationType = AuthenticationType::Optional;
    const BASIC_AUTH: bool = true;
    const ENCODING: RecordEncoding = RecordEncoding::Attributes;
    const FIELDS: &'static [(&'static str, Field)] = LEGACY_FIELDS;
    const DATE_FORMATS: &'static [DateFormat] = LEGACY_DATE_FORMATS;

    fn search_url(settings: &Settings, tags: &str, page: u32) -> String {
        format!(
            "{}/api/danbooru/find_posts/index.xml?tags={}&page={page}&limit={PAGE_LIMIT}",
            settings.endpoint,
            encode_tags(tags)
        )
    }

    fn web_url(settings: &Settings, record: &ImageRecord) -> String {
        format!("{}/post/view/{}", settings.endpoint, record.id)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::Shimmie;
    use crate::client_config::{ApiType, Settings};
    use crate::image::rating::SafeSearchRating;
    use crate::imageboards::BooruClient;
    use crate::transport::mock::MockTransport;

    const PAGE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<posts count="3" offset="0">
<post id="1021" md5="9f8e7d6c5b4a39281706f5e4d3c2b1a0" file_name="tree.jpg" file_url="http://shimmie.example.com/_images/9f8e/tree.jpg" height="768" width="1024" preview_url="http://shimmie.example.com/_thumbs/9f8e/thumb.jpg" preview_height="144" preview_width="192" rating="?" date="2015-01-03 12:00:00" is_warehoused="false" tags="tree outdoors" source="" score="0" author="admin"/>
<post id="1020" md5="" file_url="" tags="gone"/>
<post id="1019" file_url="/_images/aaaa/flower.png" tags="flower" rating="e" date="yesterday"/>
</posts>"#;

    fn client() -> BooruClient<Shimmie> {
        BooruClient::new(
            Settings::new(ApiType::Shimmie, "Shimmie", "http://shimmie.example.com/"),
            Arc::new(MockTransport::new()),
        )
    }

    #[test]
    fn search_url_is_percent_encoded() {
        assert_eq!(
            client().search_url("tree rating:s", 1),
            "http://shimmie.example.com/api/danbooru/find_posts/index.xml?tags=tree%20rating%3As&page=2&limit=100"
        );
    }

    #[test]
    fn records_without_file_are_dropped() {
        let result = client().parse(PAGE, "tree", 0).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.total_count(), Some(3));

        let ids: Vec<&str> = result.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1021", "1019"]);

        let positions: Vec<Option<u32>> = result
            .images()
            .iter()
            .map(|i| i.search_page_position)
            .collect();
        assert_eq!(positions, [Some(0), Some(1)]);

        let image = &result.images()[0];
        assert_eq!(image.safe_search_rating, SafeSearchRating::Undefined);
        assert_eq!(image.web_url, "http://shimmie.example.com/post/view/1021");
        assert!(image.created_at.is_some());

        let image = &result.images()[1];
        assert_eq!(image.file_url, "http://shimmie.example.com/_images/aaaa/flower.png");
        assert_eq!(image.created_at, None);
    }
}
