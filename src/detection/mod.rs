//! Detects which API, if any, is served at a given URL.
//! # Service detection
//!
//! [`ServiceDetector::detect`] probes each supported API path on the base URL, one request at a
//! time, and stops at the first one answering `200 OK` without a redirect. Well-known hosts
//! (E621, E926 and Flickr) are recognized by name without any request.
//!
//! Probe order:
//! 1. `https` then `http` for hosts known to support TLS, `http` then `https` otherwise.
//! 2. For each scheme: Danbooru 2.x, Danbooru 1.x, Gelbooru, Shimmie2.
use log::debug;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::client_config::{ApiType, Settings};
use crate::error::DetectionError;
use crate::imageboards::flickr::{flickr_user_id, FLICKR_API_ENDPOINT};
use crate::transport::{HttpRequest, HttpTransport};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Hosts probed over `https` first.
const TLS_HOSTS: &[&str] = &["danbooru.donmai.us", "yande.re", "konachan.com"];

const E621_HOSTS: &[&str] = &["e621.net", "e926.net"];

/// Backends recognized by probing, in priority order.
const PROBED_APIS: [ApiType; 4] = [
    ApiType::Danbooru,
    ApiType::DanbooruLegacy,
    ApiType::Gelbooru,
    ApiType::Shimmie,
];

/// Outcome of a successful detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedService {
    pub api_type: ApiType,
    /// `scheme://host[:port]/path`, without trailing slash.
    pub base_url: String,
}

impl DetectedService {
    /// Settings for a client of the detected service.
    pub fn into_settings(self, name: &str) -> Settings {
        Settings::new(self.api_type, name, &self.base_url)
    }
}

pub struct ServiceDetector {
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
    danbooru_detection: bool,
}

impl ServiceDetector {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            timeout: DEFAULT_PROBE_TIMEOUT,
            danbooru_detection: true,
        }
    }

    /// Timeout of each probe request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Skip the Danbooru 2.x probe.
    #[must_use]
    pub const fn disable_danbooru_detection(mut self) -> Self {
        self.danbooru_detection = false;
        self
    }

    pub async fn detect(&self, url: &str) -> Result<DetectedService, DetectionError> {
        let invalid = || DetectionError::InvalidUrl {
            url: url.to_string(),
        };

        let uri = Url::parse(url.trim()).map_err(|_| invalid())?;

        if !matches!(uri.scheme(), "http" | "https") {
            return Err(invalid());
        }

        let host = uri.host_str().ok_or_else(invalid)?.to_ascii_lowercase();

        if let Some(service) = known_service(&uri, &host) {
            debug!("{host} is a known {} host", service.api_type);
            return Ok(service);
        }

        let authority = match uri.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.clone(),
        };
        let path = uri.path().trim_end_matches('/');

        let schemes = if TLS_HOSTS.contains(&host.as_str()) {
            ["https", "http"]
        } else {
            ["http", "https"]
        };

        for scheme in schemes {
            let base_url = format!("{scheme}://{authority}{path}");

            for api_type in PROBED_APIS {
                if api_type == ApiType::Danbooru && !self.danbooru_detection {
                    continue;
                }

                if self.probe(&base_url, api_type).await {
                    return Ok(DetectedService { api_type, base_url });
                }
            }
        }

        Err(DetectionError::NoApiFound {
            url: url.to_string(),
        })
    }

    async fn probe(&self, base_url: &str, api_type: ApiType) -> bool {
        let Some(path) = api_type.probe_path() else {
            return false;
        };

        let request = HttpRequest::get(&format!("{base_url}{path}"))
            .no_redirects()
            .timeout(self.timeout);
        let probe_url = request.url.clone();

        match self.transport.get(request).await {
            Ok(response) if response.status == 200 && !response.redirected => {
                debug!("Found {api_type} API at {probe_url}");
                true
            }
            Ok(response) => {
                debug!(
                    "Probe {probe_url}: status {}, redirected: {}",
                    response.status, response.redirected
                );
                false
            }
            Err(err) => {
                debug!("Probe {probe_url} failed: {err}");
                false
            }
        }
    }
}

/// Services recognized from the URL alone.
fn known_service(uri: &Url, host: &str) -> Option<DetectedService> {
    if E621_HOSTS.contains(&host) {
        return Some(DetectedService {
            api_type: ApiType::E621,
            base_url: format!("https://{host}"),
        });
    }

    if host == "api.flickr.com" {
        return Some(DetectedService {
            api_type: ApiType::Flickr,
            base_url: FLICKR_API_ENDPOINT.to_string(),
        });
    }

    let url = uri.as_str().trim_end_matches('/');
    flickr_user_id(url).map(|_| DetectedService {
        api_type: ApiType::FlickrUser,
        base_url: url.to_string(),
    })
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::{DetectedService, ServiceDetector};
    use crate::client_config::ApiType;
    use crate::error::DetectionError;
    use crate::imageboards::flickr::FLICKR_API_ENDPOINT;
    use crate::transport::mock::MockTransport;

    fn detector(transport: &Arc<MockTransport>) -> ServiceDetector {
        ServiceDetector::new(transport.clone())
    }

    #[tokio::test]
    async fn legacy_host_stops_after_first_success() {
        let transport = Arc::new(MockTransport::new().route(
            "http://booru.example.com/post/index.xml",
            200,
            "<posts/>",
        ));

        let service = detector(&transport)
            .detect("http://booru.example.com/")
            .await
            .unwrap();

        assert_eq!(
            service,
            DetectedService {
                api_type: ApiType::DanbooruLegacy,
                base_url: "http://booru.example.com".to_string(),
            }
        );
        assert_eq!(
            transport.urls(),
            [
                "http://booru.example.com/posts.xml",
                "http://booru.example.com/post/index.xml"
            ]
        );

        let requests = transport.requests();
        assert!(!requests[0].follow_redirects);
        assert!(requests[0].timeout.is_some());
    }

    #[tokio::test]
    async fn invalid_urls_make_no_requests() {
        let transport = Arc::new(MockTransport::new());

        for url in ["booru.example.com", "", "not a url", "ftp://booru.example.com"] {
            assert_eq!(
                detector(&transport).detect(url).await,
                Err(DetectionError::InvalidUrl {
                    url: url.to_string()
                })
            );
        }

        assert!(transport.urls().is_empty());
    }

    #[tokio::test]
    async fn nothing_found() {
        let transport = Arc::new(
            MockTransport::new()
                .route("http://booru.example.com/posts.xml", 404, "")
                .redirect("https://booru.example.com/post/index.xml"),
        );

        assert!(matches!(
            detector(&transport).detect("http://booru.example.com").await,
            Err(DetectionError::NoApiFound { .. })
        ));

        // Every scheme and API pair, transport failures included.
        assert_eq!(transport.urls().len(), 8);
    }

    #[tokio::test]
    async fn tls_hosts_try_https_first() {
        let transport = Arc::new(MockTransport::new().route(
            "https://yande.re/post/index.xml",
            200,
            "<posts/>",
        ));

        let service = detector(&transport).detect("http://yande.re").await.unwrap();

        assert_eq!(service.base_url, "https://yande.re");
        assert_eq!(transport.urls()[0], "https://yande.re/posts.xml");
    }

    #[tokio::test]
    async fn keeps_port_and_path() {
        let transport = Arc::new(MockTransport::new().route(
            "https://localhost:8080/booru/index.php?page=dapi",
            200,
            "<posts/>",
        ));

        let service = detector(&transport)
            .disable_danbooru_detection()
            .detect("http://localhost:8080/booru/")
            .await
            .unwrap();

        assert_eq!(service.api_type, ApiType::Gelbooru);
        assert_eq!(service.base_url, "https://localhost:8080/booru");
        assert_eq!(transport.urls()[0], "http://localhost:8080/booru/post/index.xml");
    }

    #[tokio::test]
    async fn known_hosts() {
        let transport = Arc::new(MockTransport::new());
        let detector = detector(&transport);

        assert_eq!(
            detector.detect("http://e926.net/post").await.unwrap(),
            DetectedService {
                api_type: ApiType::E621,
                base_url: "https://e926.net".to_string(),
            }
        );
        assert_eq!(
            detector.detect("https://api.flickr.com").await.unwrap().base_url,
            FLICKR_API_ENDPOINT
        );
        assert_eq!(
            detector
                .detect("https://www.flickr.com/photos/someone/")
                .await
                .unwrap(),
            DetectedService {
                api_type: ApiType::FlickrUser,
                base_url: "https://www.flickr.com/photos/someone".to_string(),
            }
        );

        assert!(transport.urls().is_empty());
    }
}
