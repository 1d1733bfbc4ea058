pub use crate::client::caps::{AsyncSearch, SearchHandle};
pub use crate::client::{AuthenticationType, SearchClient};

pub use crate::client_config::serialize::{read_services_file, read_services_toml};
pub use crate::client_config::{ApiType, Settings, DEFAULT_SERVICES};

pub use crate::detection::{DetectedService, ServiceDetector};

pub use crate::error::{ConfigError, DetectionError, SearchError};

pub use crate::image::rating::SafeSearchRating;
pub use crate::image::tags::{Tag, TagType};
pub use crate::image::Image;

pub use crate::search_result::SearchResult;

pub use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
