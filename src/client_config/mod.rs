//! Serializable description of a search client.
//! # Settings
//!
//! A [`Settings`] record holds everything needed to recreate a [`SearchClient`]: the backend's
//! [`ApiType`], a display name, the API endpoint and optional credentials. It's the only value
//! meant to cross process boundaries or be persisted, so its layout is kept stable.
//!
//! Well-known services are available in [`DEFAULT_SERVICES`]. More can be loaded from a TOML
//! file with [`serialize::read_services_file`].
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use crate::client::SearchClient;
use crate::error::ConfigError;
use crate::imageboards::prelude::*;
use crate::settings;
use crate::transport::{HttpTransport, ReqwestTransport, TransportError};

pub mod macros;
pub mod serialize;

/// Supported backend APIs.
///
/// The declaration order is the serialized ordinal and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApiType {
    /// Danbooru 2.x
    Danbooru,
    /// Danbooru 1.x and forks (Moebooru)
    DanbooruLegacy,
    Gelbooru,
    /// Shimmie2, through its Danbooru-compatible API extension
    Shimmie,
    E621,
    Flickr,
    /// Photos of a single Flickr user
    FlickrUser,
}

impl ApiType {
    pub const ALL: [Self; 7] = [
        Self::Danbooru,
        Self::DanbooruLegacy,
        Self::Gelbooru,
        Self::Shimmie,
        Self::E621,
        Self::Flickr,
        Self::FlickrUser,
    ];

    /// Path appended to a base URL to check whether this API is served there.
    ///
    /// `None` for backends that are only recognized by host name.
    pub const fn probe_path(self) -> Option<&'static str> {
        match self {
            Self::Danbooru => Some("/posts.xml"),
            Self::DanbooruLegacy => Some("/post/index.xml"),
            Self::Gelbooru => Some("/index.php?page=dapi&s=post&q=index"),
            Self::Shimmie => Some("/api/danbooru/find_posts/index.xml"),
            Self::E621 | Self::Flickr | Self::FlickrUser => None,
        }
    }
}

impl Display for ApiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Danbooru => write!(f, "danbooru"),
            Self::DanbooruLegacy => write!(f, "danbooru_legacy"),
            Self::Gelbooru => write!(f, "gelbooru"),
            Self::Shimmie => write!(f, "shimmie"),
            Self::E621 => write!(f, "e621"),
            Self::Flickr => write!(f, "flickr"),
            Self::FlickrUser => write!(f, "flickr_user"),
        }
    }
}

impl FromStr for ApiType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "danbooru" => Ok(Self::Danbooru),
            "danbooru_legacy" | "moebooru" => Ok(Self::DanbooruLegacy),
            "gelbooru" => Ok(Self::Gelbooru),
            "shimmie" => Ok(Self::Shimmie),
            "e621" => Ok(Self::E621),
            "flickr" => Ok(Self::Flickr),
            "flickr_user" => Ok(Self::FlickrUser),
            _ => Err(ConfigError::UnknownApiType {
                name: s.to_string(),
            }),
        }
    }
}

pub static DEFAULT_SERVICES: Lazy<HashMap<String, Settings>> = Lazy::new(|| {
    let mut hmap = HashMap::with_capacity(7);
    hmap.insert(
        "danbooru".to_string(),
        settings!(ApiType::Danbooru, "Danbooru", "https://danbooru.donmai.us"),
    );
    hmap.insert(
        "safebooru".to_string(),
        settings!(ApiType::Danbooru, "Safebooru", "https://safebooru.donmai.us"),
    );
    hmap.insert(
        "gelbooru".to_string(),
        settings!(ApiType::Gelbooru, "Gelbooru", "https://gelbooru.com"),
    );
    hmap.insert(
        "yandere".to_string(),
        settings!(ApiType::DanbooruLegacy, "yande.re", "https://yande.re"),
    );
    hmap.insert(
        "konachan".to_string(),
        settings!(ApiType::DanbooruLegacy, "Konachan", "https://konachan.com"),
    );
    hmap.insert(
        "e621".to_string(),
        settings!(ApiType::E621, "e621", "https://e621.net"),
    );
    hmap.insert(
        "flickr".to_string(),
        settings!(ApiType::Flickr, "Flickr", FLICKR_API_ENDPOINT),
    );
    hmap
});

/// Everything needed to recreate a search client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Settings {
    pub api_type: ApiType,
    /// Human-readable service name.
    pub name: String,
    /// Base URL of the API, without a trailing slash.
    pub endpoint: String,
    pub username: Option<String>,
    /// Password, API key or access token, depending on the backend.
    pub password: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        settings!(ApiType::Danbooru, "Danbooru", "https://danbooru.donmai.us")
    }
}

impl Display for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}: {})", self.name, self.api_type, self.endpoint)
    }
}

impl Settings {
    pub fn new(api_type: ApiType, name: &str, endpoint: &str) -> Self {
        settings!(api_type, name, endpoint.trim_end_matches('/'))
    }

    #[must_use]
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.username = Some(username.to_string());
        self.password = Some(password.to_string());
        self
    }

    /// Both credentials, when both are set and non-empty.
    pub(crate) fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some((u, p)),
            _ => None,
        }
    }

    /// Builds the search client described by these settings.
    pub fn create_search_client(
        &self,
        transport: Arc<dyn HttpTransport>,
    ) -> Arc<dyn SearchClient> {
        match self.api_type {
            ApiType::Danbooru => Arc::new(BooruClient::<Danbooru>::new(self.clone(), transport)),
            ApiType::DanbooruLegacy => {
                Arc::new(BooruClient::<DanbooruLegacy>::new(self.clone(), transport))
            }
            ApiType::Gelbooru => Arc::new(BooruClient::<Gelbooru>::new(self.clone(), transport)),
            ApiType::Shimmie => Arc::new(BooruClient::<Shimmie>::new(self.clone(), transport)),
            ApiType::E621 => Arc::new(BooruClient::<E621>::new(self.clone(), transport)),
            ApiType::Flickr => Arc::new(BooruClient::<Flickr>::new(self.clone(), transport)),
            ApiType::FlickrUser => {
                Arc::new(BooruClient::<FlickrUser>::new(self.clone(), transport))
            }
        }
    }

    /// Same as [`create_search_client`](Self::create_search_client), with a new
    /// [`ReqwestTransport`].
    pub fn connect(&self) -> Result<Arc<dyn SearchClient>, TransportError> {
        let transport = ReqwestTransport::new()?;
        Ok(self.create_search_client(Arc::new(transport)))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
