use std::io;

use thiserror::Error;

use crate::transport::TransportError;

/// Enumerates everything that can go wrong while fetching and mapping one page of results.
///
/// Never returned by a [`SearchClient`](crate::client::SearchClient) directly: it is wrapped into
/// the opaque [`SearchError`] so callers can't depend on backend-specific failures.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The transport failed to complete the request (connection, TLS, timeout).
    #[error("Connection Error")]
    ConnectionError(#[from] TransportError),

    /// The imageboard answered with a non-2xx status code.
    #[error("Imageboard returned HTTP status {status}")]
    HttpStatus { status: u16 },

    /// The response body is not well-formed XML.
    #[error("Error while parsing XML: {source}")]
    XmlParseFail {
        #[from]
        source: roxmltree::Error,
    },

    /// The imageboard returned an empty body.
    #[error("Imageboard returned an empty response")]
    EmptyResponse,

    /// The response is XML, but not shaped like a post list of the selected backend.
    #[error("Imageboard returned an invalid response")]
    InvalidServerResponse,

    /// The configured endpoint can't be turned into a request URL.
    #[error("Invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },
}

/// The one error reported by every [`SearchClient`](crate::client::SearchClient).
///
/// Network and parsing failures look the same from the outside. The underlying cause is
/// still available through [`std::error::Error::source`] for logging.
#[derive(Error, Debug)]
#[error("Search request failed")]
pub struct SearchError {
    #[from]
    source: ExtractorError,
}

/// Result codes of the [service detection](crate::detection) protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    /// The URL has no scheme or no host. Detected before any request is sent.
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Every scheme and backend combination was tried without success.
    #[error("No supported API found at {url}")]
    NoApiFound { url: String },
}

/// Errors while reading service configuration or decoding stored values.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file. error: {source}")]
    ConfigIOError {
        #[from]
        source: io::Error,
    },

    #[error("Failed to parse services config: {source}")]
    TomlDecodeFail {
        #[from]
        source: toml::de::Error,
    },

    #[error("Unknown API type: {name}")]
    UnknownApiType { name: String },

    #[error("Failed to encode or decode binary data: {source}")]
    BinaryCodecFail {
        #[from]
        source: bincode::Error,
    },
}
