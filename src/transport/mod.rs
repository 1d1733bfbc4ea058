//! HTTP transport used by the search clients and the service detector.
//!
//! The library never talks to the network on its own: every request goes through an
//! [`HttpTransport`], injected when a client is created. [`ReqwestTransport`] is the default
//! implementation.
use async_trait::async_trait;
use log::debug;
use reqwest::{redirect, Client};
use std::time::Duration;
use thiserror::Error;

#[cfg(test)]
pub(crate) mod mock;

pub(crate) const DEFAULT_UA: &str = concat!("Rust Imageboard Search/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Query parameters whose values are never logged.
const SECRET_PARAMS: &[&str] = &["api_key", "login", "password", "password_hash"];

#[derive(Error, Debug)]
pub enum TransportError {
    /// Wraps an underlying `reqwest::Error` (DNS, TLS, connection reset, timeout...).
    #[error("Connection Error: {source}")]
    RequestFail {
        #[from]
        source: reqwest::Error,
    },

    /// The host could not be reached. Used by transports that don't wrap `reqwest`.
    #[error("Host unreachable: {url}")]
    Unreachable { url: String },
}

/// A single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    /// HTTP Basic credentials: username and optional password.
    pub basic_auth: Option<(String, Option<String>)>,
    /// When `false`, a 3xx answer is returned as-is instead of being followed.
    pub follow_redirects: bool,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn get(url: &str) -> Self {
        Self {
            url: url.to_string(),
            basic_auth: None,
            follow_redirects: true,
            timeout: None,
        }
    }

    #[must_use]
    pub fn basic_auth(mut self, username: &str, password: Option<&str>) -> Self {
        self.basic_auth = Some((username.to_string(), password.map(str::to_string)));
        self
    }

    #[must_use]
    pub const fn no_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// `true` when the answer came from a different URL than the requested one, or is itself a redirect.
    pub redirected: bool,
    pub body: String,
}

impl HttpResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// GET-capable HTTP client.
///
/// Implementations are shared between clients and tasks, so they must be `Send + Sync`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by `reqwest`.
///
/// Keeps two clients around, since redirect policy is fixed per `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    no_redirect_client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_user_agent(DEFAULT_UA)
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self, TransportError> {
        Self::with_options(user_agent, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Builds a transport with a custom user agent and connection timeout.
    ///
    /// The overall timeout is set per request, see [`HttpRequest::timeout`].
    pub fn with_options(
        user_agent: &str,
        connect_timeout: Duration,
    ) -> Result<Self, TransportError> {
        debug!("Using user-agent: {user_agent}");

        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(connect_timeout)
            .build()?;
        let no_redirect_client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(connect_timeout)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            no_redirect_client,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let client = if request.follow_redirects {
            &self.client
        } else {
            &self.no_redirect_client
        };

        let mut builder = client.get(&request.url);

        if let Some((username, password)) = &request.basic_auth {
            builder = builder.basic_auth(username, password.as_ref());
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(reqwest::Error::without_url)?;

        let status = response.status();
        let redirected = status.is_redirection() || response.url().as_str() != request.url;
        debug!("GET {} -> {status}", redact_url(&request.url));

        let body = response.text().await.map_err(reqwest::Error::without_url)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            redirected,
            body,
        })
    }
}

/// Masks credential values in a URL's query string, for logs and error messages.
pub(crate) fn redact_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let params: Vec<String> = query
        .split('&')
        .map(|param| match param.split_once('=') {
            Some((key, value)) if SECRET_PARAMS.contains(&key) && !value.is_empty() => {
                format!("{key}=***")
            }
            _ => param.to_string(),
        })
        .collect();

    format!("{base}?{}", params.join("&"))
}
