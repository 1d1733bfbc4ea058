use async_trait::async_trait;
use std::sync::Mutex;

use super::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Scripted in-memory transport.
///
/// Answers from a list of `(url prefix, response)` routes, first match wins. Unmatched URLs
/// fail like an unreachable host. Every request is recorded.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    routes: Vec<(String, HttpResponse)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, prefix: &str, status: u16, body: &str) -> Self {
        self.routes.push((
            prefix.to_string(),
            HttpResponse {
                status,
                redirected: false,
                body: body.to_string(),
            },
        ));
        self
    }

    pub fn redirect(mut self, prefix: &str) -> Self {
        self.routes.push((
            prefix.to_string(),
            HttpResponse {
                status: 301,
                redirected: true,
                body: String::new(),
            },
        ));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        self.routes
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, response)| response.clone())
            .ok_or(TransportError::Unreachable { url })
    }
}
