use reqwest::{Method, StatusCode};
use std::future::Future;

/// A fully built request, ready to hand to a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status line plus the body, which may still fail to read after the
/// headers have arrived.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Result<String, TransportFailure>,
}

/// The exchange failed, either before a response came back or while its
/// body was being read.
#[derive(Debug, Clone)]
pub struct TransportFailure {
    pub message: String,
    /// DNS or connection failure: the server could not be reached at all.
    pub unreachable: bool,
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        Self {
            unreachable: err.is_connect(),
            message: err.to_string(),
        }
    }
}

/// Sends one request and returns the raw response.
///
/// Production uses [`ReqwestTransport`]; tests use
/// [`MockTransport`](crate::testing::MockTransport).
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportFailure>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportFailure> {
        let mut builder = self.http_client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await.map_err(TransportFailure::from);

        Ok(HttpResponse { status, body })
    }
}
