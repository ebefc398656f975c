//! Pluggable network-call abstraction.
//!
//! Every request the client makes goes through an [`HttpTransport`]. The
//! default is [`ReqwestTransport`]; tests and environments with special needs
//! (proxies, instrumentation, retry wrappers) substitute their own.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::error::{Error, Result};

/// A fully assembled request, ready to be sent.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP verb.
    pub method: Method,
    /// Absolute URL including the query string.
    pub url: Url,
    /// Merged default and per-call headers.
    pub headers: HeaderMap,
    /// Encoded body, if any.
    pub body: Option<Vec<u8>>,
}

/// A response as returned by a transport.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body, or the reason it could not be read.
    pub body: std::result::Result<Vec<u8>, String>,
}

impl TransportResponse {
    /// Build a response with a fully read body.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: Ok(body.into()),
        }
    }
}

/// Performs a single HTTP round trip.
///
/// Implementations must not retry or reinterpret status codes; the client
/// classifies the response itself. Network-level failures should be returned
/// as [`Error::Transport`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and return the raw response.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Default transport backed by [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured `reqwest` client (timeouts, proxies, TLS roots).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(Error::from)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| e.to_string());

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
