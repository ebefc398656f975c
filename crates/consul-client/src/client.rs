//! Main client implementation.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Method;
use url::Url;

use crate::api::{
    AgentApi, CatalogApi, CoordinateApi, EventApi, HealthApi, KvApi, QueryApi, SessionApi,
    SnapshotApi, StatusApi, TxnApi,
};
use crate::config::{header_name, header_value, ClientConfig};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::{Error, Result, UNKNOWN_ERROR_BODY};
use crate::request::{decode_body, has_dot_segment, Body, Decoded, QueryParams, RequestOptions};
use crate::transport::{HttpTransport, ReqwestTransport, TransportRequest};

/// Consul HTTP API client.
///
/// Cloning is cheap; all clones share the same configuration, transport and
/// diagnostic sink.
///
/// # Example
///
/// ```no_run
/// use consul_client::ConsulClient;
///
/// # async fn example() -> consul_client::Result<()> {
/// let client = ConsulClient::builder()
///     .host("10.0.0.5")
///     .token("secret")
///     .build()?;
///
/// let leader = client.status().leader().await?;
/// println!("leader: {leader}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ConsulClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
struct ClientInner {
    /// Network-call function.
    transport: Arc<dyn HttpTransport>,
    /// Base URL ending in `/v1/`.
    base_url: Url,
    /// Headers sent with every request.
    headers: HeaderMap,
    /// Query parameters sent with every request (`dc`, `ns`, `partition`).
    query: QueryParams,
    /// Receives failures swallowed by endpoint methods.
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for ConsulClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsulClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ConsulClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the local agent on `localhost:8500`.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client from the `CONSUL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env()?.build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the agent API.
    pub fn agent(&self) -> AgentApi {
        AgentApi::new(self.clone())
    }

    /// Access the catalog API.
    pub fn catalog(&self) -> CatalogApi {
        CatalogApi::new(self.clone())
    }

    /// Access the health API.
    pub fn health(&self) -> HealthApi {
        HealthApi::new(self.clone())
    }

    /// Access the key/value store API.
    pub fn kv(&self) -> KvApi {
        KvApi::new(self.clone())
    }

    /// Access the session API.
    pub fn session(&self) -> SessionApi {
        SessionApi::new(self.clone())
    }

    /// Access the user event API.
    pub fn event(&self) -> EventApi {
        EventApi::new(self.clone())
    }

    /// Access the status API.
    pub fn status(&self) -> StatusApi {
        StatusApi::new(self.clone())
    }

    /// Access the network coordinate API.
    pub fn coordinate(&self) -> CoordinateApi {
        CoordinateApi::new(self.clone())
    }

    /// Access the prepared query API.
    pub fn query(&self) -> QueryApi {
        QueryApi::new(self.clone())
    }

    /// Access the transaction API.
    pub fn txn(&self) -> TxnApi {
        TxnApi::new(self.clone())
    }

    /// Access the snapshot API.
    pub fn snapshot(&self) -> SnapshotApi {
        SnapshotApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Make a GET request.
    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<Decoded> {
        self.request(Method::GET, path, None, options).await
    }

    /// Make a POST request.
    pub async fn post(
        &self,
        path: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> Result<Decoded> {
        self.request(Method::POST, path, body, options).await
    }

    /// Make a PUT request.
    pub async fn put(
        &self,
        path: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> Result<Decoded> {
        self.request(Method::PUT, path, body, options).await
    }

    /// Make a DELETE request.
    pub async fn delete(
        &self,
        path: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> Result<Decoded> {
        self.request(Method::DELETE, path, body, options).await
    }

    /// Make a PUT request with a JSON body.
    pub(crate) async fn put_json<B>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Decoded>
    where
        B: serde::Serialize + ?Sized,
    {
        let body = Body::json(body)?;
        self.put(path, Some(body), options).await
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post_json<B>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Decoded>
    where
        B: serde::Serialize + ?Sized,
    {
        let body = Body::json(body)?;
        self.post(path, Some(body), options).await
    }

    /// Build the full URL for a path.
    ///
    /// Relative paths resolve under `/v1/`; absolute `http(s)://` URLs are
    /// used as given. Default and per-call query parameters are appended,
    /// per-call values winning.
    pub fn url(&self, path: &str, query: &QueryParams) -> Result<Url> {
        let mut url = if path.starts_with("http://") || path.starts_with("https://") {
            Url::parse(path)?
        } else {
            let path = path.trim_start_matches('/');
            if has_dot_segment(path) {
                return Err(Error::InvalidPath(path.to_string()));
            }
            self.inner.base_url.join(path)?
        };

        let mut merged = self.inner.query.clone();
        merged.merge(query);
        merged.append_to(&mut url);
        Ok(url)
    }

    /// Perform one request and decode the response.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Body>,
        options: RequestOptions,
    ) -> Result<Decoded> {
        let url = self.url(path, &options.query)?;

        let mut headers = self.inner.headers.clone();
        for (name, value) in &options.headers {
            headers.insert(header_name(name)?, header_value(name, value)?);
        }

        let body = match body {
            Some(body) => {
                if !headers.contains_key(CONTENT_TYPE) {
                    headers.insert(
                        CONTENT_TYPE,
                        header_value("content-type", body.default_content_type())?,
                    );
                }
                Some(body.into_bytes()?)
            }
            None => None,
        };

        tracing::debug!(%method, %url, "Sending Consul request");

        let response = self
            .inner
            .transport
            .send(TransportRequest {
                method,
                url,
                headers,
                body,
            })
            .await?;

        let status = response.status;
        if !status.is_success() {
            let body = match response.body {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(_) => UNKNOWN_ERROR_BODY.to_string(),
            };
            tracing::debug!(status = status.as_u16(), "Consul request returned an error status");
            return Err(Error::HttpRequest {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body,
            });
        }

        let bytes = response.body.map_err(Error::transport)?;
        decode_body(options.response, &response.headers, bytes)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Failure-swallowing conventions
    // ─────────────────────────────────────────────────────────────────────────

    /// Hand a swallowed failure to the diagnostic sink.
    pub(crate) fn report(&self, operation: &str, error: &Error) {
        self.inner.diagnostics.swallowed(operation, error);
    }

    /// Boolean convention: `true` on success, `false` (and a report) on any
    /// failure.
    pub(crate) fn succeeded<T>(&self, operation: &str, result: Result<T>) -> bool {
        match result {
            Ok(_) => true,
            Err(err) => {
                self.report(operation, &err);
                false
            }
        }
    }

    /// Lookup convention: failures become `None`.
    pub(crate) fn or_none<T>(&self, operation: &str, result: Result<Option<T>>) -> Option<T> {
        result.unwrap_or_else(|err| {
            self.report(operation, &err);
            None
        })
    }

    /// Listing convention: failures become an empty list.
    pub(crate) fn or_empty<T>(&self, operation: &str, result: Result<Vec<T>>) -> Vec<T> {
        result.unwrap_or_else(|err| {
            self.report(operation, &err);
            Vec::new()
        })
    }
}

/// Builder for creating a [`ConsulClient`].
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config", &self.config)
            .field("custom_transport", &self.transport.is_some())
            .field("custom_diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            transport: None,
            diagnostics: None,
        }
    }

    /// Create a builder seeded from the `CONSUL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new().config(ClientConfig::from_env()?))
    }

    /// Replace the whole connection configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the agent host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the agent port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Use `https`.
    pub fn secure(mut self, secure: bool) -> Self {
        self.config.secure = secure;
        self
    }

    /// Set the ACL token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Set the default datacenter.
    pub fn datacenter(mut self, dc: impl Into<String>) -> Self {
        self.config.datacenter = Some(dc.into());
        self
    }

    /// Set the default namespace.
    pub fn namespace(mut self, ns: impl Into<String>) -> Self {
        self.config.namespace = Some(ns.into());
        self
    }

    /// Set the default admin partition.
    pub fn partition(mut self, partition: impl Into<String>) -> Self {
        self.config.partition = Some(partition.into());
        self
    }

    /// Add a header sent on every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(name.into(), value.into());
        self
    }

    /// Use a custom network-call function.
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use a shared network-call function.
    pub fn shared_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom sink for swallowed failures.
    pub fn diagnostics(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.diagnostics = Some(Arc::new(sink));
        self
    }

    /// Use a shared sink for swallowed failures.
    pub fn shared_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ConsulClient> {
        let base_url = self.config.base_url()?;
        let headers = self.config.default_headers()?;
        let query = self.config.default_query();

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()),
        };
        let diagnostics: Arc<dyn DiagnosticSink> = match self.diagnostics {
            Some(sink) => sink,
            None => Arc::new(TracingSink),
        };

        Ok(ConsulClient {
            inner: Arc::new(ClientInner {
                transport,
                base_url,
                headers,
                query,
                diagnostics,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
