//! Shared test doubles.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use consul_client::{
    ConsulClient, DiagnosticSink, Error, HttpTransport, Result, TransportRequest,
    TransportResponse,
};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;

/// Diagnostic sink that remembers every swallowed failure.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(String, Option<u16>)>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<(String, Option<u16>)> {
        self.events.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn swallowed(&self, operation: &str, error: &Error) {
        self.events
            .lock()
            .unwrap()
            .push((operation.to_string(), error.status()));
    }
}

/// Transport that replays queued responses and records requests.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<TransportResponse>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: Result<TransportResponse>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn push_json(&self, status: u16, body: Value) {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.push(Ok(TransportResponse::new(
            StatusCode::from_u16(status).unwrap(),
            headers,
            serde_json::to_vec(&body).unwrap(),
        )));
    }

    pub fn push_raw(&self, status: u16, body: &[u8]) {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_LENGTH,
            HeaderValue::from_str(&body.len().to_string()).unwrap(),
        );
        self.push(Ok(TransportResponse::new(
            StatusCode::from_u16(status).unwrap(),
            headers,
            body.to_vec(),
        )));
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> TransportRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::transport("no response queued")))
    }
}

/// Client wired to a mock transport and a recording sink.
pub fn mock_client() -> (ConsulClient, Arc<MockTransport>, Arc<RecordingSink>) {
    let transport = Arc::new(MockTransport::new());
    let sink = Arc::new(RecordingSink::default());
    let client = ConsulClient::builder()
        .shared_transport(transport.clone())
        .shared_diagnostics(sink.clone())
        .build()
        .unwrap();
    (client, transport, sink)
}

/// Client pointed at a wiremock server.
pub fn server_client(uri: &str, sink: Arc<RecordingSink>) -> ConsulClient {
    let url = url::Url::parse(uri).unwrap();
    ConsulClient::builder()
        .host(url.host_str().unwrap())
        .port(url.port().unwrap())
        .shared_diagnostics(sink)
        .build()
        .unwrap()
}
