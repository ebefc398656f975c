//! Snapshot API.

use crate::client::ConsulClient;
use crate::error::Result;
use crate::options::QueryOptions;
use crate::request::{Body, RequestOptions, ResponseKind, CONTENT_TYPE_OCTET_STREAM};

/// Snapshot API client.
pub struct SnapshotApi {
    client: ConsulClient,
}

impl SnapshotApi {
    pub(crate) fn new(client: ConsulClient) -> Self {
        Self { client }
    }

    /// Download a point-in-time snapshot of the server state.
    pub async fn save(&self, opts: &QueryOptions) -> Result<Vec<u8>> {
        let mut req = RequestOptions::new().with_response(ResponseKind::Bytes);
        opts.apply(&mut req);
        self.client.get("snapshot", req).await?.into_bytes()
    }

    /// Restore a snapshot previously produced by [`save`](Self::save).
    pub async fn restore(&self, snapshot: Vec<u8>, opts: &QueryOptions) -> bool {
        let mut req = RequestOptions::new().with_header("Content-Type", CONTENT_TYPE_OCTET_STREAM);
        opts.apply(&mut req);
        let result = self
            .client
            .put("snapshot", Some(Body::Bytes(snapshot)), req)
            .await;
        self.client.succeeded("snapshot.restore", result)
    }
}
