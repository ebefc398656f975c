//! Session API.

use crate::client::ConsulClient;
use crate::error::Result;
use crate::options::{BlockingOptions, QueryOptions};
use crate::request::{escape_segment, RequestOptions};
use crate::types::{CreatedId, SessionEntry, SessionRequest};

/// Session API client.
pub struct SessionApi {
    client: ConsulClient,
}

impl SessionApi {
    pub(crate) fn new(client: ConsulClient) -> Self {
        Self { client }
    }

    /// Create a session and return its ID.
    pub async fn create(&self, request: &SessionRequest, opts: &QueryOptions) -> Result<String> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        let created: CreatedId = self
            .client
            .put_json("session/create", request, req)
            .await?
            .into_typed()?;
        Ok(created.id)
    }

    /// Destroy a session, releasing or deleting its locks.
    pub async fn destroy(&self, id: &str, opts: &QueryOptions) -> bool {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        let result = self
            .client
            .put(&format!("session/destroy/{}", escape_segment(id)), None, req)
            .await;
        self.client.succeeded("session.destroy", result)
    }

    /// Look up a session. Unknown sessions and failures yield `None`.
    pub async fn info(&self, id: &str, opts: &BlockingOptions) -> Option<SessionEntry> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        let result = match self
            .client
            .get(&format!("session/info/{}", escape_segment(id)), req)
            .await
        {
            Ok(decoded) => decoded.into_single(),
            Err(err) => Err(err),
        };
        self.client.or_none("session.info", result)
    }

    /// Sessions bound to a node.
    pub async fn node(&self, node: &str, opts: &BlockingOptions) -> Result<Vec<SessionEntry>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        let sessions: Option<Vec<SessionEntry>> = self
            .client
            .get(&format!("session/node/{}", escape_segment(node)), req)
            .await?
            .into_typed()?;
        Ok(sessions.unwrap_or_default())
    }

    /// All sessions in the datacenter.
    pub async fn list(&self, opts: &BlockingOptions) -> Result<Vec<SessionEntry>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        let sessions: Option<Vec<SessionEntry>> =
            self.client.get("session/list", req).await?.into_typed()?;
        Ok(sessions.unwrap_or_default())
    }

    /// Renew a TTL session. Unknown sessions and failures yield `None`.
    pub async fn renew(&self, id: &str, opts: &QueryOptions) -> Option<SessionEntry> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        let result = match self
            .client
            .put(&format!("session/renew/{}", escape_segment(id)), None, req)
            .await
        {
            Ok(decoded) => decoded.into_single(),
            Err(err) => Err(err),
        };
        self.client.or_none("session.renew", result)
    }
}
