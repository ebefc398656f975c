//! Prepared query API.

use serde_json::Value;

use crate::client::ConsulClient;
use crate::error::Result;
use crate::options::{BlockingOptions, QueryOptions};
use crate::request::{escape_segment, RequestOptions};
use crate::types::{CreatedId, PreparedQuery, QueryExecuteResponse};

/// Options for executing a prepared query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryExecuteOptions {
    /// Blocking query settings.
    pub base: BlockingOptions,
    /// Sort results by distance from this node; `_agent` for the local agent
    /// (`near`).
    pub near: Option<String>,
    /// Maximum number of nodes returned (`limit`).
    pub limit: Option<u32>,
}

/// Prepared query API client.
pub struct QueryApi {
    client: ConsulClient,
}

impl QueryApi {
    pub(crate) fn new(client: ConsulClient) -> Self {
        Self { client }
    }

    /// Create a prepared query.
    pub async fn create(&self, query: &PreparedQuery, opts: &QueryOptions) -> Result<CreatedId> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client.post_json("query", query, req).await?.into_typed()
    }

    /// Replace an existing prepared query.
    pub async fn update(&self, id: &str, query: &PreparedQuery, opts: &QueryOptions) -> bool {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        let result = self
            .client
            .put_json(&format!("query/{}", escape_segment(id)), query, req)
            .await;
        self.client.succeeded("query.update", result)
    }

    /// All prepared queries.
    pub async fn list(&self, opts: &BlockingOptions) -> Result<Vec<PreparedQuery>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        let queries: Option<Vec<PreparedQuery>> =
            self.client.get("query", req).await?.into_typed()?;
        Ok(queries.unwrap_or_default())
    }

    /// Look up one prepared query. Unknown queries and failures yield `None`.
    pub async fn get(&self, id: &str, opts: &BlockingOptions) -> Option<PreparedQuery> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        let result = match self
            .client
            .get(&format!("query/{}", escape_segment(id)), req)
            .await
        {
            Ok(decoded) => decoded.into_single(),
            Err(err) => Err(err),
        };
        self.client.or_none("query.get", result)
    }

    /// Delete a prepared query.
    pub async fn delete(&self, id: &str, opts: &QueryOptions) -> bool {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        let result = self
            .client
            .delete(&format!("query/{}", escape_segment(id)), None, req)
            .await;
        self.client.succeeded("query.delete", result)
    }

    /// Execute a prepared query by ID or name.
    pub async fn execute(
        &self,
        id_or_name: &str,
        opts: &QueryExecuteOptions,
    ) -> Result<QueryExecuteResponse> {
        let mut req = RequestOptions::new();
        opts.base.apply(&mut req);
        req.query
            .set_opt("near", opts.near.as_deref())
            .set_opt("limit", opts.limit);
        self.client
            .get(&format!("query/{}/execute", escape_segment(id_or_name)), req)
            .await?
            .into_typed()
    }

    /// Show how a query template would be rendered for a name.
    pub async fn explain(&self, id_or_name: &str, opts: &QueryOptions) -> Result<Value> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client
            .get(&format!("query/{}/explain", escape_segment(id_or_name)), req)
            .await?
            .into_typed()
    }
}
