//! Network coordinate API.

use crate::client::ConsulClient;
use crate::error::Result;
use crate::options::BlockingOptions;
use crate::request::{escape_segment, RequestOptions};
use crate::types::{DatacenterCoordinates, NodeCoordinate};

/// Network coordinate API client.
pub struct CoordinateApi {
    client: ConsulClient,
}

impl CoordinateApi {
    pub(crate) fn new(client: ConsulClient) -> Self {
        Self { client }
    }

    /// WAN coordinates of the servers in every datacenter.
    pub async fn datacenters(&self) -> Result<Vec<DatacenterCoordinates>> {
        self.client
            .get("coordinate/datacenters", RequestOptions::new())
            .await?
            .into_typed()
    }

    /// LAN coordinates of every node.
    pub async fn nodes(&self, opts: &BlockingOptions) -> Result<Vec<NodeCoordinate>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client.get("coordinate/nodes", req).await?.into_typed()
    }

    /// LAN coordinate of one node. Unknown nodes and failures yield `None`.
    pub async fn node(&self, node: &str, opts: &BlockingOptions) -> Option<NodeCoordinate> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        let result = match self
            .client
            .get(&format!("coordinate/node/{}", escape_segment(node)), req)
            .await
        {
            Ok(decoded) => decoded.into_single(),
            Err(err) => Err(err),
        };
        self.client.or_none("coordinate.node", result)
    }
}
