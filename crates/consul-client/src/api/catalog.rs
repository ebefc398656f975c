//! Catalog API.

use std::collections::HashMap;

use crate::client::ConsulClient;
use crate::error::Result;
use crate::options::{BlockingOptions, FilterOptions, ServiceOptions};
use crate::request::{escape_segment, RequestOptions};
use crate::types::{
    CatalogDeregistration, CatalogNode, CatalogNodeServiceList, CatalogRegistration,
    CatalogService, GatewayService, Node,
};

/// Catalog API client.
///
/// Reads propagate failures. Registration and deregistration return a
/// boolean.
pub struct CatalogApi {
    client: ConsulClient,
}

impl CatalogApi {
    pub(crate) fn new(client: ConsulClient) -> Self {
        Self { client }
    }

    /// Register a node, service or check directly in the catalog.
    pub async fn register(&self, registration: &CatalogRegistration) -> bool {
        let result = self
            .client
            .put_json("catalog/register", registration, RequestOptions::new())
            .await;
        self.client.succeeded("catalog.register", result)
    }

    /// Remove a node, service or check from the catalog.
    pub async fn deregister(&self, deregistration: &CatalogDeregistration) -> bool {
        let result = self
            .client
            .put_json("catalog/deregister", deregistration, RequestOptions::new())
            .await;
        self.client.succeeded("catalog.deregister", result)
    }

    /// Known datacenters, nearest first.
    pub async fn datacenters(&self) -> Result<Vec<String>> {
        self.client
            .get("catalog/datacenters", RequestOptions::new())
            .await?
            .into_typed()
    }

    /// Nodes in the datacenter.
    pub async fn nodes(&self, opts: &FilterOptions) -> Result<Vec<Node>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client.get("catalog/nodes", req).await?.into_typed()
    }

    /// Service names and their tags.
    pub async fn services(&self, opts: &FilterOptions) -> Result<HashMap<String, Vec<String>>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client.get("catalog/services", req).await?.into_typed()
    }

    /// Instances of a service.
    pub async fn service(&self, service: &str, opts: &ServiceOptions) -> Result<Vec<CatalogService>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client
            .get(&format!("catalog/service/{}", escape_segment(service)), req)
            .await?
            .into_typed()
    }

    /// Connect-capable instances of a service.
    pub async fn connect(&self, service: &str, opts: &ServiceOptions) -> Result<Vec<CatalogService>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client
            .get(&format!("catalog/connect/{}", escape_segment(service)), req)
            .await?
            .into_typed()
    }

    /// A node and its services keyed by instance ID; `None` for an unknown
    /// node.
    pub async fn node(&self, node: &str, opts: &FilterOptions) -> Result<Option<CatalogNode>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client
            .get(&format!("catalog/node/{}", escape_segment(node)), req)
            .await?
            .into_typed()
    }

    /// A node and its services as a list; `None` for an unknown node.
    pub async fn node_services(
        &self,
        node: &str,
        opts: &FilterOptions,
    ) -> Result<Option<CatalogNodeServiceList>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client
            .get(&format!("catalog/node-services/{}", escape_segment(node)), req)
            .await?
            .into_typed()
    }

    /// Services linked to a gateway.
    pub async fn gateway_services(
        &self,
        gateway: &str,
        opts: &BlockingOptions,
    ) -> Result<Vec<GatewayService>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client
            .get(
                &format!("catalog/gateway-services/{}", escape_segment(gateway)),
                req,
            )
            .await?
            .into_typed()
    }
}
