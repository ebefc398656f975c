//! Health API.

use crate::client::ConsulClient;
use crate::error::Result;
use crate::options::{FilterOptions, ServiceOptions};
use crate::request::{escape_segment, RequestOptions};
use crate::types::{CheckState, HealthCheck, ServiceEntry};

/// Health API client.
///
/// All methods are reads and propagate failures.
pub struct HealthApi {
    client: ConsulClient,
}

impl HealthApi {
    pub(crate) fn new(client: ConsulClient) -> Self {
        Self { client }
    }

    /// Checks on a node.
    pub async fn node(&self, node: &str, opts: &FilterOptions) -> Result<Vec<HealthCheck>> {
        self.list(&format!("health/node/{}", escape_segment(node)), opts).await
    }

    /// Checks bound to a service.
    pub async fn checks(&self, service: &str, opts: &FilterOptions) -> Result<Vec<HealthCheck>> {
        self.list(&format!("health/checks/{}", escape_segment(service)), opts).await
    }

    /// Instances of a service with their node and checks.
    pub async fn service(&self, service: &str, opts: &ServiceOptions) -> Result<Vec<ServiceEntry>> {
        self.entries(&format!("health/service/{}", escape_segment(service)), opts)
            .await
    }

    /// Connect-capable instances of a service.
    pub async fn connect(&self, service: &str, opts: &ServiceOptions) -> Result<Vec<ServiceEntry>> {
        self.entries(&format!("health/connect/{}", escape_segment(service)), opts)
            .await
    }

    /// Ingress gateways fronting a service.
    pub async fn ingress(&self, service: &str, opts: &ServiceOptions) -> Result<Vec<ServiceEntry>> {
        self.entries(&format!("health/ingress/{}", escape_segment(service)), opts)
            .await
    }

    /// Checks in a given state.
    pub async fn state(&self, state: CheckState, opts: &FilterOptions) -> Result<Vec<HealthCheck>> {
        self.list(&format!("health/state/{state}"), opts).await
    }

    async fn list(&self, path: &str, opts: &FilterOptions) -> Result<Vec<HealthCheck>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client.get(path, req).await?.into_typed()
    }

    async fn entries(&self, path: &str, opts: &ServiceOptions) -> Result<Vec<ServiceEntry>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client.get(path, req).await?.into_typed()
    }
}
