//! Agent API.

use std::collections::HashMap;

use serde_json::Value;

use crate::client::ConsulClient;
use crate::error::Result;
use crate::options::QueryOptions;
use crate::request::{escape_segment, RequestOptions};
use crate::types::{
    AgentService, CheckDefinition, CheckStatus, CheckUpdate, HealthCheck, Member,
    ServiceRegistration,
};

/// Options for listing gossip members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembersOptions {
    /// List WAN members instead of LAN members (`wan`).
    pub wan: bool,
    /// Network segment (`segment`).
    pub segment: Option<String>,
}

/// Options for toggling maintenance mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceOptions {
    /// Enter (`true`) or leave (`false`) maintenance mode.
    pub enable: bool,
    /// Reason recorded on the maintenance check.
    pub reason: Option<String>,
}

impl MaintenanceOptions {
    /// Enter maintenance mode with a reason.
    pub fn enable(reason: impl Into<String>) -> Self {
        Self {
            enable: true,
            reason: Some(reason.into()),
        }
    }

    /// Leave maintenance mode.
    pub fn disable() -> Self {
        Self {
            enable: false,
            reason: None,
        }
    }

    fn to_request(&self) -> RequestOptions {
        let mut req = RequestOptions::new();
        req.query
            .set("enable", self.enable)
            .set_opt("reason", self.reason.as_deref());
        req
    }
}

/// Agent API client.
///
/// Write operations return `true` on success and `false` on any failure;
/// the failure goes to the client's diagnostic sink.
pub struct AgentApi {
    client: ConsulClient,
}

impl AgentApi {
    pub(crate) fn new(client: ConsulClient) -> Self {
        Self { client }
    }

    /// Configuration and member information of the local agent.
    pub async fn self_info(&self) -> Result<Value> {
        self.client
            .get("agent/self", RequestOptions::new())
            .await?
            .into_typed()
    }

    /// Gossip pool members seen by the agent.
    pub async fn members(&self, opts: &MembersOptions) -> Result<Vec<Member>> {
        let mut req = RequestOptions::new();
        req.query
            .set_flag("wan", opts.wan)
            .set_opt("segment", opts.segment.as_deref());
        self.client.get("agent/members", req).await?.into_typed()
    }

    /// Agent telemetry.
    pub async fn metrics(&self) -> Result<Value> {
        self.client
            .get("agent/metrics", RequestOptions::new())
            .await?
            .into_typed()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Services
    // ─────────────────────────────────────────────────────────────────────────

    /// Services registered with the local agent, keyed by instance ID.
    pub async fn services(&self, filter: Option<&str>) -> Result<HashMap<String, AgentService>> {
        let mut req = RequestOptions::new();
        req.query.set_opt("filter", filter);
        self.client.get("agent/services", req).await?.into_typed()
    }

    /// Register a service with the local agent.
    pub async fn service_register(&self, registration: &ServiceRegistration) -> bool {
        let result = self
            .client
            .put_json("agent/service/register", registration, RequestOptions::new())
            .await;
        self.client.succeeded("agent.service_register", result)
    }

    /// Deregister a service from the local agent.
    pub async fn service_deregister(&self, service_id: &str) -> bool {
        let result = self
            .client
            .put(
                &format!("agent/service/deregister/{}", escape_segment(service_id)),
                None,
                RequestOptions::new(),
            )
            .await;
        self.client.succeeded("agent.service_deregister", result)
    }

    /// Put a service instance into or out of maintenance mode.
    pub async fn service_maintenance(&self, service_id: &str, opts: &MaintenanceOptions) -> bool {
        let result = self
            .client
            .put(
                &format!("agent/service/maintenance/{}", escape_segment(service_id)),
                None,
                opts.to_request(),
            )
            .await;
        self.client.succeeded("agent.service_maintenance", result)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Checks
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks registered with the local agent, keyed by check ID.
    pub async fn checks(&self, filter: Option<&str>) -> Result<HashMap<String, HealthCheck>> {
        let mut req = RequestOptions::new();
        req.query.set_opt("filter", filter);
        self.client.get("agent/checks", req).await?.into_typed()
    }

    /// Register a check with the local agent.
    pub async fn check_register(&self, check: &CheckDefinition) -> bool {
        let result = self
            .client
            .put_json("agent/check/register", check, RequestOptions::new())
            .await;
        self.client.succeeded("agent.check_register", result)
    }

    /// Deregister a check from the local agent.
    pub async fn check_deregister(&self, check_id: &str) -> bool {
        let result = self
            .client
            .put(
                &format!("agent/check/deregister/{}", escape_segment(check_id)),
                None,
                RequestOptions::new(),
            )
            .await;
        self.client.succeeded("agent.check_deregister", result)
    }

    /// Set the status of a TTL check.
    pub async fn check_update(&self, check_id: &str, update: &CheckUpdate) -> bool {
        let result = self
            .client
            .put_json(
                &format!("agent/check/update/{}", escape_segment(check_id)),
                update,
                RequestOptions::new(),
            )
            .await;
        self.client.succeeded("agent.check_update", result)
    }

    /// Mark a TTL check as passing.
    pub async fn check_pass(&self, check_id: &str, output: impl Into<String>) -> bool {
        self.check_update(check_id, &ttl_update(CheckStatus::Passing, output))
            .await
    }

    /// Mark a TTL check as warning.
    pub async fn check_warn(&self, check_id: &str, output: impl Into<String>) -> bool {
        self.check_update(check_id, &ttl_update(CheckStatus::Warning, output))
            .await
    }

    /// Mark a TTL check as critical.
    pub async fn check_fail(&self, check_id: &str, output: impl Into<String>) -> bool {
        self.check_update(check_id, &ttl_update(CheckStatus::Critical, output))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cluster membership
    // ─────────────────────────────────────────────────────────────────────────

    /// Join the agent to another node's gossip pool.
    pub async fn join(&self, address: &str, wan: bool) -> bool {
        let mut req = RequestOptions::new();
        req.query.set_flag("wan", wan);
        let result = self
            .client
            .put(&format!("agent/join/{}", escape_segment(address)), None, req)
            .await;
        self.client.succeeded("agent.join", result)
    }

    /// Gracefully leave the cluster and shut the agent down.
    pub async fn leave(&self) -> bool {
        let result = self
            .client
            .put("agent/leave", None, RequestOptions::new())
            .await;
        self.client.succeeded("agent.leave", result)
    }

    /// Force a failed node into the `left` state.
    pub async fn force_leave(&self, node: &str, prune: bool) -> bool {
        let mut req = RequestOptions::new();
        req.query.set_flag("prune", prune);
        let result = self
            .client
            .put(&format!("agent/force-leave/{}", escape_segment(node)), None, req)
            .await;
        self.client.succeeded("agent.force_leave", result)
    }

    /// Reload the agent's configuration files.
    pub async fn reload(&self) -> bool {
        let result = self
            .client
            .put("agent/reload", None, RequestOptions::new())
            .await;
        self.client.succeeded("agent.reload", result)
    }

    /// Put the whole node into or out of maintenance mode.
    pub async fn maintenance(&self, opts: &MaintenanceOptions) -> bool {
        let result = self
            .client
            .put("agent/maintenance", None, opts.to_request())
            .await;
        self.client.succeeded("agent.maintenance", result)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Connect
    // ─────────────────────────────────────────────────────────────────────────

    /// Trusted Connect CA root certificates.
    pub async fn connect_ca_roots(&self, opts: &QueryOptions) -> Result<Value> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client
            .get("agent/connect/ca/roots", req)
            .await?
            .into_typed()
    }

    /// Leaf certificate for a service.
    pub async fn connect_leaf(&self, service: &str, opts: &QueryOptions) -> Result<Value> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client
            .get(&format!("agent/connect/ca/leaf/{}", escape_segment(service)), req)
            .await?
            .into_typed()
    }
}

fn ttl_update(status: CheckStatus, output: impl Into<String>) -> CheckUpdate {
    CheckUpdate {
        status,
        output: output.into(),
    }
}
