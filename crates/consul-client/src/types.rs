//! Request and response types for the Consul HTTP API.
//!
//! These types mirror the agent's wire format field for field. No semantic
//! validation happens client-side.

use std::collections::HashMap;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserialize `null` as the type's default (Consul sends `null` for empty
/// lists and maps).
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept durations either as Go duration strings (`"10s"`) or as integer
/// nanoseconds.
fn duration_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => n.as_u64().filter(|ns| *ns > 0).map(|ns| format!("{ns}ns")),
        _ => None,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Nodes and services
// ─────────────────────────────────────────────────────────────────────────────

/// A catalog node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Node {
    /// Node ID.
    #[serde(rename = "ID", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Node name.
    pub node: String,
    /// Node address.
    #[serde(default)]
    pub address: String,
    /// Datacenter the node belongs to.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub datacenter: String,
    /// Additional addresses keyed by purpose (`lan`, `wan`, ...).
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "HashMap::is_empty")]
    pub tagged_addresses: HashMap<String, String>,
    /// Node metadata.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "HashMap::is_empty")]
    pub meta: HashMap<String, String>,
    /// Raft index at creation.
    #[serde(default)]
    pub create_index: u64,
    /// Raft index at last modification.
    #[serde(default)]
    pub modify_index: u64,
}

/// An address/port pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceAddress {
    /// Address.
    pub address: String,
    /// Port.
    pub port: u16,
}

/// Weights used for DNS SRV responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceWeights {
    /// Weight while passing.
    pub passing: u32,
    /// Weight while warning.
    pub warning: u32,
}

/// Mesh gateway routing mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MeshGatewayConfig {
    /// `""`, `none`, `local` or `remote`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mode: String,
}

/// An upstream of a connect proxy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Upstream {
    /// `service` or `prepared_query`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub destination_type: String,
    /// Destination namespace.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub destination_namespace: String,
    /// Destination partition.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub destination_partition: String,
    /// Destination cluster peer.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub destination_peer: String,
    /// Destination service or query name.
    pub destination_name: String,
    /// Datacenter to resolve the destination in.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub datacenter: String,
    /// Local bind address.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub local_bind_address: String,
    /// Local bind port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_bind_port: Option<u16>,
    /// Opaque proxy configuration.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "HashMap::is_empty")]
    pub config: HashMap<String, Value>,
    /// Mesh gateway mode for this upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_gateway: Option<MeshGatewayConfig>,
}

/// Connect proxy settings of a `connect-proxy` service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceProxy {
    /// Service the proxy fronts.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub destination_service_name: String,
    /// Instance ID the proxy fronts.
    #[serde(rename = "DestinationServiceID", default, skip_serializing_if = "String::is_empty")]
    pub destination_service_id: String,
    /// Address of the local application.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub local_service_address: String,
    /// Port of the local application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_service_port: Option<u16>,
    /// `""`, `direct` or `transparent`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mode: String,
    /// Opaque proxy configuration.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "HashMap::is_empty")]
    pub config: HashMap<String, Value>,
    /// Upstream services.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub upstreams: Vec<Upstream>,
    /// Mesh gateway mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_gateway: Option<MeshGatewayConfig>,
}

/// Connect settings of a service registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceConnect {
    /// The service speaks Connect natively.
    #[serde(default)]
    pub native: bool,
    /// Sidecar proxy to register alongside the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidecar_service: Option<Box<ServiceRegistration>>,
}

/// A service as known to an agent or returned in health results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AgentService {
    /// Service kind; empty for typical services.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Instance ID.
    #[serde(rename = "ID", default)]
    pub id: String,
    /// Service name.
    pub service: String,
    /// Tags.
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    /// Metadata.
    #[serde(default, deserialize_with = "nullable")]
    pub meta: HashMap<String, String>,
    /// Port.
    #[serde(default)]
    pub port: u16,
    /// Address; empty means the node address.
    #[serde(default)]
    pub address: String,
    /// Additional addresses.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "HashMap::is_empty")]
    pub tagged_addresses: HashMap<String, ServiceAddress>,
    /// DNS weights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<ServiceWeights>,
    /// Allow anti-entropy to overwrite tags.
    #[serde(default)]
    pub enable_tag_override: bool,
    /// Proxy settings for `connect-proxy` services.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ServiceProxy>,
    /// Connect settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect: Option<ServiceConnect>,
    /// Cluster peer the service was imported from.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub peer_name: String,
    /// Namespace.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// Admin partition.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub partition: String,
    /// Datacenter.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub datacenter: String,
    /// Raft index at creation.
    #[serde(default)]
    pub create_index: u64,
    /// Raft index at last modification.
    #[serde(default)]
    pub modify_index: u64,
}

/// Body of `PUT /agent/service/register`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRegistration {
    /// Service kind (`connect-proxy`, `mesh-gateway`, ...).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Instance ID; defaults to the name on the agent side.
    #[serde(rename = "ID", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Service name.
    pub name: String,
    /// Tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Address.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    /// Additional addresses.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tagged_addresses: HashMap<String, ServiceAddress>,
    /// Metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub meta: HashMap<String, String>,
    /// Allow anti-entropy to overwrite tags.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub enable_tag_override: bool,
    /// DNS weights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<ServiceWeights>,
    /// Proxy settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ServiceProxy>,
    /// Connect settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect: Option<ServiceConnect>,
    /// A single check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<CheckDefinition>,
    /// Several checks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<CheckDefinition>,
}

impl ServiceRegistration {
    /// Registration with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Checks
// ─────────────────────────────────────────────────────────────────────────────

/// Health state of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Healthy.
    Passing,
    /// Degraded.
    Warning,
    /// Unhealthy.
    Critical,
    /// Under maintenance.
    Maintenance,
}

impl CheckStatus {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Passing => "passing",
            CheckStatus::Warning => "warning",
            CheckStatus::Critical => "critical",
            CheckStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State filter for `GET /health/state/:state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckState {
    /// Every check.
    Any,
    /// Passing checks.
    Passing,
    /// Warning checks.
    Warning,
    /// Critical checks.
    Critical,
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckState::Any => "any",
            CheckState::Passing => "passing",
            CheckState::Warning => "warning",
            CheckState::Critical => "critical",
        })
    }
}

/// Check definition used when registering checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckDefinition {
    /// Check ID; defaults to the name on the agent side.
    #[serde(rename = "ID", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Check name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Service the check is bound to.
    #[serde(rename = "ServiceID", default, skip_serializing_if = "String::is_empty")]
    pub service_id: String,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    /// Initial status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CheckStatus>,
    /// Script arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// HTTP endpoint to poll.
    #[serde(rename = "HTTP", default, skip_serializing_if = "String::is_empty")]
    pub http: String,
    /// HTTP method.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub method: String,
    /// HTTP request body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    /// HTTP headers.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub header: HashMap<String, Vec<String>>,
    /// Skip TLS verification.
    #[serde(rename = "TLSSkipVerify", default, skip_serializing_if = "std::ops::Not::not")]
    pub tls_skip_verify: bool,
    /// TCP address to dial.
    #[serde(rename = "TCP", default, skip_serializing_if = "String::is_empty")]
    pub tcp: String,
    /// UDP address to probe.
    #[serde(rename = "UDP", default, skip_serializing_if = "String::is_empty")]
    pub udp: String,
    /// gRPC endpoint.
    #[serde(rename = "GRPC", default, skip_serializing_if = "String::is_empty")]
    pub grpc: String,
    /// Use TLS for gRPC.
    #[serde(rename = "GRPCUseTLS", default, skip_serializing_if = "std::ops::Not::not")]
    pub grpc_use_tls: bool,
    /// Time-to-live for TTL checks.
    #[serde(rename = "TTL", default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    /// Polling interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Probe timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    /// Deregister the service after being critical this long.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deregister_critical_service_after: Option<String>,
}

/// Definition details echoed back in health results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HealthCheckDefinition {
    /// HTTP endpoint.
    #[serde(rename = "HTTP", default, skip_serializing_if = "String::is_empty")]
    pub http: String,
    /// HTTP headers.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "HashMap::is_empty")]
    pub header: HashMap<String, Vec<String>>,
    /// HTTP method.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub method: String,
    /// HTTP body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    /// Skip TLS verification.
    #[serde(rename = "TLSSkipVerify", default)]
    pub tls_skip_verify: bool,
    /// TCP address.
    #[serde(rename = "TCP", default, skip_serializing_if = "String::is_empty")]
    pub tcp: String,
    /// Polling interval.
    #[serde(default, deserialize_with = "duration_string", skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Probe timeout.
    #[serde(default, deserialize_with = "duration_string", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    /// Critical deregistration delay.
    #[serde(default, deserialize_with = "duration_string", skip_serializing_if = "Option::is_none")]
    pub deregister_critical_service_after: Option<String>,
}

/// A health check result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HealthCheck {
    /// Node the check runs on.
    #[serde(default)]
    pub node: String,
    /// Check ID.
    #[serde(rename = "CheckID", default)]
    pub check_id: String,
    /// Check name.
    #[serde(default)]
    pub name: String,
    /// Current status.
    #[serde(default)]
    pub status: String,
    /// Notes.
    #[serde(default)]
    pub notes: String,
    /// Last output.
    #[serde(default)]
    pub output: String,
    /// Bound service instance.
    #[serde(rename = "ServiceID", default)]
    pub service_id: String,
    /// Bound service name.
    #[serde(default)]
    pub service_name: String,
    /// Bound service tags.
    #[serde(default, deserialize_with = "nullable")]
    pub service_tags: Vec<String>,
    /// Check type (`http`, `ttl`, ...).
    #[serde(rename = "Type", default, skip_serializing_if = "String::is_empty")]
    pub check_type: String,
    /// Definition details.
    #[serde(default)]
    pub definition: HealthCheckDefinition,
    /// Namespace.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// Raft index at creation.
    #[serde(default)]
    pub create_index: u64,
    /// Raft index at last modification.
    #[serde(default)]
    pub modify_index: u64,
}

/// A service instance with its node and checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceEntry {
    /// Hosting node.
    pub node: Node,
    /// Service instance.
    pub service: AgentService,
    /// Node and service checks.
    #[serde(default, deserialize_with = "nullable")]
    pub checks: Vec<HealthCheck>,
}

impl ServiceEntry {
    /// Aggregate status: the worst status across all checks.
    pub fn aggregated_status(&self) -> &str {
        let rank = |status: &str| match status {
            "maintenance" => 3,
            "critical" => 2,
            "warning" => 1,
            _ => 0,
        };
        self.checks
            .iter()
            .map(|c| c.status.as_str())
            .max_by_key(|s| rank(*s))
            .unwrap_or("passing")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Agent
// ─────────────────────────────────────────────────────────────────────────────

/// A gossip pool member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Member {
    /// Node name.
    pub name: String,
    /// Gossip address.
    pub addr: String,
    /// Gossip port.
    pub port: u16,
    /// Member tags (role, dc, build, ...).
    #[serde(default, deserialize_with = "nullable")]
    pub tags: HashMap<String, String>,
    /// Serf status code (1 = alive).
    #[serde(default)]
    pub status: i32,
}

/// Body of `PUT /agent/check/update/:check_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckUpdate {
    /// New status.
    pub status: CheckStatus,
    /// Human-readable output.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

/// A service instance as listed by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogService {
    /// Node ID.
    #[serde(rename = "ID", default)]
    pub id: String,
    /// Node name.
    pub node: String,
    /// Node address.
    #[serde(default)]
    pub address: String,
    /// Datacenter.
    #[serde(default)]
    pub datacenter: String,
    /// Node tagged addresses.
    #[serde(default, deserialize_with = "nullable")]
    pub tagged_addresses: HashMap<String, String>,
    /// Node metadata.
    #[serde(default, deserialize_with = "nullable")]
    pub node_meta: HashMap<String, String>,
    /// Service kind.
    #[serde(default)]
    pub service_kind: String,
    /// Instance ID.
    #[serde(rename = "ServiceID", default)]
    pub service_id: String,
    /// Service name.
    #[serde(default)]
    pub service_name: String,
    /// Service address.
    #[serde(default)]
    pub service_address: String,
    /// Service tags.
    #[serde(default, deserialize_with = "nullable")]
    pub service_tags: Vec<String>,
    /// Service metadata.
    #[serde(default, deserialize_with = "nullable")]
    pub service_meta: HashMap<String, String>,
    /// Service port.
    #[serde(default)]
    pub service_port: u16,
    /// Tag override flag.
    #[serde(default)]
    pub service_enable_tag_override: bool,
    /// Proxy settings.
    #[serde(default)]
    pub service_proxy: Option<ServiceProxy>,
    /// Raft index at creation.
    #[serde(default)]
    pub create_index: u64,
    /// Raft index at last modification.
    #[serde(default)]
    pub modify_index: u64,
}

/// A node with its services keyed by instance ID (`/catalog/node/:node`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogNode {
    /// The node.
    pub node: Node,
    /// Services on the node.
    #[serde(default, deserialize_with = "nullable")]
    pub services: HashMap<String, AgentService>,
}

/// A node with its services as a list (`/catalog/node-services/:node`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogNodeServiceList {
    /// The node.
    pub node: Node,
    /// Services on the node.
    #[serde(default, deserialize_with = "nullable")]
    pub services: Vec<AgentService>,
}

/// A namespaced service name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompoundServiceName {
    /// Service name.
    pub name: String,
    /// Namespace.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// Partition.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub partition: String,
}

/// A service linked to a gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GatewayService {
    /// The gateway.
    pub gateway: CompoundServiceName,
    /// The linked service.
    pub service: CompoundServiceName,
    /// `ingress-gateway` or `terminating-gateway`.
    #[serde(default)]
    pub gateway_kind: String,
    /// Listener port (ingress).
    #[serde(default)]
    pub port: u16,
    /// Listener protocol (ingress).
    #[serde(default)]
    pub protocol: String,
    /// Hosts (ingress).
    #[serde(default, deserialize_with = "nullable")]
    pub hosts: Vec<String>,
    /// CA file (terminating).
    #[serde(rename = "CAFile", default)]
    pub ca_file: String,
    /// Certificate file (terminating).
    #[serde(default)]
    pub cert_file: String,
    /// Key file (terminating).
    #[serde(default)]
    pub key_file: String,
    /// SNI (terminating).
    #[serde(rename = "SNI", default)]
    pub sni: String,
}

/// Body of `PUT /catalog/register`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogRegistration {
    /// Node ID.
    #[serde(rename = "ID", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Node name.
    pub node: String,
    /// Node address.
    pub address: String,
    /// Additional node addresses.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tagged_addresses: HashMap<String, String>,
    /// Node metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub node_meta: HashMap<String, String>,
    /// Datacenter; defaults to the agent's.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub datacenter: String,
    /// Service to register on the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<AgentService>,
    /// A check to register.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<HealthCheck>,
    /// Several checks to register.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<HealthCheck>,
    /// Leave node-level fields untouched.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skip_node_update: bool,
}

/// Body of `PUT /catalog/deregister`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogDeregistration {
    /// Node name.
    pub node: String,
    /// Datacenter; defaults to the agent's.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub datacenter: String,
    /// Only remove this check.
    #[serde(rename = "CheckID", default, skip_serializing_if = "String::is_empty")]
    pub check_id: String,
    /// Only remove this service instance.
    #[serde(rename = "ServiceID", default, skip_serializing_if = "String::is_empty")]
    pub service_id: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// KV
// ─────────────────────────────────────────────────────────────────────────────

/// A key/value entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KvPair {
    /// Full key.
    pub key: String,
    /// Raft index at creation.
    #[serde(default)]
    pub create_index: u64,
    /// Raft index at last modification.
    #[serde(default)]
    pub modify_index: u64,
    /// Number of times the lock has been acquired.
    #[serde(default)]
    pub lock_index: u64,
    /// Opaque user flags.
    #[serde(default)]
    pub flags: u64,
    /// Base64-encoded value, `None` for keys without a value.
    #[serde(default)]
    pub value: Option<String>,
    /// Session holding the lock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    /// Namespace (Enterprise).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Admin partition (Enterprise).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
}

impl KvPair {
    /// Decode the base64 value.
    pub fn decoded_value(&self) -> Option<Vec<u8>> {
        self.value
            .as_deref()
            .and_then(|encoded| STANDARD.decode(encoded).ok())
    }

    /// Decode the value as UTF-8 text.
    pub fn value_string(&self) -> Option<String> {
        self.decoded_value()
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sessions
// ─────────────────────────────────────────────────────────────────────────────

/// What happens to held locks when a session is invalidated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBehavior {
    /// Release locks.
    #[default]
    Release,
    /// Delete locked keys.
    Delete,
}

/// Body of `PUT /session/create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionRequest {
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Node to bind to; defaults to the agent's node.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub node: String,
    /// Lock delay, e.g. `"15s"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_delay: Option<String>,
    /// Invalidation behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<SessionBehavior>,
    /// Time-to-live, e.g. `"30s"`.
    #[serde(rename = "TTL", default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    /// Node checks the session depends on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_checks: Option<Vec<String>>,
    /// Service checks the session depends on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_checks: Vec<ServiceCheckRef>,
}

/// Reference to a service check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceCheckRef {
    /// Check ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Namespace.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

/// A session as returned by the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionEntry {
    /// Session ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Bound node.
    #[serde(default)]
    pub node: String,
    /// Lock delay in nanoseconds.
    #[serde(default)]
    pub lock_delay: u64,
    /// Invalidation behavior.
    #[serde(default)]
    pub behavior: SessionBehavior,
    /// Time-to-live.
    #[serde(rename = "TTL", default)]
    pub ttl: String,
    /// Node checks.
    #[serde(default, deserialize_with = "nullable")]
    pub node_checks: Vec<String>,
    /// Service checks.
    #[serde(default, deserialize_with = "nullable")]
    pub service_checks: Vec<ServiceCheckRef>,
    /// Raft index at creation.
    #[serde(default)]
    pub create_index: u64,
    /// Raft index at last modification.
    #[serde(default)]
    pub modify_index: u64,
}

/// Response of `PUT /session/create` and `POST /query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedId {
    /// Generated identifier.
    #[serde(rename = "ID")]
    pub id: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

/// A user event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserEvent {
    /// Event ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Event name.
    pub name: String,
    /// Base64 payload.
    #[serde(default)]
    pub payload: Option<String>,
    /// Node name filter.
    #[serde(default)]
    pub node_filter: String,
    /// Service name filter.
    #[serde(default)]
    pub service_filter: String,
    /// Tag filter.
    #[serde(default)]
    pub tag_filter: String,
    /// Event format version.
    #[serde(default)]
    pub version: u32,
    /// Lamport time.
    #[serde(rename = "LTime", default)]
    pub ltime: u64,
}

impl UserEvent {
    /// Decode the base64 payload.
    pub fn decoded_payload(&self) -> Option<Vec<u8>> {
        self.payload
            .as_deref()
            .and_then(|encoded| STANDARD.decode(encoded).ok())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Coordinates
// ─────────────────────────────────────────────────────────────────────────────

/// A Vivaldi network coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Coordinate {
    /// Euclidean component.
    #[serde(default)]
    pub vec: Vec<f64>,
    /// Confidence.
    #[serde(default)]
    pub error: f64,
    /// Distance offset.
    #[serde(default)]
    pub adjustment: f64,
    /// Height above the Euclidean plane.
    #[serde(default)]
    pub height: f64,
}

/// Coordinate of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeCoordinate {
    /// Node name.
    pub node: String,
    /// Network segment.
    #[serde(default)]
    pub segment: String,
    /// The coordinate.
    pub coord: Coordinate,
}

/// WAN coordinates of the servers in one datacenter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatacenterCoordinates {
    /// Datacenter name.
    pub datacenter: String,
    /// Network area ID.
    #[serde(rename = "AreaID", default)]
    pub area_id: String,
    /// Server coordinates.
    #[serde(default, deserialize_with = "nullable")]
    pub coordinates: Vec<NodeCoordinate>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Prepared queries
// ─────────────────────────────────────────────────────────────────────────────

/// Datacenter failover policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryFailover {
    /// Try the N nearest datacenters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_n: Option<u32>,
    /// Explicit datacenter order.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub datacenters: Vec<String>,
}

/// Service selection of a prepared query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceQuery {
    /// Service name.
    pub service: String,
    /// Failover policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failover: Option<QueryFailover>,
    /// Only passing instances.
    #[serde(default)]
    pub only_passing: bool,
    /// Check IDs to ignore.
    #[serde(rename = "IgnoreCheckIDs", default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub ignore_check_ids: Vec<String>,
    /// Sort by proximity to this node (`_agent` for the serving agent).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub near: String,
    /// Required tags; `!tag` excludes.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Required node metadata.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "HashMap::is_empty")]
    pub node_meta: HashMap<String, String>,
    /// Required service metadata.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "HashMap::is_empty")]
    pub service_meta: HashMap<String, String>,
}

/// DNS settings of a prepared query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryDns {
    /// DNS TTL, e.g. `"10s"`.
    #[serde(rename = "TTL", default, skip_serializing_if = "String::is_empty")]
    pub ttl: String,
}

/// Template settings of a prepared query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryTemplate {
    /// `name_prefix_match`.
    #[serde(rename = "Type")]
    pub template_type: String,
    /// Regular expression applied to the query name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub regexp: String,
}

/// A prepared query definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PreparedQuery {
    /// Query ID; empty when creating.
    #[serde(rename = "ID", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Query name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Session that scopes the query's lifetime.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub session: String,
    /// Token the query executes with.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
    /// Service selection.
    pub service: ServiceQuery,
    /// DNS settings.
    #[serde(rename = "DNS", default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<QueryDns>,
    /// Template settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<QueryTemplate>,
    /// Raft index at creation.
    #[serde(default, skip_serializing)]
    pub create_index: u64,
    /// Raft index at last modification.
    #[serde(default, skip_serializing)]
    pub modify_index: u64,
}

/// Result of executing a prepared query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryExecuteResponse {
    /// Service queried.
    pub service: String,
    /// Namespace.
    #[serde(default)]
    pub namespace: String,
    /// Matching instances.
    #[serde(default, deserialize_with = "nullable")]
    pub nodes: Vec<ServiceEntry>,
    /// DNS settings.
    #[serde(rename = "DNS", default)]
    pub dns: QueryDns,
    /// Datacenter that answered.
    #[serde(default)]
    pub datacenter: String,
    /// Number of failover datacenters tried.
    #[serde(default)]
    pub failovers: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

/// Verb of a KV transaction operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KvVerb {
    /// Set a value.
    Set,
    /// Check-and-set.
    Cas,
    /// Acquire a lock.
    Lock,
    /// Release a lock.
    Unlock,
    /// Read a key.
    Get,
    /// Read a prefix.
    GetTree,
    /// Fail unless the index matches.
    CheckIndex,
    /// Fail unless the session holds the key.
    CheckSession,
    /// Fail if the key exists.
    CheckNotExists,
    /// Delete a key.
    Delete,
    /// Delete a prefix.
    DeleteTree,
    /// Delete if the index matches.
    DeleteCas,
}

/// Verb of a node, service or check transaction operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogVerb {
    /// Write unconditionally.
    Set,
    /// Write if the index matches.
    Cas,
    /// Read.
    Get,
    /// Delete unconditionally.
    Delete,
    /// Delete if the index matches.
    DeleteCas,
}

/// A KV operation inside a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KvTxnOp {
    /// Operation.
    pub verb: KvVerb,
    /// Key.
    pub key: String,
    /// Base64 value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// User flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    /// Index for `cas` / `check-index` / `delete-cas`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    /// Session for `lock` / `unlock` / `check-session`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

impl KvTxnOp {
    /// An operation with just a verb and key.
    pub fn new(verb: KvVerb, key: impl Into<String>) -> Self {
        Self {
            verb,
            key: key.into(),
            value: None,
            flags: None,
            index: None,
            session: None,
        }
    }

    /// Attach a value, base64-encoding it.
    pub fn with_value(mut self, value: impl AsRef<[u8]>) -> Self {
        self.value = Some(STANDARD.encode(value));
        self
    }

    /// Attach a modify index.
    pub fn with_index(mut self, index: u64) -> Self {
        self.index = Some(index);
        self
    }

    /// Attach a session.
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }
}

/// A node operation inside a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeTxnOp {
    /// Operation.
    pub verb: CatalogVerb,
    /// Node.
    pub node: Node,
}

/// A service operation inside a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceTxnOp {
    /// Operation.
    pub verb: CatalogVerb,
    /// Node name.
    pub node: String,
    /// Service instance.
    pub service: AgentService,
}

/// A check operation inside a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckTxnOp {
    /// Operation.
    pub verb: CatalogVerb,
    /// Check.
    pub check: HealthCheck,
}

/// One operation in a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TxnOp {
    /// Key/value operation.
    #[serde(rename = "KV")]
    Kv(KvTxnOp),
    /// Node operation.
    Node(NodeTxnOp),
    /// Service operation.
    Service(ServiceTxnOp),
    /// Check operation.
    Check(CheckTxnOp),
}

/// Result of one successful transaction operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TxnResult {
    /// Key/value result.
    #[serde(rename = "KV")]
    Kv(KvPair),
    /// Node result.
    Node(Node),
    /// Service result.
    Service(AgentService),
    /// Check result.
    Check(HealthCheck),
}

/// A failed transaction operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TxnError {
    /// Index of the failing operation.
    pub op_index: usize,
    /// Failure description.
    pub what: String,
}

/// Response of `PUT /txn`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TxnResponse {
    /// Per-operation results, in request order.
    #[serde(default, deserialize_with = "nullable")]
    pub results: Vec<TxnResult>,
    /// Per-operation errors.
    #[serde(default, deserialize_with = "nullable")]
    pub errors: Vec<TxnError>,
}

impl TxnResponse {
    /// Whether every operation succeeded.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kv_pair_decodes_value() {
        let pair: KvPair = serde_json::from_value(json!({
            "Key": "app/config",
            "CreateIndex": 10,
            "ModifyIndex": 12,
            "LockIndex": 0,
            "Flags": 3,
            "Value": "aGVsbG8=",
            "Session": null
        }))
        .unwrap();

        assert_eq!(pair.key, "app/config");
        assert_eq!(pair.flags, 3);
        assert_eq!(pair.value_string().as_deref(), Some("hello"));
        assert_eq!(pair.session, None);
    }

    #[test]
    fn test_kv_pair_keeps_enterprise_fields() {
        let wire = json!({
            "Key": "app/config",
            "CreateIndex": 10,
            "ModifyIndex": 12,
            "LockIndex": 1,
            "Flags": 0,
            "Value": "aGVsbG8=",
            "Session": "s-1",
            "Namespace": "team",
            "Partition": "default"
        });
        let pair: KvPair = serde_json::from_value(wire.clone()).unwrap();

        assert_eq!(pair.namespace.as_deref(), Some("team"));
        assert_eq!(pair.partition.as_deref(), Some("default"));
        assert_eq!(serde_json::to_value(&pair).unwrap(), wire);
    }

    #[test]
    fn test_null_collections_become_empty() {
        let entry: ServiceEntry = serde_json::from_value(json!({
            "Node": {"Node": "n1", "Address": "10.0.0.1", "Meta": null},
            "Service": {"ID": "web-1", "Service": "web", "Tags": null, "Port": 80},
            "Checks": null
        }))
        .unwrap();

        assert!(entry.node.meta.is_empty());
        assert!(entry.service.tags.is_empty());
        assert!(entry.checks.is_empty());
        assert_eq!(entry.aggregated_status(), "passing");
    }

    #[test]
    fn test_aggregated_status_picks_worst() {
        let check = |status: &str| HealthCheck {
            status: status.to_string(),
            ..Default::default()
        };
        let entry = ServiceEntry {
            checks: vec![check("passing"), check("critical"), check("warning")],
            ..Default::default()
        };
        assert_eq!(entry.aggregated_status(), "critical");
    }

    #[test]
    fn test_check_definition_accepts_nanosecond_durations() {
        let def: HealthCheckDefinition = serde_json::from_value(json!({
            "HTTP": "http://localhost/health",
            "Interval": 10000000000u64,
            "Timeout": "5s",
            "DeregisterCriticalServiceAfter": 0
        }))
        .unwrap();

        assert_eq!(def.interval.as_deref(), Some("10000000000ns"));
        assert_eq!(def.timeout.as_deref(), Some("5s"));
        assert_eq!(def.deregister_critical_service_after, None);
    }

    #[test]
    fn test_service_registration_wire_names() {
        let registration = ServiceRegistration {
            id: "web-1".to_string(),
            port: Some(8080),
            check: Some(CheckDefinition {
                http: "http://localhost:8080/health".to_string(),
                interval: Some("10s".to_string()),
                ..Default::default()
            }),
            connect: Some(ServiceConnect {
                sidecar_service: Some(Box::new(ServiceRegistration {
                    proxy: Some(ServiceProxy {
                        upstreams: vec![Upstream {
                            destination_name: "db".to_string(),
                            local_bind_port: Some(5432),
                            mesh_gateway: Some(MeshGatewayConfig {
                                mode: "local".to_string(),
                            }),
                            ..Default::default()
                        }],
                        ..Default::default()
                    }),
                    ..Default::default()
                })),
                ..Default::default()
            }),
            ..ServiceRegistration::new("web")
        };

        let value = serde_json::to_value(&registration).unwrap();
        assert_eq!(
            value,
            json!({
                "ID": "web-1",
                "Name": "web",
                "Port": 8080,
                "Connect": {
                    "Native": false,
                    "SidecarService": {
                        "Name": "",
                        "Proxy": {
                            "Upstreams": [{
                                "DestinationName": "db",
                                "LocalBindPort": 5432,
                                "MeshGateway": {"Mode": "local"}
                            }]
                        }
                    }
                },
                "Check": {
                    "HTTP": "http://localhost:8080/health",
                    "Interval": "10s"
                }
            })
        );
    }

    #[test]
    fn test_txn_op_serialization() {
        let op = TxnOp::Kv(KvTxnOp::new(KvVerb::Set, "lock/a").with_value("v"));
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"KV": {"Verb": "set", "Key": "lock/a", "Value": "dg=="}})
        );

        let op = TxnOp::Kv(KvTxnOp::new(KvVerb::CheckNotExists, "lock/b"));
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"KV": {"Verb": "check-not-exists", "Key": "lock/b"}})
        );
    }

    #[test]
    fn test_txn_response_with_errors() {
        let response: TxnResponse = serde_json::from_value(json!({
            "Results": null,
            "Errors": [{"OpIndex": 1, "What": "key \"b\" exists"}]
        }))
        .unwrap();

        assert!(!response.is_success());
        assert!(response.results.is_empty());
        assert_eq!(response.errors[0].op_index, 1);
    }

    #[test]
    fn test_check_state_display() {
        assert_eq!(CheckState::Any.to_string(), "any");
        assert_eq!(CheckState::Critical.to_string(), "critical");
        assert_eq!(CheckStatus::Warning.to_string(), "warning");
    }
}
