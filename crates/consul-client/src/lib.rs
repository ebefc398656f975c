//! HTTP client for the Consul agent API.
//!
//! This crate provides a typed client for the `/v1/` endpoints of a Consul
//! agent: agent, catalog, health, key/value, sessions, events, status,
//! coordinates, prepared queries, transactions and snapshots.
//!
//! # Example
//!
//! ```no_run
//! use consul_client::{BlockingOptions, ConsulClient, KvPutOptions, Result};
//!
//! # async fn example() -> Result<()> {
//! // Reads CONSUL_HTTP_ADDR, CONSUL_HTTP_TOKEN and friends
//! let client = ConsulClient::from_env()?;
//!
//! if client.kv().put("app/mode", "blue", &KvPutOptions::default()).await {
//!     let pair = client.kv().get("app/mode", &BlockingOptions::default()).await;
//!     println!("{:?}", pair.and_then(|p| p.value_string()));
//! }
//!
//! println!("Leader: {}", client.status().leader().await?);
//! # Ok(())
//! # }
//! ```
//!
//! # Failure handling
//!
//! Endpoint groups follow three conventions:
//!
//! - **Writes** (register, put, delete, ...) return `bool`
//! - **Lookups** of a single record return `Option`
//! - **Primary reads** (members, catalog listings, health) return [`Result`]
//!
//! Failures swallowed by the first two are handed to a [`DiagnosticSink`];
//! the default [`TracingSink`] logs them with `tracing`.
//!
//! # Transport
//!
//! Requests go through an [`HttpTransport`]. [`ReqwestTransport`] is the
//! default; tests and embedders can plug in their own.

pub mod api;
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod options;
pub mod request;
pub mod transport;
pub mod types;

pub use client::{ClientBuilder, ConsulClient};
pub use config::{ClientConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use diagnostics::{DiagnosticSink, NoopSink, TracingSink};
pub use error::{Error, Result};
pub use options::{
    BlockingOptions, Consistency, FilterOptions, QueryOptions, ServiceOptions, TOKEN_HEADER,
};
pub use request::{Body, Decoded, QueryParams, QueryValue, RequestOptions, ResponseKind};
pub use transport::{HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};
pub use types::*;

// Re-export option types that are commonly used with endpoint methods
pub use api::{
    EventFireOptions, EventListOptions, KvDeleteOptions, KvGetOptions, KvKeysOptions,
    KvPutOptions, MaintenanceOptions, MembersOptions, QueryExecuteOptions,
};
