//! API endpoint implementations, one module per endpoint group.

mod agent;
mod catalog;
mod coordinate;
mod event;
mod health;
mod kv;
mod query;
mod session;
mod snapshot;
mod status;
mod txn;

pub use agent::{AgentApi, MaintenanceOptions, MembersOptions};
pub use catalog::CatalogApi;
pub use coordinate::CoordinateApi;
pub use event::{EventApi, EventFireOptions, EventListOptions};
pub use health::HealthApi;
pub use kv::{KvApi, KvDeleteOptions, KvGetOptions, KvKeysOptions, KvPutOptions};
pub use query::{QueryApi, QueryExecuteOptions};
pub use session::SessionApi;
pub use snapshot::SnapshotApi;
pub use status::StatusApi;
pub use txn::TxnApi;
