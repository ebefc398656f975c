//! User event API.

use crate::client::ConsulClient;
use crate::error::Result;
use crate::options::{BlockingOptions, QueryOptions};
use crate::request::{escape_segment, Body, RequestOptions};
use crate::types::UserEvent;

/// Options for firing an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFireOptions {
    /// Datacenter and token.
    pub base: QueryOptions,
    /// Node name filter, a regular expression (`node`).
    pub node: Option<String>,
    /// Service name filter, a regular expression (`service`).
    pub service: Option<String>,
    /// Tag filter, a regular expression; requires `service` (`tag`).
    pub tag: Option<String>,
}

/// Options for listing events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventListOptions {
    /// Blocking query settings.
    pub base: BlockingOptions,
    /// Only events with this name (`name`).
    pub name: Option<String>,
}

/// User event API client.
///
/// Both methods propagate failures.
pub struct EventApi {
    client: ConsulClient,
}

impl EventApi {
    pub(crate) fn new(client: ConsulClient) -> Self {
        Self { client }
    }

    /// Fire an event with an optional opaque payload.
    pub async fn fire(
        &self,
        name: &str,
        payload: Option<Body>,
        opts: &EventFireOptions,
    ) -> Result<UserEvent> {
        let mut req = RequestOptions::new();
        opts.base.apply(&mut req);
        req.query
            .set_opt("node", opts.node.as_deref())
            .set_opt("service", opts.service.as_deref())
            .set_opt("tag", opts.tag.as_deref());
        self.client
            .put(&format!("event/fire/{}", escape_segment(name)), payload, req)
            .await?
            .into_typed()
    }

    /// Most recent events known to the agent.
    pub async fn list(&self, opts: &EventListOptions) -> Result<Vec<UserEvent>> {
        let mut req = RequestOptions::new();
        opts.base.apply(&mut req);
        req.query.set_opt("name", opts.name.as_deref());
        let events: Option<Vec<UserEvent>> =
            self.client.get("event/list", req).await?.into_typed()?;
        Ok(events.unwrap_or_default())
    }
}
