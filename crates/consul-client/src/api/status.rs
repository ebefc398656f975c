//! Status API.

use crate::client::ConsulClient;
use crate::error::Result;
use crate::options::QueryOptions;
use crate::request::RequestOptions;

/// Status API client.
pub struct StatusApi {
    client: ConsulClient,
}

impl StatusApi {
    pub(crate) fn new(client: ConsulClient) -> Self {
        Self { client }
    }

    /// Raft address of the current leader; empty when there is none.
    pub async fn leader(&self) -> Result<String> {
        self.leader_in(&QueryOptions::default()).await
    }

    /// Leader of a specific datacenter.
    pub async fn leader_in(&self, opts: &QueryOptions) -> Result<String> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client.get("status/leader", req).await?.into_typed()
    }

    /// Raft addresses of the voting peers.
    pub async fn peers(&self) -> Result<Vec<String>> {
        self.peers_in(&QueryOptions::default()).await
    }

    /// Peers of a specific datacenter.
    pub async fn peers_in(&self, opts: &QueryOptions) -> Result<Vec<String>> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        self.client.get("status/peers", req).await?.into_typed()
    }
}
