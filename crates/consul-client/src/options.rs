//! Per-call query options shared across endpoint groups.
//!
//! Each options type wraps the one below it:
//! [`QueryOptions`] ⊂ [`BlockingOptions`] ⊂ [`FilterOptions`] ⊂ [`ServiceOptions`].
//! Applying an options value translates its fields into the literal query
//! parameters and headers the agent understands.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::request::RequestOptions;

/// Header carrying the ACL token.
pub const TOKEN_HEADER: &str = "X-Consul-Token";

/// Read consistency mode for blocking queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Consistency {
    /// Leader-served reads without a quorum check.
    #[default]
    Default,
    /// Strongly consistent reads (`consistent=true`).
    Consistent,
    /// Reads from any server (`stale=true`).
    Stale,
}

/// Options accepted by every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Target datacenter (`dc`). Overrides the client's configured datacenter.
    pub dc: Option<String>,
    /// ACL token for this call only.
    pub token: Option<String>,
}

impl QueryOptions {
    /// Target a specific datacenter.
    pub fn dc(mut self, dc: impl Into<String>) -> Self {
        self.dc = Some(dc.into());
        self
    }

    /// Use a specific ACL token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub(crate) fn apply(&self, req: &mut RequestOptions) {
        req.query.set_opt("dc", self.dc.as_deref());
        if let Some(token) = &self.token {
            req.set_header(TOKEN_HEADER, token.as_str());
        }
    }
}

/// Options for reads that support blocking queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockingOptions {
    /// Datacenter and token.
    pub base: QueryOptions,
    /// Wait for a change past this index (`index`).
    pub index: Option<u64>,
    /// Maximum wait time (`wait`).
    pub wait: Option<Duration>,
    /// Consistency mode.
    pub consistency: Consistency,
}

impl BlockingOptions {
    /// Target a specific datacenter.
    pub fn dc(mut self, dc: impl Into<String>) -> Self {
        self.base.dc = Some(dc.into());
        self
    }

    /// Block until the index moves past `index`.
    pub fn index(mut self, index: u64) -> Self {
        self.index = Some(index);
        self
    }

    /// Bound the blocking wait.
    pub fn wait(mut self, wait: Duration) -> Self {
        self.wait = Some(wait);
        self
    }

    /// Set the consistency mode.
    pub fn consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = consistency;
        self
    }

    pub(crate) fn apply(&self, req: &mut RequestOptions) {
        self.base.apply(req);
        req.query
            .set_opt("index", self.index)
            .set_opt("wait", self.wait.map(format_wait));
        match self.consistency {
            Consistency::Consistent => {
                req.query.set("consistent", true);
            }
            Consistency::Stale => {
                req.query.set("stale", true);
            }
            Consistency::Default => {}
        }
    }
}

impl From<QueryOptions> for BlockingOptions {
    fn from(base: QueryOptions) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }
}

/// Blocking options plus node filtering, used by health and catalog listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Blocking query settings.
    pub base: BlockingOptions,
    /// Only nodes carrying all of these metadata pairs.
    pub node_meta: BTreeMap<String, String>,
    /// Sort results by round-trip time from this node (`near`).
    pub near: Option<String>,
    /// Filter expression (`filter`).
    pub filter: Option<String>,
}

impl FilterOptions {
    /// Target a specific datacenter.
    pub fn dc(mut self, dc: impl Into<String>) -> Self {
        self.base.base.dc = Some(dc.into());
        self
    }

    /// Require a node metadata pair.
    pub fn node_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.node_meta.insert(key.into(), value.into());
        self
    }

    /// Sort by proximity to a node.
    pub fn near(mut self, node: impl Into<String>) -> Self {
        self.near = Some(node.into());
        self
    }

    /// Apply a filter expression.
    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filter = Some(expression.into());
        self
    }

    pub(crate) fn apply(&self, req: &mut RequestOptions) {
        self.base.apply(req);
        apply_node_meta(&self.node_meta, req);
        req.query
            .set_opt("near", self.near.as_deref())
            .set_opt("filter", self.filter.as_deref());
    }
}

impl From<BlockingOptions> for FilterOptions {
    fn from(base: BlockingOptions) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }
}

/// Filter options plus service-instance selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Node filtering and blocking settings.
    pub base: FilterOptions,
    /// Only instances carrying every one of these tags.
    pub tag: Vec<String>,
    /// Only instances whose checks are all passing.
    pub passing: bool,
    /// Query a cluster peer instead of the local cluster.
    pub peer: Option<String>,
    /// Merge central service defaults into the returned service definitions.
    pub merge_central_config: bool,
}

impl ServiceOptions {
    /// Target a specific datacenter.
    pub fn dc(mut self, dc: impl Into<String>) -> Self {
        self.base.base.base.dc = Some(dc.into());
        self
    }

    /// Require a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag.push(tag.into());
        self
    }

    /// Only return passing instances.
    pub fn passing(mut self, passing: bool) -> Self {
        self.passing = passing;
        self
    }

    /// Query a cluster peer.
    pub fn peer(mut self, peer: impl Into<String>) -> Self {
        self.peer = Some(peer.into());
        self
    }

    /// Merge central configuration.
    pub fn merge_central_config(mut self, merge: bool) -> Self {
        self.merge_central_config = merge;
        self
    }

    pub(crate) fn apply(&self, req: &mut RequestOptions) {
        self.base.apply(req);
        req.query
            .set_all("tag", &self.tag)
            .set_flag("passing", self.passing)
            .set_opt("peer", self.peer.as_deref())
            .set_flag("merge-central-config", self.merge_central_config);
    }
}

impl From<FilterOptions> for ServiceOptions {
    fn from(base: FilterOptions) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }
}

/// Expand a metadata mapping into `node-meta=<key>` query entries.
pub(crate) fn apply_node_meta(node_meta: &BTreeMap<String, String>, req: &mut RequestOptions) {
    for (key, value) in node_meta {
        req.query.set(format!("node-meta={key}"), value);
    }
}

/// Render a duration in the agent's duration syntax.
pub(crate) fn format_wait(wait: Duration) -> String {
    if wait.subsec_millis() == 0 && wait.as_secs() > 0 {
        format!("{}s", wait.as_secs())
    } else {
        format!("{}ms", wait.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::QueryValue;

    fn applied(f: impl FnOnce(&mut RequestOptions)) -> RequestOptions {
        let mut req = RequestOptions::new();
        f(&mut req);
        req
    }

    fn single(value: &str) -> Option<QueryValue> {
        Some(QueryValue::Single(value.to_string()))
    }

    #[test]
    fn test_consistent_sets_flag_only() {
        let opts = BlockingOptions::default().consistency(Consistency::Consistent);
        let req = applied(|r| opts.apply(r));
        assert_eq!(req.query.get("consistent").cloned(), single("true"));
        assert!(!req.query.contains_key("stale"));
        assert!(!req.query.contains_key("consistency"));
    }

    #[test]
    fn test_stale_sets_flag_only() {
        let opts = BlockingOptions::default().consistency(Consistency::Stale);
        let req = applied(|r| opts.apply(r));
        assert_eq!(req.query.get("stale").cloned(), single("true"));
        assert!(!req.query.contains_key("consistent"));
        assert!(!req.query.contains_key("consistency"));
    }

    #[test]
    fn test_default_consistency_sets_nothing() {
        let opts = BlockingOptions::default();
        let req = applied(|r| opts.apply(r));
        assert_eq!(req.query.pairs().count(), 0);
    }

    #[test]
    fn test_blocking_index_and_wait() {
        let opts = BlockingOptions::default()
            .index(42)
            .wait(Duration::from_secs(30));
        let req = applied(|r| opts.apply(r));
        assert_eq!(req.query.get("index").cloned(), single("42"));
        assert_eq!(req.query.get("wait").cloned(), single("30s"));
    }

    #[test]
    fn test_format_wait() {
        assert_eq!(format_wait(Duration::from_secs(5)), "5s");
        assert_eq!(format_wait(Duration::from_millis(250)), "250ms");
        assert_eq!(format_wait(Duration::from_millis(1500)), "1500ms");
        assert_eq!(format_wait(Duration::ZERO), "0ms");
    }

    #[test]
    fn test_node_meta_expands_per_key() {
        let opts = FilterOptions::default()
            .node_meta("a", "1")
            .node_meta("b", "2");
        let req = applied(|r| opts.apply(r));
        let pairs: Vec<_> = req.query.pairs().collect();
        assert_eq!(pairs, vec![("node-meta=a", "1"), ("node-meta=b", "2")]);
        assert!(!req.query.contains_key("nodeMeta"));
        assert!(!req.query.contains_key("node_meta"));
    }

    #[test]
    fn test_service_options_wire_names() {
        let opts = ServiceOptions::default()
            .dc("dc2")
            .tag("v1")
            .tag("primary")
            .passing(true)
            .peer("east")
            .merge_central_config(true);
        let req = applied(|r| opts.apply(r));
        let pairs: Vec<_> = req.query.pairs().collect();
        assert_eq!(
            pairs,
            vec![
                ("dc", "dc2"),
                ("tag", "v1"),
                ("tag", "primary"),
                ("passing", "true"),
                ("peer", "east"),
                ("merge-central-config", "true"),
            ]
        );
    }

    #[test]
    fn test_unset_flags_are_omitted() {
        let opts = ServiceOptions::default();
        let req = applied(|r| opts.apply(r));
        assert!(!req.query.contains_key("passing"));
        assert!(!req.query.contains_key("merge-central-config"));
        assert!(!req.query.contains_key("tag"));
    }

    #[test]
    fn test_token_becomes_header() {
        let opts = QueryOptions::default().token("secret");
        let req = applied(|r| opts.apply(r));
        assert_eq!(
            req.headers,
            vec![(TOKEN_HEADER.to_string(), "secret".to_string())]
        );
        assert!(!req.query.contains_key("token"));
    }
}
