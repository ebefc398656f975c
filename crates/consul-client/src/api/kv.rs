//! Key/value store API.

use serde_json::Value;

use crate::client::ConsulClient;
use crate::error::Result;
use crate::options::{BlockingOptions, QueryOptions};
use crate::request::{escape_key, Body, Decoded, RequestOptions, ResponseKind};
use crate::types::KvPair;

/// Options for reading a single key.
pub type KvGetOptions = BlockingOptions;

/// Options for listing keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KvKeysOptions {
    /// Blocking query settings.
    pub base: BlockingOptions,
    /// Only list keys up to this separator (`separator`).
    pub separator: Option<String>,
}

/// Options for writing a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KvPutOptions {
    /// Datacenter and token.
    pub base: QueryOptions,
    /// Opaque user flags (`flags`).
    pub flags: Option<u64>,
    /// Only write if the modify index matches; `0` means "only if absent"
    /// (`cas`).
    pub cas: Option<u64>,
    /// Acquire the lock with this session (`acquire`).
    pub acquire: Option<String>,
    /// Release the lock held by this session (`release`).
    pub release: Option<String>,
}

impl KvPutOptions {
    fn to_request(&self) -> RequestOptions {
        let mut req = RequestOptions::new();
        self.base.apply(&mut req);
        req.query
            .set_opt("flags", self.flags)
            .set_opt("cas", self.cas)
            .set_opt("acquire", self.acquire.as_deref())
            .set_opt("release", self.release.as_deref());
        req
    }
}

/// Options for deleting a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KvDeleteOptions {
    /// Datacenter and token.
    pub base: QueryOptions,
    /// Delete every key under the prefix (`recurse`).
    pub recurse: bool,
    /// Only delete if the modify index matches (`cas`).
    pub cas: Option<u64>,
}

/// Key/value store API client.
///
/// `get` and `get_raw` report failures as `None`; `keys` and `list` report
/// them as an empty list; `put` and `delete` return a boolean.
pub struct KvApi {
    client: ConsulClient,
}

impl KvApi {
    pub(crate) fn new(client: ConsulClient) -> Self {
        Self { client }
    }

    /// Read one key. Missing keys yield `None`.
    pub async fn get(&self, key: &str, opts: &KvGetOptions) -> Option<KvPair> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        let result = match self.client.get(&kv_path(key), req).await {
            Ok(decoded) => decoded.into_single(),
            Err(err) => Err(err),
        };
        self.client.or_none("kv.get", result)
    }

    /// Read the raw value of one key. Missing keys yield `None`.
    pub async fn get_raw(&self, key: &str, opts: &KvGetOptions) -> Option<Vec<u8>> {
        let mut req = RequestOptions::new().with_response(ResponseKind::Bytes);
        opts.apply(&mut req);
        req.query.set("raw", true);
        let result = match self.client.get(&kv_path(key), req).await {
            Ok(decoded) => decoded.into_bytes().map(Some),
            Err(err) => Err(err),
        };
        self.client.or_none("kv.get_raw", result)
    }

    /// Keys under a prefix.
    pub async fn keys(&self, prefix: &str, opts: &KvKeysOptions) -> Vec<String> {
        let mut req = RequestOptions::new();
        opts.base.apply(&mut req);
        req.query
            .set("keys", true)
            .set_opt("separator", opts.separator.as_deref());
        let result = self.fetch_list(prefix, req).await;
        self.client.or_empty("kv.keys", result)
    }

    /// Entries under a prefix.
    pub async fn list(&self, prefix: &str, opts: &BlockingOptions) -> Vec<KvPair> {
        let mut req = RequestOptions::new();
        opts.apply(&mut req);
        req.query.set("recurse", true);
        let result = self.fetch_list(prefix, req).await;
        self.client.or_empty("kv.list", result)
    }

    /// Write a key.
    ///
    /// Text and byte values are stored verbatim. Returns `false` when the
    /// request fails or a check-and-set / lock condition was not met.
    pub async fn put(&self, key: &str, value: impl Into<Body>, opts: &KvPutOptions) -> bool {
        let result = self
            .client
            .put(&kv_path(key), Some(value.into()), opts.to_request())
            .await;
        self.outcome("kv.put", result)
    }

    /// Delete a key or prefix.
    pub async fn delete(&self, key: &str, opts: &KvDeleteOptions) -> bool {
        let mut req = RequestOptions::new();
        opts.base.apply(&mut req);
        req.query
            .set_flag("recurse", opts.recurse)
            .set_opt("cas", opts.cas);
        let result = self.client.delete(&kv_path(key), None, req).await;
        self.outcome("kv.delete", result)
    }

    async fn fetch_list<T>(&self, prefix: &str, req: RequestOptions) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let decoded = self.client.get(&kv_path(prefix), req).await?;
        Ok(decoded.into_typed::<Option<Vec<T>>>()?.unwrap_or_default())
    }

    /// Writes answer `true`/`false`; anything else counts as success.
    fn outcome(&self, operation: &str, result: Result<Decoded>) -> bool {
        match result {
            Ok(Decoded::Json(Value::Bool(applied))) => applied,
            other => self.client.succeeded(operation, other),
        }
    }
}

fn kv_path(key: &str) -> String {
    format!("kv/{}", escape_key(key.trim_start_matches('/')))
}
