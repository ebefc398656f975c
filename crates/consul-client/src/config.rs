//! Client configuration.
//!
//! A [`ClientConfig`] can be built in code, deserialized from any serde
//! format, or read from the standard `CONSUL_*` environment variables.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::options::TOKEN_HEADER;
use crate::request::QueryParams;

/// Default agent host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default agent HTTP port.
pub const DEFAULT_PORT: u16 = 8500;

/// Connection settings shared by every endpoint group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Agent host name or address.
    pub host: String,
    /// Agent HTTP port.
    pub port: u16,
    /// Use `https` instead of `http`.
    pub secure: bool,
    /// ACL token sent as `X-Consul-Token` on every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Default datacenter (`dc`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<String>,
    /// Default namespace (`ns`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Default admin partition (`partition`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    /// Extra headers sent on every request.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            secure: false,
            token: None,
            datacenter: None,
            namespace: None,
            partition: None,
            headers: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Read configuration from the process environment.
    ///
    /// Recognized variables: `CONSUL_HTTP_ADDR`, `CONSUL_HTTP_TOKEN`,
    /// `CONSUL_HTTP_SSL`, `CONSUL_DATACENTER`, `CONSUL_NAMESPACE`,
    /// `CONSUL_PARTITION`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ssl) = lookup("CONSUL_HTTP_SSL") {
            config.secure = parse_bool("CONSUL_HTTP_SSL", &ssl)?;
        }
        if let Some(addr) = lookup("CONSUL_HTTP_ADDR") {
            config.apply_address(&addr)?;
        }

        config.token = lookup("CONSUL_HTTP_TOKEN").filter(|v| !v.is_empty());
        config.datacenter = lookup("CONSUL_DATACENTER").filter(|v| !v.is_empty());
        config.namespace = lookup("CONSUL_NAMESPACE").filter(|v| !v.is_empty());
        config.partition = lookup("CONSUL_PARTITION").filter(|v| !v.is_empty());

        Ok(config)
    }

    /// Apply an address of the form `host`, `host:port` or
    /// `scheme://host:port`.
    pub fn apply_address(&mut self, addr: &str) -> Result<()> {
        let rest = if let Some(rest) = addr.strip_prefix("https://") {
            self.secure = true;
            rest
        } else if let Some(rest) = addr.strip_prefix("http://") {
            self.secure = false;
            rest
        } else if addr.contains("://") {
            return Err(Error::Config(format!("unsupported scheme in address '{addr}'")));
        } else {
            addr
        };
        let rest = rest.trim_end_matches('/');

        let parse_port = |port: &str| {
            port.parse::<u16>()
                .map_err(|_| Error::Config(format!("invalid port in address '{addr}'")))
        };

        if let Some(bracketed) = rest.strip_prefix('[') {
            // [v6] or [v6]:port
            let (host, tail) = bracketed.split_once(']').ok_or_else(|| {
                Error::Config(format!("unterminated IPv6 host in address '{addr}'"))
            })?;
            if let Some(port) = tail.strip_prefix(':') {
                self.port = parse_port(port)?;
            } else if !tail.is_empty() {
                return Err(Error::Config(format!("invalid address '{addr}'")));
            }
            self.host = host.to_string();
        } else if rest.matches(':').count() > 1 {
            // Bare IPv6 literal without a port
            self.host = rest.to_string();
        } else if let Some((host, port)) = rest.split_once(':') {
            self.port = parse_port(port)?;
            self.host = host.to_string();
        } else {
            self.host = rest.to_string();
        }

        if self.host.is_empty() {
            return Err(Error::Config(format!("missing host in address '{addr}'")));
        }
        Ok(())
    }

    /// Base URL all endpoint paths are resolved against, ending in `/v1/`.
    pub fn base_url(&self) -> Result<Url> {
        let scheme = if self.secure { "https" } else { "http" };
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        Ok(Url::parse(&format!("{scheme}://{host}:{}/v1/", self.port))?)
    }

    /// Headers sent with every request.
    pub(crate) fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            headers.insert(header_name(name)?, header_value(name, value)?);
        }
        if let Some(token) = &self.token {
            headers.insert(
                HeaderName::from_static("x-consul-token"),
                header_value(TOKEN_HEADER, token)?,
            );
        }
        Ok(headers)
    }

    /// Query parameters added to every request.
    pub(crate) fn default_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .set_opt("dc", self.datacenter.as_deref())
            .set_opt("ns", self.namespace.as_deref())
            .set_opt("partition", self.partition.as_deref());
        query
    }
}

pub(crate) fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| Error::Config(format!("invalid header name '{name}'")))
}

pub(crate) fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| Error::Config(format!("invalid value for header '{name}'")))
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "" | "0" | "false" | "no" => Ok(false),
        other => Err(Error::Config(format!("{var}: expected a boolean, got '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8500);
        assert!(!config.secure);
        assert_eq!(config.base_url().unwrap().as_str(), "http://localhost:8500/v1/");
    }

    #[test]
    fn test_secure_base_url() {
        let config = ClientConfig {
            host: "consul.internal".to_string(),
            port: 8501,
            secure: true,
            ..Default::default()
        };
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://consul.internal:8501/v1/"
        );
    }

    #[test]
    fn test_ipv6_hosts_are_bracketed() {
        let config = ClientConfig {
            host: "::1".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_url().unwrap().as_str(), "http://[::1]:8500/v1/");

        let mut config = ClientConfig::default();
        config.apply_address("::1").unwrap();
        assert_eq!(config.host, "::1");
        assert_eq!(config.port, 8500);

        config.apply_address("http://[fe80::2]:8600").unwrap();
        assert_eq!(config.host, "fe80::2");
        assert_eq!(config.port, 8600);
        assert_eq!(config.base_url().unwrap().as_str(), "http://[fe80::2]:8600/v1/");
    }

    #[test]
    fn test_from_env() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("CONSUL_HTTP_ADDR", "https://10.0.0.5:8501"),
            ("CONSUL_HTTP_TOKEN", "abc"),
            ("CONSUL_DATACENTER", "dc2"),
            ("CONSUL_NAMESPACE", ""),
        ]))
        .unwrap();

        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.port, 8501);
        assert!(config.secure);
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.datacenter.as_deref(), Some("dc2"));
        assert_eq!(config.namespace, None);
    }

    #[test]
    fn test_from_env_ssl_flag_and_bare_host() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("CONSUL_HTTP_ADDR", "agent.local"),
            ("CONSUL_HTTP_SSL", "true"),
        ]))
        .unwrap();
        assert_eq!(config.host, "agent.local");
        assert_eq!(config.port, 8500);
        assert!(config.secure);
    }

    #[test]
    fn test_from_env_rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup(&[("CONSUL_HTTP_ADDR", "host:notaport")]));
        assert!(matches!(err, Err(Error::Config(_))));

        let err = ClientConfig::from_lookup(lookup(&[("CONSUL_HTTP_SSL", "maybe")]));
        assert!(matches!(err, Err(Error::Config(_))));

        let err = ClientConfig::from_lookup(lookup(&[("CONSUL_HTTP_ADDR", "unix:///tmp/consul.sock")]));
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn test_default_headers_include_token() {
        let mut config = ClientConfig {
            token: Some("T".to_string()),
            ..Default::default()
        };
        config.headers.insert("X-Request-Source".to_string(), "tests".to_string());

        let headers = config.default_headers().unwrap();
        assert_eq!(headers.get("x-consul-token").unwrap(), "T");
        assert_eq!(headers.get("x-request-source").unwrap(), "tests");
    }

    #[test]
    fn test_default_query() {
        let config = ClientConfig {
            datacenter: Some("dc1".to_string()),
            partition: Some("web".to_string()),
            ..Default::default()
        };
        let query = config.default_query();
        let pairs: Vec<_> = query.pairs().collect();
        assert_eq!(pairs, vec![("dc", "dc1"), ("partition", "web")]);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"host": "x", "token": "T"}"#).unwrap();
        assert_eq!(config.host, "x");
        assert_eq!(config.port, 8500);
        assert_eq!(config.token.as_deref(), Some("T"));
    }
}
