//! Request descriptors and response decoding.

use std::borrow::Cow;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};

pub(crate) const CONTENT_TYPE_JSON: &str = "application/json";
pub(crate) const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";

// ─────────────────────────────────────────────────────────────────────────────
// Query parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Value of a single query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// One `key=value` entry.
    Single(String),
    /// One `key=value` entry per element, in order.
    Multi(Vec<String>),
    /// The key is omitted entirely.
    Absent,
}

/// Ordered query-parameter mapping.
///
/// Inserting a key that already exists replaces its value in place, so the
/// original position is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a key.
    pub fn insert(&mut self, key: impl Into<String>, value: QueryValue) -> &mut Self {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Insert a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.insert(key, QueryValue::Single(value.to_string()))
    }

    /// Insert a value when present; `None` leaves the mapping untouched.
    pub fn set_opt<T: ToString>(&mut self, key: impl Into<String>, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Insert `key=true` when the flag is set.
    pub fn set_flag(&mut self, key: impl Into<String>, flag: bool) -> &mut Self {
        if flag {
            self.set(key, true);
        }
        self
    }

    /// Insert a repeated key, one entry per element.
    pub fn set_all<I, T>(&mut self, key: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        if !values.is_empty() {
            self.insert(key, QueryValue::Multi(values));
        }
        self
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether the key is present (including as [`QueryValue::Absent`]).
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Merge `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: &QueryParams) {
        for (key, value) in &other.entries {
            self.insert(key.clone(), value.clone());
        }
    }

    /// Iterate over the wire entries, expanding sequences and skipping
    /// absent values.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(key, value)| {
            let values: Vec<&str> = match value {
                QueryValue::Single(v) => vec![v.as_str()],
                QueryValue::Multi(vs) => vs.iter().map(String::as_str).collect(),
                QueryValue::Absent => Vec::new(),
            };
            values.into_iter().map(move |v| (key.as_str(), v))
        })
    }

    /// Append the wire entries to a URL's query string.
    pub fn append_to(&self, url: &mut Url) {
        let mut pairs = self.pairs().peekable();
        if pairs.peek().is_none() {
            return;
        }
        let mut query = url.query_pairs_mut();
        for (key, value) in pairs {
            query.append_pair(key, value);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Path segments
// ─────────────────────────────────────────────────────────────────────────────

/// Percent-encode one caller-supplied path segment, including any `/`.
pub(crate) fn escape_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

/// Percent-encode a key whose `/` separators are kept, e.g. a KV key.
pub(crate) fn escape_key(key: &str) -> String {
    key.split('/')
        .map(escape_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether a relative path contains a `.` or `..` segment.
pub(crate) fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment == "." || segment == "..")
}

// ─────────────────────────────────────────────────────────────────────────────
// Request options
// ─────────────────────────────────────────────────────────────────────────────

/// How a successful response body should be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseKind {
    /// Parse as JSON, falling back to text when parsing fails.
    #[default]
    Json,
    /// UTF-8 text.
    Text,
    /// Raw bytes.
    Bytes,
    /// Binary blob; decoded the same way as [`ResponseKind::Bytes`].
    Blob,
}

/// Per-call request options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters.
    pub query: QueryParams,
    /// Header overrides; these win over the client's default headers.
    pub headers: Vec<(String, String)>,
    /// Desired response shape.
    pub response: ResponseKind,
}

impl RequestOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query parameters.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Add a header override.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Set the response shape.
    pub fn with_response(mut self, response: ResponseKind) -> Self {
        self.response = response;
        self
    }

    pub(crate) fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.headers.push((name, value)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bodies
// ─────────────────────────────────────────────────────────────────────────────

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Structured value, sent as JSON text.
    Json(Value),
    /// Text sent verbatim.
    Text(String),
    /// Bytes sent verbatim.
    Bytes(Vec<u8>),
}

impl Body {
    /// Serialize any value into a JSON body.
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Body::Json(serde_json::to_value(value)?))
    }

    /// Content type used when the caller did not set one.
    pub fn default_content_type(&self) -> &'static str {
        match self {
            Body::Json(_) => CONTENT_TYPE_JSON,
            Body::Text(_) | Body::Bytes(_) => CONTENT_TYPE_OCTET_STREAM,
        }
    }

    pub(crate) fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Body::Json(value) => Ok(serde_json::to_vec(&value)?),
            Body::Text(text) => Ok(text.into_bytes()),
            Body::Bytes(bytes) => Ok(bytes),
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Bytes(bytes.to_vec())
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoded responses
// ─────────────────────────────────────────────────────────────────────────────

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Explicitly empty (`Content-Length: 0`) JSON response.
    Null,
    /// Parsed JSON.
    Json(Value),
    /// Text, either requested or the fallback for unparseable JSON.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl Decoded {
    /// Whether the body carries nothing: null, an empty list, or empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            Decoded::Null | Decoded::Json(Value::Null) => true,
            Decoded::Json(Value::Array(items)) => items.is_empty(),
            Decoded::Text(text) => text.is_empty(),
            Decoded::Bytes(bytes) => bytes.is_empty(),
            Decoded::Json(_) => false,
        }
    }

    /// Convert into a typed value.
    ///
    /// Absent bodies deserialize from JSON `null`, so `Option<T>` and `()`
    /// targets accept them. Fallback text is offered as a JSON string.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        let value = match self {
            Decoded::Null => Value::Null,
            Decoded::Json(value) => value,
            Decoded::Text(text) if text.is_empty() => Value::Null,
            Decoded::Text(text) => Value::String(text),
            Decoded::Bytes(_) => {
                return Err(Error::Decode(
                    "binary response cannot be converted to a typed value".to_string(),
                ));
            }
        };
        serde_json::from_value(value).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Convert into a single record.
    ///
    /// Empty responses yield `None`. A one-element list collapses to its
    /// element; any other value is converted as-is.
    pub fn into_single<T: DeserializeOwned>(self) -> Result<Option<T>> {
        if self.is_empty() {
            return Ok(None);
        }
        match self {
            Decoded::Json(Value::Array(mut items)) if items.len() == 1 => {
                Decoded::Json(items.remove(0)).into_typed().map(Some)
            }
            other => other.into_typed().map(Some),
        }
    }

    /// Take the body as bytes, whatever shape it was decoded as.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Decoded::Null => Ok(Vec::new()),
            Decoded::Bytes(bytes) => Ok(bytes),
            Decoded::Text(text) => Ok(text.into_bytes()),
            Decoded::Json(value) => Ok(serde_json::to_vec(&value)?),
        }
    }
}

/// Decode a successful response body according to the requested shape.
pub(crate) fn decode_body(kind: ResponseKind, headers: &HeaderMap, body: Vec<u8>) -> Result<Decoded> {
    match kind {
        ResponseKind::Bytes | ResponseKind::Blob => Ok(Decoded::Bytes(body)),
        ResponseKind::Text => String::from_utf8(body)
            .map(Decoded::Text)
            .map_err(|e| Error::Decode(e.to_string())),
        ResponseKind::Json => {
            if headers.get(CONTENT_LENGTH) == Some(&HeaderValue::from_static("0")) {
                return Ok(Decoded::Null);
            }
            match serde_json::from_slice(&body) {
                Ok(value) => Ok(Decoded::Json(value)),
                Err(_) => Ok(Decoded::Text(String::from_utf8_lossy(&body).into_owned())),
            }
        }
    }
}
