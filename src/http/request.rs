//! Request template value object
//!
//! An [`ApiRequest`] describes one outbound call: method, path relative to
//! the client's base URL, ordered query pairs and an optional JSON body.
//! It is a plain value, so a request factory can hand the pagination cursor
//! a fresh, re-issuable copy on every invocation.

use reqwest::Method;
use serde_json::Value;

/// A single API request template
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL, e.g. `projects/99/stories`
    pub path: String,
    /// Query parameters in append order; the same key may appear more
    /// than once
    pub query: Vec<(String, String)>,
    /// Optional JSON body
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request with an arbitrary method
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Create a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST request with a JSON body
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).json(body)
    }

    /// Create a PUT request with a JSON body
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path).json(body)
    }

    /// Create a DELETE request
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Set the JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a query parameter, keeping any prior values of the same key
    pub fn append_query(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Builder form of [`append_query`](Self::append_query)
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append_query(key, value);
        self
    }

    /// Replace every occurrence of `key` with a single value
    ///
    /// Used by the pagination cursor to override `limit`/`offset` once it
    /// starts tracking them itself.
    pub fn set_query(&mut self, key: &str, value: impl Into<String>) {
        self.query.retain(|(k, _)| k != key);
        self.query.push((key.to_string(), value.into()));
    }

    /// First value for `key`, if present
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_duplicates() {
        let mut req = ApiRequest::get("projects/1/stories");
        req.append_query("with_label", "a");
        req.append_query("with_label", "b");

        assert_eq!(req.query.len(), 2);
        assert_eq!(req.query_value("with_label"), Some("a"));
    }

    #[test]
    fn test_set_query_replaces_all() {
        let mut req = ApiRequest::get("projects/1/stories")
            .query("limit", "50")
            .query("limit", "60");

        req.set_query("limit", "10");
        assert_eq!(req.query, vec![("limit".to_string(), "10".to_string())]);
    }

    #[test]
    fn test_query_value_absent() {
        let req = ApiRequest::get("projects/1/stories");
        assert_eq!(req.query_value("offset"), None);
    }
}
