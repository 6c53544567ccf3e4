//! HTTP layer
//!
//! [`HttpClient`] executes [`ApiRequest`] templates against the Tracker API
//! base URL and decodes JSON responses.

mod client;
mod request;

pub use client::{ClientConfig, ClientConfigBuilder, HttpClient, DEFAULT_BASE_URL, TOKEN_HEADER};
pub use request::ApiRequest;
