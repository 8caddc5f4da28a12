//! HTTP transport types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. `ApiClient` builds an
//! `HttpRequest`, hands it to a `Transport`, and decodes whatever body comes
//! back. The transport is the only piece that touches the network, so the
//! request-building logic stays deterministic and tests can substitute an
//! in-memory transport.

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether session cookies travel with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Credentials {
    #[default]
    Include,
    Omit,
}

/// What the transport does with a 3xx response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectPolicy {
    /// Follow redirects transparently.
    #[default]
    Follow,
    /// Fail with a transport error.
    Error,
    /// Hand the 3xx response back as is.
    Manual,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub credentials: Credentials,
    pub redirect: RedirectPolicy,
}

/// An HTTP response described as plain data. `status` is informational:
/// the client decodes `body` whatever the status is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes an `HttpRequest` against the network.
///
/// Implementations must report network-level failures as
/// `ApiError::Transport` and must not interpret the status code.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display_is_uppercase() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(serde_json::to_value(HttpMethod::Post).unwrap(), "POST");
        let parsed: HttpMethod = serde_json::from_value(serde_json::json!("PUT")).unwrap();
        assert_eq!(parsed, HttpMethod::Put);
        assert!(serde_json::from_value::<HttpMethod>(serde_json::json!("get")).is_err());
    }

    #[test]
    fn defaults_match_browser_fetch_setup() {
        assert_eq!(Credentials::default(), Credentials::Include);
        assert_eq!(RedirectPolicy::default(), RedirectPolicy::Follow);
    }
}
