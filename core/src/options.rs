//! Per-call request options and their merge onto the fixed defaults.
//!
//! # Design
//! `FetchDefaults` is the baseline every request starts from. A
//! `RequestOptions` value names only what the caller wants to change, and
//! `RequestOptions::merge` resolves the pair into a complete `FetchOptions`:
//!
//! - `method`, `credentials`, `redirect`: the caller's value wins when set.
//! - `headers`: appended after the default headers. A caller `Content-Type`
//!   replaces the default one instead of duplicating it.
//! - `params` and `body`: taken from the caller as is; the client decides
//!   how to use them.

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{Credentials, HttpMethod, RedirectPolicy};

const CONTENT_TYPE: &str = "Content-Type";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchDefaults {
    pub method: HttpMethod,
    pub credentials: Credentials,
    pub redirect: RedirectPolicy,
    pub headers: Vec<(String, String)>,
}

impl Default for FetchDefaults {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            credentials: Credentials::Include,
            redirect: RedirectPolicy::Follow,
            headers: vec![(CONTENT_TYPE.to_string(), "application/json".to_string())],
        }
    }
}

/// Caller overrides for a single request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Option<HttpMethod>,
    pub credentials: Option<Credentials>,
    pub redirect: Option<RedirectPolicy>,
    pub headers: Vec<(String, String)>,
    /// Query parameters in insertion order. Only used for GET.
    pub params: Option<Vec<(String, String)>>,
    /// Payload, JSON-encoded before it reaches the transport.
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn redirect(mut self, redirect: RedirectPolicy) -> Self {
        self.redirect = Some(redirect);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append a query parameter. The value is coerced with `ToString`.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.to_string()));
        self
    }

    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the body from any serializable value.
    pub fn json<T: Serialize>(self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.body(value))
    }

    /// Resolve these overrides against `defaults`.
    pub fn merge(self, defaults: &FetchDefaults) -> FetchOptions {
        let overrides_content_type = self
            .headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE));

        let mut headers: Vec<(String, String)> = defaults
            .headers
            .iter()
            .filter(|(name, _)| !(overrides_content_type && name.eq_ignore_ascii_case(CONTENT_TYPE)))
            .cloned()
            .collect();
        headers.extend(self.headers);

        FetchOptions {
            method: self.method.unwrap_or(defaults.method),
            credentials: self.credentials.unwrap_or(defaults.credentials),
            redirect: self.redirect.unwrap_or(defaults.redirect),
            headers,
            params: self.params,
            body: self.body,
        }
    }
}

/// Fully resolved options for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    pub method: HttpMethod,
    pub credentials: Credentials,
    pub redirect: RedirectPolicy,
    pub headers: Vec<(String, String)>,
    pub params: Option<Vec<(String, String)>>,
    pub body: Option<serde_json::Value>,
}
