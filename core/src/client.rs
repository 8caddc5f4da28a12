//! The requester: URL building, query encoding, and the timeout race.
//!
//! # Design
//! `ApiClient` owns its config, its fetch defaults and a `Transport`.
//! `build_request` is pure and produces the exact `HttpRequest` the transport
//! will see. `request` then races the transport against a timer; whichever
//! finishes first decides the outcome. The losing future is dropped and
//! nothing it might later produce is observed.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::options::{FetchDefaults, FetchOptions, RequestOptions};

/// Characters left alone by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    config: ClientConfig,
    defaults: FetchDefaults,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            defaults: FetchDefaults::default(),
            transport,
        }
    }

    /// Replace the baseline options every request is merged onto.
    pub fn with_defaults(mut self, defaults: FetchDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request `request` would send, without sending it.
    pub fn build_request(&self, path: &str, options: RequestOptions) -> Result<HttpRequest, ApiError> {
        let FetchOptions {
            method,
            credentials,
            redirect,
            headers,
            params,
            body,
        } = options.merge(&self.defaults);

        let mut url = prefixed_url(&self.config.api_prefix, path);
        if method == HttpMethod::Get {
            if let Some(params) = params {
                append_query(&mut url, &params);
            }
        }

        let body = body
            .filter(is_present)
            .map(|value| serde_json::to_string(&value))
            .transpose()
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
            credentials,
            redirect,
        })
    }

    /// Send a request and decode the JSON body as `R`.
    ///
    /// Fails with `ApiError::Timeout` if the configured timeout elapses
    /// first. The envelope `code` is not inspected.
    pub async fn request<R: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<R, ApiError> {
        let request = self.build_request(path, options)?;
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        let exchange = async {
            let response = self.transport.send(request).await?;
            tracing::debug!(%method, %url, status = response.status, "response received");
            decode(&response)
        };

        tokio::select! {
            result = exchange => result,
            () = tokio::time::sleep(self.config.timeout) => {
                tracing::warn!(%method, %url, timeout = ?self.config.timeout, "request timed out");
                Err(ApiError::Timeout)
            }
        }
    }

    /// `request` with the method forced to GET.
    pub async fn get<R: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<R, ApiError> {
        self.request(path, options.method(HttpMethod::Get)).await
    }

    /// `request` with the method forced to POST.
    pub async fn post<R: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<R, ApiError> {
        self.request(path, options.method(HttpMethod::Post)).await
    }
}

fn prefixed_url(prefix: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{prefix}{path}")
    } else {
        format!("{prefix}/{path}")
    }
}

/// Append `key=value` pairs, keys verbatim and values percent-encoded.
/// A present but empty list still appends the separator.
fn append_query(url: &mut String, params: &[(String, String)]) {
    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", utf8_percent_encode(value, URI_COMPONENT)))
        .collect::<Vec<_>>()
        .join("&");
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(&query);
}

/// `null` and `""` count as no body at all.
fn is_present(body: &serde_json::Value) -> bool {
    !matches!(body, serde_json::Value::Null) && body.as_str() != Some("")
}

fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
