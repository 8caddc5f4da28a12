//! `Transport` implementation backed by a blocking `ureq` agent.
//!
//! The agent keeps a cookie jar, so cookies set by the server are sent
//! back on later requests. Status codes are returned as data rather than
//! errors. Each call runs on tokio's blocking pool; if the client's timer
//! wins the race the blocking call still runs to completion and its result
//! is dropped.
//!
//! Response bodies are read up to [`MAX_BODY_BYTES`], well above ureq's
//! 10 MB default; anything larger fails as `ApiError::Transport`.

use ureq::{Agent, RequestBuilder};

use crate::error::ApiError;
use crate::http::{Credentials, HttpMethod, HttpRequest, HttpResponse, RedirectPolicy, Transport};

/// Largest response body the transport will read.
pub const MAX_BODY_BYTES: u64 = 512 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        Self { agent: new_agent() }
    }
}

impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = match request.credentials {
            Credentials::Include => self.agent.clone(),
            Credentials::Omit => new_agent(),
        };
        tokio::task::spawn_blocking(move || execute(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(format!("transport task failed: {e}")))?
    }
}

fn new_agent() -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

/// Execute `request` with `agent` and collect the response as plain data.
fn execute(agent: &Agent, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let HttpRequest {
        method,
        url,
        headers,
        body,
        redirect,
        ..
    } = request;
    tracing::debug!(%method, %url, "executing request");

    let result = match (method, body) {
        (HttpMethod::Get | HttpMethod::Delete, Some(_)) => {
            return Err(ApiError::Transport(format!(
                "request with {method} method cannot have a body"
            )));
        }
        (HttpMethod::Get, None) => prepare(agent.get(&url), &headers, redirect).call(),
        (HttpMethod::Delete, None) => prepare(agent.delete(&url), &headers, redirect).call(),
        (HttpMethod::Post, Some(body)) => prepare(agent.post(&url), &headers, redirect).send(body.as_bytes()),
        (HttpMethod::Post, None) => prepare(agent.post(&url), &headers, redirect).send_empty(),
        (HttpMethod::Put, Some(body)) => prepare(agent.put(&url), &headers, redirect).send(body.as_bytes()),
        (HttpMethod::Put, None) => prepare(agent.put(&url), &headers, redirect).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    if redirect == RedirectPolicy::Error && (300..400).contains(&status) {
        return Err(ApiError::Transport(format!("unexpected redirect ({status}) from {url}")));
    }

    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    let body = response
        .body_mut()
        .with_config()
        .limit(MAX_BODY_BYTES)
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    Ok(HttpResponse { status, headers, body })
}

fn prepare<B>(builder: RequestBuilder<B>, headers: &[(String, String)], redirect: RedirectPolicy) -> RequestBuilder<B> {
    let builder = headers
        .iter()
        .fold(builder, |builder, (name, value)| builder.header(name.as_str(), value.as_str()));
    match redirect {
        RedirectPolicy::Follow => builder,
        RedirectPolicy::Error | RedirectPolicy::Manual => builder.config().max_redirects(0).build(),
    }
}
