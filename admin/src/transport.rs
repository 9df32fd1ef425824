//! Blocking ureq agent behind the async `Transport` seam.
//!
//! Each request runs on Tokio's blocking pool so the single-threaded UI task
//! never stalls on socket I/O.

use std::time::Duration;

use async_trait::async_trait;
use product_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};
use ureq::http::Response;
use ureq::typestate::WithBody;
use ureq::{Agent, Body, RequestBuilder};

#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Status codes are returned as data, not errors, so the client decides
    /// what a 404 or 500 means.
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

#[async_trait(?Send)]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

fn execute_blocking(agent: &Agent, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let path = request.path.as_str();
    let request_headers = request.headers.as_slice();
    let body = request.body.as_deref();

    let result = match request.method {
        HttpMethod::Get => with_headers(agent.get(path), request_headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(path), request_headers).call(),
        HttpMethod::Post => send(with_headers(agent.post(path), request_headers), body),
        HttpMethod::Put => send(with_headers(agent.put(path), request_headers), body),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            Some((name.as_str().to_string(), value.to_str().ok()?.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(builder: RequestBuilder<WithBody>, body: Option<&str>) -> Result<Response<Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
