//! `gloo-net` transport for the authenticated client.
//!
//! Client-side (csr): real `fetch` calls raced against a timer.
//! Native builds (tests, tooling): every call fails with a transport error,
//! since there is no browser to send from.
//!
//! ERROR HANDLING
//! ==============
//! Any HTTP status comes back as `Ok`; the session layer decides what a
//! status means. Only failures to get a response at all become
//! `TransportError`.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use netops_session::error::TransportError;
use netops_session::net::{ApiRequest, ApiResponse, Transport};
use netops_session::SessionConfig;

/// Fetch-based transport bound to the configured API prefix.
#[derive(Debug, Clone)]
pub struct GlooTransport {
    base_url: String,
    timeout: Duration,
}

impl GlooTransport {
    pub fn new(config: &SessionConfig) -> Self {
        Self { base_url: config.api_base_url.clone(), timeout: config.request_timeout }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(any(test, feature = "csr"))]
fn timeout_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}

impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use futures::future::{Either, select};
            use gloo_net::http::Request;
            use gloo_timers::future::TimeoutFuture;

            let url = request.url(&self.base_url);
            let mut builder = match request.method.as_str() {
                "POST" => Request::post(&url),
                "PUT" => Request::put(&url),
                "PATCH" => Request::patch(&url),
                "DELETE" => Request::delete(&url),
                _ => Request::get(&url),
            };
            for (name, value) in &request.headers {
                if let Ok(value) = value.to_str() {
                    builder = builder.header(name.as_str(), value);
                }
            }
            let prepared = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError::InvalidUrl(e.to_string()))?;

            let send = Box::pin(prepared.send());
            let timer = Box::pin(TimeoutFuture::new(timeout_millis(self.timeout)));
            let resp = match select(send, timer).await {
                Either::Left((result, _)) => result.map_err(|e| TransportError::Connect(e.to_string()))?,
                Either::Right(((), _)) => return Err(TransportError::Timeout),
            };

            let status = http::StatusCode::from_u16(resp.status())
                .map_err(|e| TransportError::Request(e.to_string()))?;
            let body = resp.text().await.map_err(|e| TransportError::Request(e.to_string()))?;
            Ok(ApiResponse::new(status, body))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(TransportError::Request("not available outside the browser".to_owned()))
        }
    }
}
