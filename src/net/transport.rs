//! Network seam under the authenticated client.

use std::future::Future;

use super::request::{ApiRequest, ApiResponse};
use crate::error::TransportError;

/// Sends one request and resolves with whatever the server answered.
///
/// Every HTTP response, whatever its status, is `Ok`; `Err` means no
/// response arrived (timeout, refused connection, malformed URL).
pub trait Transport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, TransportError>>;
}

#[cfg(feature = "native")]
pub use native::HttpTransport;

#[cfg(feature = "native")]
mod native {
    use std::time::Duration;

    use super::Transport;
    use crate::config::SessionConfig;
    use crate::error::TransportError;
    use crate::net::request::{ApiRequest, ApiResponse};

    /// reqwest-backed transport with a per-request timeout.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        http: reqwest::Client,
        base_url: String,
        timeout: Duration,
    }

    impl HttpTransport {
        #[must_use]
        pub fn new(config: &SessionConfig) -> Self {
            Self::with_client(reqwest::Client::new(), config)
        }

        #[must_use]
        pub fn with_client(http: reqwest::Client, config: &SessionConfig) -> Self {
            Self { http, base_url: config.api_base_url.clone(), timeout: config.request_timeout }
        }

        #[must_use]
        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }

    impl Transport for HttpTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            let url = request.url(&self.base_url);
            let mut builder = self
                .http
                .request(request.method, &url)
                .headers(request.headers)
                .timeout(self.timeout);
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let resp = builder.send().await.map_err(classify)?;
            let status = resp.status();
            let headers = resp.headers().clone();
            let body = resp.text().await.map_err(classify)?;
            Ok(ApiResponse { status, headers, body })
        }
    }

    fn classify(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::InvalidUrl(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}
