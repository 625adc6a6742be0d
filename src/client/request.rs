use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

use super::ClientError;

/// Shape of a failure body: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Extract the server's message, if the body carries a non-empty one.
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()?
        .error
        .filter(|m| !m.is_empty())
}

/// The one request/response convention shared by every facade.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: Client,
    base_url: String,
}

impl Transport {
    pub(crate) fn new(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send `request` and hand back the response if its status is in the
    /// success range. Otherwise the body's `error` field, or `fallback`,
    /// becomes the `Api` message.
    pub(crate) async fn execute(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<Response, ClientError> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        log::debug!("{} {}", method, url);

        let response = self.http.execute(request).await.map_err(|e| {
            log::warn!("{} {} did not complete: {}", method, url, e);
            ClientError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| fallback.to_string());
        log::warn!("{} {} -> {}: {}", method, url, status, message);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
