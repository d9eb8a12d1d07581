//! # HTTP Client Utilities
//!
//! Shared HTTP client for routing provider adapters.
//!
//! This module provides a reusable HTTP client wrapper with:
//! - A configurable per-request timeout
//! - JSON deserialization of provider bodies, including error bodies
//! - Mapping of transport failures to [`ProviderError`]
//!
//! Routing services such as OSRM describe rejected input in a JSON body
//! sent with a 4xx status, so the body is decoded before the status is
//! considered.
//!
//! # Examples
//!
//! ```ignore
//! use route_service::infrastructure::routing::http_client::HttpClient;
//!
//! let client = HttpClient::new(2000, "route-service/0.1")?;
//! let response: MyResponse = client
//!     .get_with_params("http://localhost:5000/route/v1/driving/0,0;1,1", &[("overview", "false")])
//!     .await?;
//! ```

use crate::infrastructure::routing::error::{ProviderError, ProviderResult};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for routing providers.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout and user agent.
    ///
    /// Every request carries `Accept: application/json`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Transport` if the client cannot be created.
    pub fn new(timeout_ms: u64, user_agent: &str) -> ProviderResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| ProviderError::transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request with query parameters and deserializes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Timeout` if the request exceeds the timeout,
    /// `ProviderError::Transport` on connection failures or a non-JSON error
    /// status, and `ProviderError::Decode` if a success body cannot be parsed.
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> ProviderResult<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(&e))?;

        self.handle_response(response).await
    }

    /// Reads the body and decodes it, falling back to the status on failure.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ProviderResult<T> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_reqwest_error(&e))?;

        match serde_json::from_str::<T>(&body) {
            Ok(decoded) => Ok(decoded),
            Err(e) if status.is_success() => Err(ProviderError::decode(e.to_string())),
            Err(_) => Err(ProviderError::transport_with_status(
                format!("HTTP error ({}): {}", status, truncate(&body, 256)),
                status.as_u16(),
            )),
        }
    }

    /// Maps a reqwest error to a ProviderError.
    fn map_reqwest_error(&self, error: &reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::timeout(self.timeout_ms)
        } else if error.is_connect() {
            ProviderError::transport(format!("connection failed: {}", error))
        } else if error.is_decode() {
            ProviderError::decode(error.to_string())
        } else {
            ProviderError::transport(format!("HTTP request failed: {}", error))
        }
    }
}

fn truncate(body: &str, max_chars: usize) -> &str {
    match body.char_indices().nth(max_chars) {
        Some((end, _)) => body.get(..end).unwrap_or(body),
        None => body,
    }
}
