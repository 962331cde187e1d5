//! HTTP client for list and task API requests.
//!
//! This module provides a low-level HTTP client wrapper that attaches the
//! bearer credential, checks response status, and decodes JSON payloads.

use super::error::{ApiError, ApiResult};
use log::*;
use reqwest::{Method, Response};
use serde::{de::DeserializeOwned, Serialize};

/// Makes authorized requests and tries to conform response data to the
/// requested model.
///
#[derive(Clone)]
pub struct Client {
    pub(crate) access_token: String,
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given access token and base URL.
    ///
    pub fn new(access_token: &str, base_url: &str) -> Self {
        Client {
            access_token: access_token.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Return the decoded body of a GET request to the path.
    ///
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.call::<()>(Method::GET, path, None).await?;
        Self::decode(response).await
    }

    /// Send a JSON body with the given method, discarding the response body.
    ///
    pub async fn send_discard<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<()> {
        self.call(method, path, body).await?;
        Ok(())
    }

    /// Make request and return the successful response or error.
    ///
    async fn call<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<Response> {
        let request_url = format!("{}/{}", &self.base_url, path.trim_start_matches('/'));
        trace!("{} {}", method, request_url);

        let mut request = self
            .http_client
            .request(method, &request_url)
            .header("Authorization", format!("Bearer {}", &self.access_token));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Unable to read response"));
            error!(
                "API request to {} failed with status {}: {}",
                request_url, status, message
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Decode a response body, logging the raw payload when it does not fit.
    ///
    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            error!(
                "Failed to deserialize API response: {}. Response body: {}",
                e,
                String::from_utf8_lossy(&bytes)
            );
            ApiError::from(e)
        })
    }
}
