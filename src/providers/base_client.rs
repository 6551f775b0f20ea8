use crate::core::error::ChatError;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;

/// Thin JSON-over-HTTPS client shared by providers.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    endpoint: String,
    api_key: String,
    extra_headers: Vec<(String, String)>,
}

impl HttpClient {
    pub fn new(
        endpoint: String,
        api_key: String,
        extra_headers: Vec<(String, String)>,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            extra_headers,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POSTs `payload` to `path`; non-2xx statuses are turned into errors.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, ChatError> {
        let url = format!("{}/{}", self.endpoint, path);

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json");

        for (key, value) in &self.extra_headers {
            request = request.header(key, value);
        }

        let response = request.json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api(format!("{} returned {}: {}", url, status, body)));
        }

        Ok(response)
    }
}
