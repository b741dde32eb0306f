//! Authenticated REST client for a monitoring backend
//!
//! Thin wrapper over reqwest issuing one request per call against
//! `base_url + path`. Non-2xx responses surface the status, URL and
//! response body; there are no retries.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::config::BackendConfig;
use crate::error::{MigrateError, Result};

/// API client for one backend instance
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given backend
    pub fn new(backend: &BackendConfig) -> Result<Self> {
        let base_url = backend.base_url()?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("apiToken {}", backend.api_token))
            .map_err(|_| {
                MigrateError::Config("API token contains invalid header characters".to_string())
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(backend.allow_self_signed_certs)
            .build()
            .map_err(|e| MigrateError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, http })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a path, returning the decoded JSON body
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None).await
    }

    /// POST a JSON body to a path
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// PUT a JSON body to a path
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::PUT, path, Some(body)).await
    }

    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| MigrateError::Request {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| MigrateError::Request {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            // Pretty-print JSON error bodies so operators can read them
            let details = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| serde_json::to_string_pretty(&v).ok())
                .unwrap_or(text);
            return Err(MigrateError::Api {
                status: status.as_u16(),
                url,
                details,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
