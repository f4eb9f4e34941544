//! HTTP client implementation

use reqwest::{header, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::errors::ConsoleError;

/// Tenant scoping header expected by the remote service
const TENANT_HEADER: &str = "X-Tenant-Id";

/// HTTP client for the remote environment-management API
pub struct RemoteClient {
    client: Client,
    base_url: String,
}

impl RemoteClient {
    /// Create a new remote API client
    pub fn new(base_url: &str) -> Result<Self, ConsoleError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        tenant: &str,
    ) -> Result<T, ConsoleError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(TENANT_HEADER, tenant)
            .send()
            .await?;

        let response = Self::check_status("GET", response).await?;
        let body = response.json().await?;
        Ok(body)
    }

    /// Make a GET request and return the body verbatim
    pub async fn get_raw(&self, path: &str, tenant: &str) -> Result<String, ConsoleError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} (raw)", url);

        let response = self
            .client
            .get(&url)
            .header(TENANT_HEADER, tenant)
            .send()
            .await?;

        let response = Self::check_status("GET", response).await?;
        let body = response.text().await?;
        Ok(body)
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        tenant: &str,
        body: &B,
    ) -> Result<T, ConsoleError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(TENANT_HEADER, tenant)
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let response = Self::check_status("POST", response).await?;
        let body = response.json().await?;
        Ok(body)
    }

    /// Make a PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        tenant: &str,
        body: &B,
    ) -> Result<T, ConsoleError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .header(TENANT_HEADER, tenant)
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let response = Self::check_status("PUT", response).await?;
        let body = response.json().await?;
        Ok(body)
    }

    /// Map remote status codes onto the console error taxonomy
    async fn check_status(method: &str, response: Response) -> Result<Response, ConsoleError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        error!("HTTP {} {} failed: {} - {}", method, url, status, body);

        match status {
            StatusCode::NOT_FOUND => Err(ConsoleError::NotFound(body)),
            StatusCode::CONFLICT => Err(ConsoleError::Conflict(body)),
            _ => Err(ConsoleError::RemoteError {
                status: status.as_u16(),
                body,
            }),
        }
    }
}
