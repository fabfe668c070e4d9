//! HTTP client for the bonsai club API.

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::catalog::{Event, Resource};
use crate::contact::ContactRequest;
use crate::web::dto::{ContactResponse, HealthResponse};
use crate::web::ErrorBody;

/// Message reported when the server cannot be reached.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Unable to connect to the server. Please check your connection.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors returned by [`ApiClient`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided error message, or a generic one.
        message: String,
    },

    /// The response body was not what the endpoint promises.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The base URL or an endpoint path could not be parsed.
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Client for the bonsai club API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://localhost:5000/api`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Network)?;
        Self::with_http_client(base_url, http)
    }

    /// Create a client that reuses an existing reqwest client.
    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url)?;
        // Url::join replaces the last segment unless the path ends in a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { http, base })
    }

    /// API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path)?)
    }

    /// POST /contact
    pub async fn submit_contact(
        &self,
        request: &ContactRequest,
    ) -> Result<ContactResponse, ClientError> {
        let url = self.endpoint("contact")?;
        tracing::debug!(%url, "Submitting contact form");
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(ClientError::Network)?;
        Self::decode(response).await
    }

    /// GET /events
    pub async fn fetch_events(&self) -> Result<Vec<Event>, ClientError> {
        self.get_json(self.endpoint("events")?).await
    }

    /// GET /resources, optionally filtered by category.
    pub async fn fetch_resources(&self, category: Option<&str>) -> Result<Vec<Resource>, ClientError> {
        let mut url = self.endpoint("resources")?;
        if let Some(category) = category {
            url.query_pairs_mut().append_pair("category", category);
        }
        self.get_json(url).await
    }

    /// GET /resources/categories
    pub async fn fetch_resource_categories(&self) -> Result<Vec<String>, ClientError> {
        self.get_json(self.endpoint("resources/categories")?).await
    }

    /// GET /health
    pub async fn check_health(&self) -> Result<HealthResponse, ClientError> {
        self.get_json(self.endpoint("health")?).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ClientError::Network)?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                ClientError::Decode(e.to_string())
            } else {
                ClientError::Network(e)
            }
        })
    }

    async fn status_error(status: StatusCode, response: Response) -> ClientError {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("Request failed with status {}", status.as_u16()));
        ClientError::Status {
            status: status.as_u16(),
            message,
        }
    }
}
