//! HTTP client for the Biblio backend
//!
//! Every request reads the bearer credential from the configured
//! [`CredentialStore`] and attaches it when present. Nothing is retried;
//! failures are returned to the caller as-is.

mod ai;
mod auth;
mod library;

pub use auth::{flatten_error_detail, AuthSession};
pub use library::Dashboard;

use crate::catalog::CatalogSource;
use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::error::{BiblioError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Status and decoded JSON body of a successful response
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub status: u16,

    /// `Value::Null` when the body was empty or not JSON
    pub body: serde_json::Value,
}

/// A list either returned bare or wrapped in an object
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(
            alias = "recommendations",
            alias = "results",
            alias = "books",
            alias = "borrowings",
            alias = "reviews"
        )]
        items: Vec<T>,
    },
}

impl<T> ListBody<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) | ListBody::Wrapped { items } => items,
        }
    }
}

/// API client for the backend endpoints
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Create a client from configuration and a credential provider
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BiblioError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            credentials,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The credential provider this client reads from
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Current bearer token
    ///
    /// A storage failure is logged and treated as "no credential"; a request
    /// is never failed because the token could not be read.
    async fn bearer(&self) -> Option<String> {
        match self.credentials.get().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Ignoring unreadable credential: {}", e);
                None
            }
        }
    }

    /// Start a request with the bearer credential attached
    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.url(path);
        tracing::debug!("{} {}", method, url);

        let req = self.http.request(method, url);
        match self.bearer().await {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send a request, mapping transport failures to `Network`
    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        req.send().await.map_err(|e| {
            if e.is_timeout() {
                BiblioError::Network(format!("request timed out: {}", e))
            } else {
                BiblioError::Network(e.to_string())
            }
        })
    }

    /// Turn a non-2xx response into `Http`
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(BiblioError::Http {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// GET a path and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let req = self.request(Method::GET, path).await;
        let response = Self::check_status(self.send(req).await?).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BiblioError::Decode(e.to_string()))
    }

    /// POST a JSON body and decode the JSON response
    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let req = self.request(Method::POST, path).await.json(body);
        let response = Self::check_status(self.send(req).await?).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BiblioError::Decode(e.to_string()))
    }

    /// Fetch the raw catalog (`GET /books`)
    ///
    /// The body is returned uninterpreted; deciding whether it holds usable
    /// records is the catalog loader's job. A 2xx body that is empty or not
    /// JSON at all (a proxy's HTML page, say) comes back as `Value::Null`.
    pub async fn fetch_catalog(&self) -> Result<ResponseEnvelope> {
        let req = self.request(Method::GET, "/books").await;
        let response = Self::check_status(self.send(req).await?).await?;
        let status = response.status().as_u16();

        let bytes = response.bytes().await?;
        let body = match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(body) => body,
            Err(e) => {
                if !bytes.iter().all(u8::is_ascii_whitespace) {
                    tracing::debug!("Catalog body is not JSON: {}", e);
                }
                serde_json::Value::Null
            }
        };

        Ok(ResponseEnvelope { status, body })
    }
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn fetch_catalog(&self) -> Result<ResponseEnvelope> {
        ApiClient::fetch_catalog(self).await
    }
}
