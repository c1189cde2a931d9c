//! HTTP client for the demo store's catalog and sign-in endpoints.
//!
//! The client never validates responses: every call returns the raw status
//! and body as an [`ApiResponse`] for the caller to assert on. Only transport
//! failures (connection refused, timeout) are errors.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::SuiteConfig;
use crate::logging::ComponentLogger;
use crate::result::StoreResult;

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors raised by [`StoreClient`]
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be completed
    #[error("{method} {url} failed: {message}")]
    Http {
        method: String,
        url: String,
        message: String,
    },

    /// The response body is not the expected JSON
    #[error("Unexpected response body: {message}")]
    Decode { message: String },
}

impl ApiError {
    fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

/// Raw status and body of one API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Parse the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(ApiError::decode)
    }

    /// Products of a catalog response.
    ///
    /// Accepts both a bare array and `{"products": [...]}`.
    pub fn products(&self) -> Result<Vec<Product>, ApiError> {
        match self.json::<CatalogPayload>()? {
            CatalogPayload::Wrapped { products } | CatalogPayload::Bare(products) => Ok(products),
        }
    }

    /// Error text of a failed call (`errorMessage`, `message` or `error`)
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        let value: Value = serde_json::from_str(&self.body).ok()?;
        ["errorMessage", "message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::to_string)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    Wrapped { products: Vec<Product> },
    Bare(Vec<Product>),
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub currency_format: Option<String>,
    #[serde(default)]
    pub available_sizes: Vec<String>,
}

impl Product {
    /// Names of required fields that are missing or blank: a readable
    /// `title`, a non-null non-empty `price` and a `description`
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            missing.push("title");
        }
        match &self.price {
            None | Some(Value::Null) => missing.push("price"),
            Some(Value::String(s)) if s.is_empty() => missing.push("price"),
            Some(_) => {}
        }
        if self.description.as_deref().map_or(true, str::is_empty) {
            missing.push("description");
        }
        missing
    }
}

/// Catalog and sign-in client
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
    base_url: String,
    logger: ComponentLogger,
}

impl StoreClient {
    /// Client rooted at `base_url` (trailing slashes are trimmed)
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Http {
                method: "BUILD".to_string(),
                url: base_url.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            logger: ComponentLogger::new("StoreClient"),
        })
    }

    /// Client for the configured `api_base_url`
    pub fn from_config(config: &SuiteConfig) -> StoreResult<Self> {
        Ok(Self::new(&config.api_base_url()?)?)
    }

    #[must_use]
    pub fn with_logger(mut self, logger: ComponentLogger) -> Self {
        self.logger = logger;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /products`
    pub async fn list_products(&self) -> Result<ApiResponse, ApiError> {
        self.request(Method::GET, "/products", None).await
    }

    /// `POST /signin` with `{"userName", "password"}`
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<ApiResponse, ApiError> {
        let payload = json!({ "userName": username, "password": password });
        self.request(Method::POST, "/signin", Some(&payload)).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let mut builder = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let transport = |e: reqwest::Error| ApiError::Http {
            method: method.to_string(),
            url: url.clone(),
            message: e.to_string(),
        };
        let response = builder.send().await.map_err(transport)?;
        let status = response.status().as_u16();
        self.logger.info(format_args!("{method} {url} -> {status}"));
        let body = response.text().await.map_err(transport)?;
        Ok(ApiResponse { status, body })
    }
}
