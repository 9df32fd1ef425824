//! Stateless HTTP request builder and response parser for the product API.
//!
//! # Design
//! `ProductClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Executing the round-trip is the `Transport`'s job, so the
//! mapping here stays deterministic and free of I/O.
//!
//! Routes, relative to the base address (which includes `/api/v1`):
//! `GET /products/`, `POST /products/`, `PUT /products/{id}`,
//! `DELETE /products/{id}`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Product, ProductForm, ProductId};

/// Base address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Synchronous, stateless client for the product API.
#[derive(Debug, Clone)]
pub struct ProductClient {
    base_url: String,
}

impl Default for ProductClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ProductClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_products(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/products/", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The body is the form itself, so it never carries an `id`.
    pub fn build_create_product(&self, draft: &ProductForm) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/products/", self.base_url),
            headers: json_headers(),
            body: Some(to_json(draft)?),
        })
    }

    pub fn build_update_product(&self, product: &Product) -> Result<HttpRequest, ApiError> {
        let id = product.id.ok_or(ApiError::MissingId)?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/products/{id}", self.base_url),
            headers: json_headers(),
            body: Some(to_json(product)?),
        })
    }

    pub fn build_delete_product(&self, id: ProductId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/products/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_update_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// An empty 2xx body counts as success; otherwise the body must be a
    /// JSON boolean.
    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<bool, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(true);
        }
        from_json(&response.body)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound {
            body: response.body.clone(),
        });
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
