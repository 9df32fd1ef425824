//! The four product operations as async calls.
//!
//! # Design
//! `ProductApi` glues `ProductClient` to a `Transport`: build the request,
//! execute it, parse the response. No retries and no caching happen here;
//! every failure goes straight back to the caller. Writes are checked
//! against the form rules first so an invalid payload never reaches the
//! network.

use tracing::{debug, warn};

use crate::client::ProductClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Product, ProductForm, ProductId};

#[derive(Debug, Clone)]
pub struct ProductApi<T> {
    client: ProductClient,
    transport: T,
}

impl<T: Transport> ProductApi<T> {
    pub fn new(client: ProductClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ProductClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the whole collection in service order.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.send(self.client.build_list_products()).await?;
        self.client.parse_list_products(response)
    }

    /// Submit a draft and return the record as acknowledged by the service.
    pub async fn create_product(&self, draft: &ProductForm) -> Result<Product, ApiError> {
        draft.check().map_err(ApiError::Validation)?;
        let response = self.send(self.client.build_create_product(draft)?).await?;
        self.client.parse_create_product(response)
    }

    /// Replace the stored record identified by `product.id`.
    pub async fn update_product(&self, product: &Product) -> Result<Product, ApiError> {
        ProductForm::from(product)
            .check()
            .map_err(ApiError::Validation)?;
        let response = self.send(self.client.build_update_product(product)?).await?;
        self.client.parse_update_product(response)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<bool, ApiError> {
        let response = self.send(self.client.build_delete_product(id)).await?;
        self.client.parse_delete_product(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        debug!(%method, %path, "sending request");
        match self.transport.execute(request).await {
            Ok(response) => {
                debug!(%method, %path, status = response.status, "received response");
                Ok(response)
            }
            Err(e) => {
                warn!(%method, %path, error = %e, "request failed");
                Err(e)
            }
        }
    }
}
