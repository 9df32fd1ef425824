//! The host-provided half of a request round-trip.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes an `HttpRequest` and returns whatever the service answered.
///
/// Implementations report non-2xx statuses as ordinary `HttpResponse`
/// values; only failures that produced no response at all map to
/// `ApiError::Transport`. Futures are not required to be `Send` because the
/// view state runs on a single cooperative task.
#[async_trait(?Send)]
pub trait Transport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for &T {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request).await
    }
}
