//! Client core for the product inventory service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), then layers the UI-facing
//! product view on top: a cached list that is refetched after every
//! successful write, and an add/edit session with its error state.
//!
//! # Design
//! - `ProductClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit. A host supplies a `Transport` to run requests.
//! - `ProductApi` composes build, execute and parse into async calls.
//! - `ProductView` owns a `QueryCache` explicitly; nothing is global.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod cache;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod view;

pub use api::ProductApi;
pub use cache::{QueryCache, QueryKey};
pub use client::{ProductClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
pub use types::{FieldErrors, Product, ProductForm, ProductId};
pub use view::{
    Confirm, DeleteOutcome, EditSession, Listing, ProductView, Session, ViewError, DELETE_PROMPT,
};
