//! UI-owned view of the product collection.
//!
//! # Design
//! `ProductView` holds three things: the cached product list, the current
//! edit session and a dismissible notification. The list is never patched
//! locally. Every successful write invalidates it and refetches it from the
//! service, so reads always reflect the latest acknowledged write.
//!
//! An edit session moves through
//! `Idle -> Editing -> Submitting -> Idle | Editing (with error)`, and
//! `Editing -> Idle` on cancel. All methods take `&mut self` and run on one
//! cooperative task; nothing is cancellable once sent and concurrent
//! sessions are not coordinated (the last successful write wins).

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::ProductApi;
use crate::cache::{QueryCache, QueryKey};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{FieldErrors, Product, ProductForm, ProductId};

/// Prompt shown before a delete request is sent.
pub const DELETE_PROMPT: &str = "Really delete this product?";

/// Asks the user for a yes/no answer before a destructive action.
#[async_trait(?Send)]
pub trait Confirm {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// What the list area should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Listing<'a> {
    /// No snapshot yet and no error: the first fetch is outstanding.
    Loading,
    /// The latest snapshot; may be stale if a refetch failed.
    Ready(&'a [Product]),
    /// The first fetch failed and there is nothing to show.
    Failed(&'a str),
}

/// State of one add/edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    /// The record being edited; `None` when adding a new product.
    pub selection: Option<Product>,
    /// Field values to show in the form.
    pub form: ProductForm,
    /// Failure message of the last submission.
    pub error: Option<String>,
    /// Per-field messages from client-side checks.
    pub field_errors: FieldErrors,
}

impl EditSession {
    fn new(selection: Option<Product>) -> Self {
        let form = selection.as_ref().map(ProductForm::from).unwrap_or_default();
        Self {
            selection,
            form,
            error: None,
            field_errors: FieldErrors::default(),
        }
    }

    pub fn is_update(&self) -> bool {
        self.selection.as_ref().is_some_and(Product::is_persisted)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Idle,
    Editing(EditSession),
    Submitting(EditSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("no product form is open")]
    NoActiveSession,

    #[error("product {0} is not in the current listing")]
    UnknownProduct(ProductId),

    #[error("product {0} was not deleted")]
    NotDeleted(ProductId),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct ProductView<T> {
    api: ProductApi<T>,
    cache: QueryCache<QueryKey, Vec<Product>>,
    session: Session,
    notification: Option<String>,
}

impl<T: Transport> ProductView<T> {
    pub fn new(api: ProductApi<T>) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
            session: Session::Idle,
            notification: None,
        }
    }

    pub fn api(&self) -> &ProductApi<T> {
        &self.api
    }

    /// Load the list if it has never been fetched or has been invalidated.
    pub async fn activate(&mut self) {
        if self.cache.is_stale(&QueryKey::Products) {
            self.fetch_products().await;
        }
    }

    /// Refetch the list unconditionally.
    pub async fn refresh(&mut self) {
        self.cache.invalidate(&QueryKey::Products);
        self.fetch_products().await;
    }

    pub fn listing(&self) -> Listing<'_> {
        match (
            self.cache.get(&QueryKey::Products),
            self.cache.error(&QueryKey::Products),
        ) {
            (Some(products), _) => Listing::Ready(products),
            (None, Some(message)) => Listing::Failed(message),
            (None, None) => Listing::Loading,
        }
    }

    /// Error of the most recent list fetch, if it failed.
    pub fn list_error(&self) -> Option<&str> {
        self.cache.error(&QueryKey::Products)
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.cache
            .get(&QueryKey::Products)?
            .iter()
            .find(|product| product.id == Some(id))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The open add/edit session, if any.
    pub fn editing(&self) -> Option<&EditSession> {
        match &self.session {
            Session::Editing(edit) | Session::Submitting(edit) => Some(edit),
            Session::Idle => None,
        }
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Open an empty form for a new product.
    pub fn start_create(&mut self) {
        self.session = Session::Editing(EditSession::new(None));
    }

    /// Open a form seeded with `product`'s fields.
    pub fn start_edit(&mut self, product: &Product) {
        self.session = Session::Editing(EditSession::new(Some(product.clone())));
    }

    /// Like `start_edit`, looking the record up in the current listing.
    pub fn start_edit_by_id(&mut self, id: ProductId) -> Result<(), ViewError> {
        let product = self.find(id).cloned().ok_or(ViewError::UnknownProduct(id))?;
        self.start_edit(&product);
        Ok(())
    }

    /// Close the form without touching the service.
    pub fn cancel(&mut self) {
        self.session = Session::Idle;
        self.notification = None;
    }

    /// Submit the open form.
    ///
    /// Without a selection this creates a product; with one it updates the
    /// selected record, keeping its `id`. Success closes the session and
    /// refreshes the list. Failure keeps the session open with the message
    /// attached and leaves the list untouched.
    pub async fn submit(&mut self, form: ProductForm) -> Result<Product, ViewError> {
        let mut edit = match std::mem::take(&mut self.session) {
            Session::Editing(edit) => edit,
            other => {
                self.session = other;
                return Err(ViewError::NoActiveSession);
            }
        };
        edit.form = form.clone();
        edit.error = None;

        if let Err(fields) = form.check() {
            edit.field_errors = fields.clone();
            self.session = Session::Editing(edit);
            return Err(ApiError::Validation(fields).into());
        }
        edit.field_errors = FieldErrors::default();

        let target = edit.selection.as_ref().and_then(|selected| selected.id);
        self.session = Session::Submitting(edit);

        let result = match target {
            Some(id) => self.api.update_product(&form.into_product(id)).await,
            None => self.api.create_product(&form).await,
        };

        match result {
            Ok(saved) => {
                info!(id = ?saved.id, name = %saved.name, "product saved");
                self.session = Session::Idle;
                self.notification = None;
                self.after_write().await;
                Ok(saved)
            }
            Err(e) => {
                let message = e.user_message();
                warn!(error = %message, "saving product failed");
                if let Session::Submitting(mut edit) = std::mem::take(&mut self.session) {
                    edit.error = Some(message.clone());
                    self.session = Session::Editing(edit);
                }
                self.notification = Some(message);
                Err(e.into())
            }
        }
    }

    /// Delete a record after the user affirms `DELETE_PROMPT`.
    ///
    /// A declined prompt sends nothing. Failures are reported through the
    /// notification, the same way as failed saves.
    pub async fn delete<C>(&mut self, id: ProductId, confirm: &C) -> Result<DeleteOutcome, ViewError>
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(DELETE_PROMPT).await {
            return Ok(DeleteOutcome::Declined);
        }

        match self.api.delete_product(id).await {
            Ok(true) => {
                info!(id, "product deleted");
                self.notification = None;
                self.after_write().await;
                Ok(DeleteOutcome::Deleted)
            }
            Ok(false) => {
                let err = ViewError::NotDeleted(id);
                warn!(id, "service declined to delete product");
                self.notification = Some(err.to_string());
                Err(err)
            }
            Err(e) => {
                let message = e.user_message();
                warn!(id, error = %message, "deleting product failed");
                self.notification = Some(message);
                Err(e.into())
            }
        }
    }

    async fn after_write(&mut self) {
        self.cache.invalidate(&QueryKey::Products);
        self.fetch_products().await;
    }

    async fn fetch_products(&mut self) {
        match self
            .cache
            .refetch(QueryKey::Products, self.api.list_products())
            .await
        {
            Ok(products) => info!(count = products.len(), "product list loaded"),
            Err(e) => warn!(error = %e, "loading product list failed"),
        }
    }
}
