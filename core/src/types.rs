//! Product records and the editable form that produces them.
//!
//! # Design
//! `Product` mirrors the service's JSON schema (`id`, `name`, `quantity`,
//! `pricePerUnit`) and is defined independently from the mock-server crate;
//! integration tests catch schema drift. An absent `id` marks a draft, a
//! present one a persisted record. The client never fills `id` in itself.
//!
//! `ProductForm` is the id-less set of editable fields. It doubles as the
//! create payload, so a draft cannot carry an identifier by construction.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Service-assigned product identifier.
pub type ProductId = i64;

/// A product record as exchanged with the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub name: String,
    pub quantity: i64,
    pub price_per_unit: f64,
}

impl Product {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Editable product fields, used both as form state and as the create body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i64,

    #[validate(custom(function = "validate_price"))]
    pub price_per_unit: f64,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: 0,
            price_per_unit: 0.0,
        }
    }
}

impl ProductForm {
    /// Run the client-side checks. Field names in the result are the Rust
    /// field names (`name`, `quantity`, `price_per_unit`).
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(|errors| FieldErrors::from(&errors))
    }

    /// A draft carrying these fields.
    pub fn into_draft(self) -> Product {
        Product {
            id: None,
            name: self.name,
            quantity: self.quantity,
            price_per_unit: self.price_per_unit,
        }
    }

    /// The persisted record `id` with its fields replaced by this form.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id: Some(id),
            ..self.into_draft()
        }
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            quantity: product.quantity,
            price_per_unit: product.price_per_unit,
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("Name is required".into()));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() {
        return Err(ValidationError::new("finite").with_message("Price must be a number".into()));
    }
    if price < 0.0 {
        return Err(ValidationError::new("range").with_message("Price must not be negative".into()));
    }
    Ok(())
}

/// Per-field validation messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Messages for one field; empty if the field passed.
    pub fn field(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = FieldErrors::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"));
                out.push(&field, message);
            }
        }
        out
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}
