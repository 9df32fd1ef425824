use std::fmt::Write;

use product_core::{FieldErrors, Listing, Product};

pub fn listing(listing: &Listing<'_>) -> String {
    match listing {
        Listing::Loading => "Loading...".to_string(),
        Listing::Failed(message) => format!("Could not load products: {message}"),
        Listing::Ready([]) => "No products.".to_string(),
        Listing::Ready(products) => table(products),
    }
}

/// Warning shown beside a snapshot whose last refresh failed.
pub fn refresh_warning(listing: &Listing<'_>, list_error: Option<&str>) -> Option<String> {
    match (listing, list_error) {
        (Listing::Ready(_), Some(message)) => Some(format!("error: could not refresh: {message}")),
        _ => None,
    }
}

fn table(products: &[Product]) -> String {
    let mut out = format!("{:>5}  {:<24}  {:>8}  {:>10}\n", "ID", "NAME", "QUANTITY", "PRICE");
    for product in products {
        let id = product.id.map(|id| id.to_string()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>5}  {:<24}  {:>8}  {:>10.2}",
            id, product.name, product.quantity, product.price_per_unit
        );
    }
    out.pop();
    out
}

/// One `field: message` line per failed check.
pub fn field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| format!("  {field}: {m}")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_and_empty_states() {
        assert_eq!(listing(&Listing::Loading), "Loading...");
        assert_eq!(listing(&Listing::Ready(&[])), "No products.");
        assert_eq!(
            listing(&Listing::Failed("Network Error: refused")),
            "Could not load products: Network Error: refused"
        );
    }

    #[test]
    fn table_has_header_and_one_row_per_product() {
        let products = [
            Product {
                id: Some(1),
                name: "Widget".to_string(),
                quantity: 5,
                price_per_unit: 2.5,
            },
            Product {
                id: Some(12),
                name: "Gadget".to_string(),
                quantity: 0,
                price_per_unit: 10.0,
            },
        ];
        let text = listing(&Listing::Ready(&products));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("NAME"));
        assert!(lines[1].starts_with("    1  Widget"));
        assert!(lines[1].ends_with("2.50"));
        assert!(lines[2].starts_with("   12  Gadget"));
    }

    #[test]
    fn stale_snapshot_gets_refresh_warning() {
        let products = [Product {
            id: Some(1),
            name: "Widget".to_string(),
            quantity: 5,
            price_per_unit: 2.5,
        }];
        let listing_now = Listing::Ready(&products);
        assert_eq!(
            refresh_warning(&listing_now, Some("Network Error: refused")),
            Some("error: could not refresh: Network Error: refused".to_string())
        );
        assert_eq!(refresh_warning(&listing_now, None), None);
        // with no snapshot the failure is already the listing itself
        assert_eq!(
            refresh_warning(&Listing::Failed("Network Error: refused"), Some("Network Error: refused")),
            None
        );
    }

    #[test]
    fn field_errors_one_per_line() {
        let mut errors = FieldErrors::default();
        errors.push("name", "Name is required");
        errors.push("quantity", "Quantity must not be negative");
        assert_eq!(
            field_errors(&errors),
            "  name: Name is required\n  quantity: Quantity must not be negative"
        );
    }
}
