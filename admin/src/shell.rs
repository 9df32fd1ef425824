//! The interactive command loop.
//!
//! Reads one command per line, drives the `ProductView` and prints the
//! listing after every command that may have changed it. Failures never end
//! the loop; only `quit` or a closed stdin do.

use product_core::{
    ApiError, Confirm, DeleteOutcome, ProductForm, ProductView, Transport, ViewError,
};

use crate::command::{Command, HELP};
use crate::console::{parse_field, Console};
use crate::render;

pub async fn run<T: Transport>(view: &mut ProductView<T>, console: &Console) -> anyhow::Result<()> {
    view.activate().await;
    println!("{}", render::listing(&view.listing()));

    while let Some(line) = console.prompt("> ").await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::List => {}
            Command::Reload => view.refresh().await,
            Command::Add => {
                view.start_create();
                edit(view, console).await?;
            }
            Command::Edit(id) => match view.start_edit_by_id(id) {
                Ok(()) => edit(view, console).await?,
                Err(e) => println!("{e}"),
            },
            Command::Delete(id) => {
                if let Ok(DeleteOutcome::Deleted) = view.delete(id, console).await {
                    println!("Deleted product {id}.");
                }
            }
        }

        if let Some(message) = view.notification() {
            println!("error: {message}");
            view.dismiss_notification();
        }
        let listing = view.listing();
        println!("{}", render::listing(&listing));
        if let Some(warning) = render::refresh_warning(&listing, view.list_error()) {
            println!("{warning}");
        }
    }
    Ok(())
}

/// Prompt for fields and submit until the save succeeds or the user gives up.
async fn edit<T: Transport>(view: &mut ProductView<T>, console: &Console) -> anyhow::Result<()> {
    loop {
        let Some(session) = view.editing() else {
            return Ok(());
        };
        let title = if session.is_update() {
            "Edit product (blank keeps the current value)"
        } else {
            "New product"
        };
        println!("{title}");

        let Some(form) = read_form(console, &session.form).await? else {
            view.cancel();
            return Ok(());
        };

        match view.submit(form).await {
            Ok(saved) => {
                let id = saved.id.map(|id| id.to_string()).unwrap_or_default();
                println!("Saved product {id}.");
                return Ok(());
            }
            Err(ViewError::Api(ApiError::Validation(fields))) => {
                println!("{}", render::field_errors(&fields));
            }
            Err(e) => {
                let message = view
                    .editing()
                    .and_then(|session| session.error.clone())
                    .unwrap_or_else(|| e.to_string());
                println!("error: {message}");
                view.dismiss_notification();
            }
        }

        if !console.confirm("Try again?").await {
            view.cancel();
            return Ok(());
        }
    }
}

async fn read_form(console: &Console, current: &ProductForm) -> anyhow::Result<Option<ProductForm>> {
    let Some(name) = console.prompt(&format!("name [{}]: ", current.name)).await? else {
        return Ok(None);
    };
    let name = match name.trim() {
        "" => current.name.clone(),
        name => name.to_string(),
    };

    let Some(quantity) = read_number(console, "quantity", current.quantity).await? else {
        return Ok(None);
    };
    let Some(price_per_unit) = read_number(console, "price per unit", current.price_per_unit).await?
    else {
        return Ok(None);
    };

    Ok(Some(ProductForm {
        name,
        quantity,
        price_per_unit,
    }))
}

async fn read_number<N>(console: &Console, label: &str, current: N) -> anyhow::Result<Option<N>>
where
    N: std::str::FromStr + std::fmt::Display + Copy,
{
    loop {
        let Some(input) = console.prompt(&format!("{label} [{current}]: ")).await? else {
            return Ok(None);
        };
        match parse_field(&input, current) {
            Ok(value) => return Ok(Some(value)),
            Err(_) => println!("`{}` is not a valid {label}", input.trim()),
        }
    }
}
