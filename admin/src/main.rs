mod command;
mod config;
mod console;
mod logging;
mod render;
mod shell;
mod transport;

use clap::Parser;
use product_core::{ProductApi, ProductClient, ProductView};

use crate::config::Config;
use crate::console::Console;
use crate::transport::UreqTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init();
    let api = ProductApi::new(
        ProductClient::new(&config.base_url),
        UreqTransport::new(config.timeout()),
    );
    tracing::info!(
        base_url = api.client().base_url(),
        timeout_secs = config.timeout_secs,
        "starting"
    );

    let mut view = ProductView::new(api);
    let console = Console::new();
    shell::run(&mut view, &console).await
}
