use std::time::Duration;

use clap::Parser;
use product_core::DEFAULT_BASE_URL;

/// Terminal admin for the product inventory service.
#[derive(Debug, Parser)]
#[command(name = "product-admin", version)]
pub struct Config {
    /// Base address of the product API, including the `/api/v1` prefix.
    #[arg(long, env = "PRODUCT_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Overall timeout for a single request, in seconds.
    #[arg(long, env = "PRODUCT_API_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
