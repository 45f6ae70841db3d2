use std::env;

use anyhow::Result;
use dotenv::dotenv;
use signup_service::{Config, Doc};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // `signup-service openapi` prints the API description instead of serving.
    if env::args().nth(1).as_deref() == Some("openapi") {
        println!("{}", Doc::openapi().to_pretty_json()?);
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    signup_service::serve(config).await
}
