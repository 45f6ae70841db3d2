use ::anyhow::{Context, Result};
use axum::{routing::post, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

mod anyhow;
mod api;
pub mod config;
pub mod respond;

pub use crate::anyhow::AppError;
pub use api::{Doc, SUCCESS_MESSAGE};
pub use config::Config;

pub fn install_routes<State>(router: Router<State>) -> Router<State>
where
    State: Clone + Send + Sync + 'static,
{
    router.route("/signup", post(api::sign_up))
}

/// The complete application: the sign-up route, open to every origin.
pub fn app() -> Router {
    install_routes(Router::new()).layer(CorsLayer::permissive())
}

/// Binds to the configured address and serves until ctrl-c.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.address();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Binding {addr}"))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => warn!("Failed to listen for ctrl-c: {e}"),
    }
}
