//! Router assembly and the serve loop.

use std::path::Path;

use axum::Router;
use axum::routing::{get, post, put};
use plateshop_auth::AuthLayer;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::routes::{
    add_product, health, list_products, login, update_product, update_product_at,
};
use crate::{AppState, Result, ServerConfig};

/// Build the application router.
///
/// API routes live under `/api`. Writes require a bearer token; listing and
/// login are public. When `static_dir` is set, unmatched paths are served
/// from it.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let auth = AuthLayer::new(state.gate.clone());

    let api = Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route(
            "/products",
            get(list_products).merge(
                post(add_product)
                    .put(update_product)
                    .route_layer(auth.clone()),
            ),
        )
        .route("/products/add", post(add_product).route_layer(auth.clone()))
        .route(
            "/products/update",
            put(update_product).route_layer(auth.clone()),
        )
        .route("/products/{index}", put(update_product_at).route_layer(auth))
        .with_state(state);

    let app = Router::new().nest("/api", api);
    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };
    app.layer(TraceLayer::new_for_http())
}

/// Open the store, bind the listener and serve until Ctrl+C / SIGTERM.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let state = AppState::from_config(&config)?;
    info!("Product data file: {}", state.store.path().display());
    if let Some(dir) = &config.static_dir {
        info!("Serving static files from {}", dir.display());
    }

    let app = router(state, config.static_dir.as_deref());

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
