//! HTTP server for the ticket service.
//!
//! Exposes `GET/POST /tickets` and `GET/PUT/DELETE /ticket/{id}` behind a
//! bearer-token check.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use anyhow::Result;
use axum::{
    routing::{any, get},
    Router,
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build and configure the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/tickets",
            get(handlers::list_tickets)
                .post(handlers::create_ticket)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/ticket/{id}",
            get(handlers::get_ticket)
                .put(handlers::update_ticket)
                .delete(handlers::delete_ticket)
                .fallback(handlers::method_not_allowed),
        )
        .route("/ticket", any(handlers::missing_ticket_id))
        .route("/ticket/", any(handlers::missing_ticket_id))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_authorization,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl+C or SIGTERM.
pub async fn run_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("HTTP server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Shutting down gracefully...");
}
