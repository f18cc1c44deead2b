use std::{env, error::Error, sync::Arc};

mod core;
mod routes;

use axum::{Router, routing::get};
use tokio::signal;

use crate::core::app_state::AppState;
use crate::routes::analyze::analyze_route::analyze_route;

pub async fn start() -> Result<(), Box<dyn Error>> {
    let host_url = env::var("API_ADDRESS").expect("API_ADDRESS must be set in environment");

    let state = Arc::new(AppState::from_env());

    let app = Router::new()
        .route("/analyze/{pr_url}", get(analyze_route))
        .with_state(state);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&host_url).await.unwrap();

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    // Wait for the Ctrl+C signal
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
