use farmergiant::cart::{AppState, CartArchive};
use farmergiant::notify::NotificationTicker;
use farmergiant::router::create_app_router;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize application state, restoring persisted carts
    let state = Arc::new(AppState::new(CartArchive::from_env()));
    state.catalog.seed();

    // Background driver: queue advancement + simulated purchases
    NotificationTicker::spawn(state.notifications.clone(), state.catalog.clone());

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Configure the server address
    let addr = std::env::var("FARMERGIANT_ADDR")
        .ok()
        .and_then(|addr| addr.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8000)));
    tracing::info!("Server running on http://{addr}");

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
