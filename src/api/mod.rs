//! HTTP API module for probe, feature and status endpoints.

pub mod handlers;
pub mod routes;

use std::future::Future;

use tokio::net::TcpListener;

use crate::error::Result;

pub use handlers::AppState;
pub use routes::create_router;

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
