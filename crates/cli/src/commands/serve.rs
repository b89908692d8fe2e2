use std::sync::Arc;

use anyhow::Result;
use fauna_http::{AppState, create_router};

use crate::open_service;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let animal_service = Arc::new(open_service().await?);
    let state = Arc::new(AppState::new(animal_service));

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
