mod app;
mod cors;
mod routes;

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bunner_cors_registry=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = cors::build_state()?;
    let app = app::router(state);

    let addr: SocketAddr = "127.0.0.1:5001".parse()?;
    tracing::info!(%addr, "axum CORS demo listening");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
