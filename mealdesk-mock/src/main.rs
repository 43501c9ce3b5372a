use mealdesk_mock::{MockBackend, MockData, router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mealdesk_mock=info,tower_http=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();

    let port: u16 = std::env::var("MEALDESK_MOCK_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let backend = Arc::new(MockBackend::new(MockData::seeded()));
    let app = router(backend).layer(tower_http::trace::TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "mock admin backend listening");
    axum::serve(listener, app).await?;
    Ok(())
}
