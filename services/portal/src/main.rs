use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ---------------------------------------------------------------------------
// Portal Service — the WPaaS client-facing backend
//
// Loads the pricing configuration once, shares it read-only across all
// handlers, and persists form submissions through the SubmissionStore
// trait. The calculation endpoints are pure over the loaded config.
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "portal=info,axum=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = portal::state::AppState::new()?;
    let app = portal::build_router(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".into());
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
