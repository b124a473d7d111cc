use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use living_books_gateway::{app::build_router, config::Args, state::AppState, sweeper::spawn_sweeper};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "living_books_gateway=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // limiter and quota state lives here for the whole process
    let state = Arc::new(AppState::new());

    if args.sweep_interval > 0 {
        spawn_sweeper(state.clone(), Duration::from_secs(args.sweep_interval));
    }

    let app = build_router(state.clone());

    let addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "gateway listening");
    for limiter in state.limiters.all() {
        tracing::info!(
            limiter = limiter.name(),
            max_requests = limiter.max_requests(),
            window_secs = limiter.window().as_secs(),
            "rate limit configured"
        );
    }
    tracing::info!(
        max_per_day = state.librarian_quota.max_per_day(),
        "librarian free-tier quota configured"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
