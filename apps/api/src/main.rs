mod analysis;
mod analyzer;
mod config;
mod errors;
mod extraction;
mod report;
mod routes;
mod state;
mod template;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use aws_config::Region;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analyzer::{GapAnalyzer, LambdaAnalyzer};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillBridge API v{}", env!("CARGO_PKG_VERSION"));

    // One shared AWS config for both service clients, pinned to the
    // deployment region.
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;

    let s3 = aws_sdk_s3::Client::new(&aws_config);
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    let lambda = aws_sdk_lambda::Client::new(&aws_config);
    let analyzer: Arc<dyn GapAnalyzer> = Arc::new(LambdaAnalyzer::new(
        lambda,
        config.lambda_function.clone(),
    ));
    info!(
        "Analyzer client initialized (function: {})",
        config.lambda_function
    );

    let state = AppState {
        s3,
        analyzer,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
