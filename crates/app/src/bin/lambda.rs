//! Mini App API - AWS Lambda Runtime

use lambda_http::{run, Error};
use tower_http::trace::TraceLayer;
use tracing::info;

use miniapp_app::{body_limit_layer, build_cors_layer, create_app, log_filter};
use miniapp_common::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config =
        Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config))
        .json()
        .without_time()
        .init();

    info!("Initializing Mini App API Lambda");

    let cors_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .map_err(|_| Error::from("CORS_ALLOWED_ORIGINS environment variable is required"))?;

    let app = create_app(&config)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&cors_origins))
        .layer(body_limit_layer());

    info!("Mini App API Lambda ready to serve requests");

    run(app).await
}
