use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use clap::Parser;
use noticeboard::config::{get_config, CliArgs, Config, Service};
use noticeboard::{create_blog_app, create_jobs_app, db, logging, run_migrations, AppState, SessionSettings};
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Builds a CORS layer admitting credentialed requests from the configured
/// origins, or none when no origin is configured
fn cors_layer(config: &Config) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
    )
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args = CliArgs::parse();
    let service = args.service;
    let debug = args.debug;
    let config = get_config(args);

    let _guard = logging::init_tracing(service, &config, debug)?;

    info!("Final configuration: {}", config.summary());
    config.validate().map_err(anyhow::Error::msg)?;

    let pool = db::init_pool(&config.database_url)
        .with_context(|| format!("failed to open database at {}", config.database_url))?;

    {
        let mut conn = pool.get()?;
        run_migrations(service, &mut conn)?;
    }

    let pool = Arc::new(pool);

    let app: Router = match service {
        Service::Jobs => create_jobs_app(pool),
        Service::Blog => create_blog_app(AppState::new(pool, SessionSettings::from(&config))),
    };

    let mut app = app.layer(TraceLayer::new_for_http());
    if let Some(cors) = cors_layer(&config) {
        app = app.layer(cors);
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    info!("Serving {:?} on {}", service, config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
