//! plan-gate service entry point.
//!
//! Loads configuration, wires the production adapters (PostgreSQL plan
//! reader, Redis usage store), and serves the HTTP API.

use std::sync::Arc;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use plan_gate::adapters::http::quota::{app_router, QuotaAppState};
use plan_gate::adapters::plan::PostgresPlanReader;
use plan_gate::adapters::usage::RedisUsageStore;
use plan_gate::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = tokio::time::timeout(
        config.redis.timeout(),
        redis_client.get_multiplexed_tokio_connection(),
    )
    .await??;

    let state = QuotaAppState {
        plan_reader: Arc::new(PostgresPlanReader::new(pool)),
        usage_store: Arc::new(
            RedisUsageStore::new(redis_conn).with_ttl_secs(config.redis.counter_ttl_secs),
        ),
    };

    let app = app_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, environment = ?config.server.environment, "plan-gate listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS from configuration; permissive when no origins are configured.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
