//! vowdash server entry point.
//!
//! Wires the configured backends and starts the Axum HTTP server.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use vowdash::api;
use vowdash::app_state::{AppState, ServiceSettings};
use vowdash::auth::SessionSigner;
use vowdash::config::{AdminConfig, LogFormat, StoreBackend};
use vowdash::llm::LanguageModel;
use vowdash::llm::anthropic::AnthropicClient;
use vowdash::persistence::{MemoryStore, PostgresStore, Stores};
use vowdash::photos::ObjectStore;
use vowdash::photos::http::HttpObjectStore;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn open_stores(config: &AdminConfig) -> anyhow::Result<Stores> {
    let stores = match config.store_backend {
        StoreBackend::Postgres => {
            let store = PostgresStore::connect(config)
                .await
                .context("failed to open the database")?;
            Stores::shared(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory store; data is lost on restart");
            Stores::shared(Arc::new(MemoryStore::new()))
        }
    };
    Ok(stores)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AdminConfig::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, backend = ?config.store_backend, "starting vowdash");

    let stores = open_stores(&config).await?;

    let photos: Option<Arc<dyn ObjectStore>> = match HttpObjectStore::from_config(&config.storage)? {
        Some(store) => Some(Arc::new(store)),
        None => {
            tracing::warn!("photo storage not configured; photo uploads are disabled");
            None
        }
    };

    let llm: Option<Arc<dyn LanguageModel>> = match AnthropicClient::from_config(&config.llm)? {
        Some(client) => {
            tracing::info!(model = client.model(), "language model enabled");
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("ANTHROPIC_API_KEY not set; AI summary and chat are disabled");
            None
        }
    };

    let sessions = SessionSigner::from_config(&config.auth)?;

    let app_state = AppState::new(
        stores,
        photos,
        llm,
        sessions,
        ServiceSettings {
            app_name: config.app_name.clone(),
            funnel_baseline: config.funnel_baseline,
        },
    );

    let router = api::build_router(&app_state);

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
        )
    };

    let app = router
        .layer(TimeoutLayer::new(Duration::from_secs(120)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
