use axum::http::{header, Method, StatusCode};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};
use tracing::{error, info, warn};

use cms_api::{build_router, AppState, Repositories};
use cms_infrastructure::{
    create_pool, run_migrations, InMemoryStore, PgCommentRepository, PgMenuRepository, PgOptionRepository,
};
use cms_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    cms_shared::telemetry::init_telemetry();

    info!("CMS Server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Repositories
    let repos = if config.database.is_configured() {
        info!("Connecting to database...");
        let pool = create_pool(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await?;
        run_migrations(&pool).await?;
        info!("Database connection established.");
        Repositories {
            menus: Arc::new(PgMenuRepository::new(pool.clone())),
            options: Arc::new(PgOptionRepository::new(pool.clone())),
            comments: Arc::new(PgCommentRepository::new(pool)),
        }
    } else {
        warn!("No database configured, serving from the in-memory store");
        Repositories::shared(Arc::new(InMemoryStore::new()))
    };

    // Services, helpers and templates
    let render_timeout = config.site.render_timeout();
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    let state = AppState::build(repos, config)?;

    // Build router
    let app = build_router(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            render_timeout + Duration::from_secs(1),
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT_LANGUAGE]),
        );

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
