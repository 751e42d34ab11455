use std::net::SocketAddr;
use std::sync::Arc;

use ctv_admin::{
    config::{Config, StorageConfig},
    db::{self, PgStore},
    routes,
    state::AppState,
    storage::{CloudImageStore, LocalDiskStore, ObjectStore},
    utils::jwt::JwtKeys,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ctv_admin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    let pool = db::init_db(&config.database_url, config.database_max_connections)
        .await
        .expect("Failed to connect to the database. Is Postgres running?");
    tracing::info!("✅ Connected to Postgres");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // Object store for uploaded images
    let mut local_mount = None;
    let images: Arc<dyn ObjectStore> = match &config.storage {
        StorageConfig::Local { dir, url_prefix } => {
            let store = LocalDiskStore::new(dir.clone(), url_prefix.clone());
            local_mount = Some((store.url_prefix().to_string(), store.root().to_path_buf()));
            Arc::new(store)
        }
        StorageConfig::Cloud(cloud) => Arc::new(CloudImageStore::new(cloud.clone())),
    };
    tracing::info!(backend = images.backend(), "Image storage ready");

    let mut state = AppState::new(
        Arc::new(PgStore::new(pool.clone())),
        images,
        JwtKeys::new(&config.jwt_secret, config.jwt_expiry_hours),
    );
    if let Some((prefix, dir)) = local_mount {
        state = state.with_uploads_mount(prefix, dir);
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::create_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT");
    tracing::info!("🚀 CTV admin server running on http://{}", addr);

    let listener = TcpListener::bind(addr).await.expect("Failed to bind port");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    pool.close().await;
    tracing::info!("Shutdown complete");
}

/// Resolves on SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
